//! Janitor 模块
//! Janitor module
//!
//! 定期从注册表中清理已处理的请求
//! Periodically removes processed requests from the registry

use crate::components::ComponentLifecycle;
use crate::pipeline::Pipeline;
use crate::request::Request;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Janitor - 负责定期清理已处理的请求
/// Janitor - responsible for periodically removing processed requests
pub struct Janitor {
  pipeline: Pipeline,
  interval: Duration,
  token: CancellationToken,
}

impl Janitor {
  /// 创建新的 Janitor
  /// Create a new Janitor
  pub fn new(pipeline: Pipeline, interval: Duration, token: CancellationToken) -> Self {
    Self {
      pipeline,
      interval,
      token,
    }
  }

  /// 启动 Janitor
  /// Start the Janitor
  pub fn start(self: Arc<Self>) -> JoinHandle<()> {
    tokio::spawn(async move {
      let mut interval = tokio::time::interval(self.interval);
      interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
      loop {
        tokio::select! {
          _ = self.token.cancelled() => break,
          _ = interval.tick() => {}
        }
        self.cleanup().await;
      }
      tracing::debug!("Janitor: shutting down");
    })
  }

  /// 执行一次清理
  /// Run one cleanup pass
  async fn cleanup(&self) {
    let removed = self.pipeline.registry.compact(Request::is_processed).await;
    if removed > 0 {
      self.pipeline.counters.record_removed(removed);
      tracing::debug!("Janitor: removed {} processed requests", removed);
    }
  }

  /// 停止 Janitor
  /// Stop the Janitor
  pub fn shutdown(&self) {
    self.token.cancel();
  }

  /// 检查是否已完成
  /// Check if done
  pub fn is_done(&self) -> bool {
    self.token.is_cancelled()
  }
}

impl ComponentLifecycle for Janitor {
  fn name(&self) -> &'static str {
    "janitor"
  }

  fn start(self: Arc<Self>) -> JoinHandle<()> {
    Janitor::start(self)
  }

  fn shutdown(&self) {
    Janitor::shutdown(self)
  }

  fn is_done(&self) -> bool {
    Janitor::is_done(self)
  }
}
