//! 请求管线模块
//! Request pipeline module
//!
//! 注册表、工作队列和计数器的共享句柄，所有循环通过它创建请求
//! Shared handle over the registry, work queue and counters; every loop
//! creates requests through it

use crate::error::Result;
use crate::registry::Registry;
use crate::queue::WorkQueue;
use crate::request::Request;
use crate::stats::Counters;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 请求管线
/// Request pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
  pub registry: Arc<Registry>,
  pub queue: Arc<WorkQueue>,
  pub counters: Arc<Counters>,
}

impl Pipeline {
  /// 创建新的管线；`stop` 取消后拒绝新的请求
  /// Create a new pipeline; new requests are rejected once `stop` is cancelled
  pub fn new(stop: CancellationToken) -> Self {
    Self {
      registry: Arc::new(Registry::new(stop.clone())),
      queue: Arc::new(WorkQueue::new(stop)),
      counters: Arc::new(Counters::default()),
    }
  }

  /// 创建请求，追加到注册表并入队
  /// Create a request, append it to the registry and enqueue it
  pub async fn submit<S: Into<String>>(&self, name: S) -> Result<Arc<Request>> {
    let request = Arc::new(Request::new(name));
    self.registry.append(Arc::clone(&request)).await?;
    if let Err(e) = self.queue.enqueue(Arc::clone(&request)) {
      // 入队失败时撤回追加，注册表中不留下永远不会被处理的请求
      let id = request.id();
      self.registry.compact(|entry| entry.id() == id).await;
      return Err(e);
    }
    self.counters.record_created();
    tracing::debug!("Submitted request {} ({:?})", request.id(), request.name());
    Ok(request)
  }
}
