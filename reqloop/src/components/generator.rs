//! Generator 模块
//! Generator module
//!
//! 自动模式下定时创建随机命名的请求
//! Periodically creates randomly named requests in auto mode

use crate::base::constants::{GENERATED_NAME_LEN, URL_SAFE_ALPHABET};
use crate::components::ComponentLifecycle;
use crate::pipeline::Pipeline;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Generator 配置
/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
  /// 生成间隔
  /// Generation interval
  pub interval: Duration,
  /// 名称长度
  /// Name length
  pub name_len: usize,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      interval: crate::base::constants::CREATE_REQUEST_INTERVAL,
      name_len: GENERATED_NAME_LEN,
    }
  }
}

/// Generator - 负责定时生成请求
/// Generator - creates requests on a timer
pub struct Generator {
  pipeline: Pipeline,
  config: GeneratorConfig,
  token: CancellationToken,
}

impl Generator {
  /// 创建新的 Generator
  /// Create a new Generator
  pub fn new(pipeline: Pipeline, config: GeneratorConfig, token: CancellationToken) -> Self {
    Self {
      pipeline,
      config,
      token,
    }
  }

  /// 启动 Generator
  /// Start the Generator
  pub fn start(self: Arc<Self>) -> JoinHandle<()> {
    tokio::spawn(async move {
      let mut interval = tokio::time::interval(self.config.interval);
      interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
      loop {
        tokio::select! {
          _ = self.token.cancelled() => break,
          _ = interval.tick() => {}
        }

        let name = random_name(self.config.name_len);
        match self.pipeline.submit(name).await {
          Ok(request) => {
            tracing::info!("Generated request {} ({:?})", request.id(), request.name());
          }
          Err(e) if e.is_shutdown() => break,
          Err(e) => tracing::warn!("Generator: failed to submit request: {}", e),
        }
      }
      tracing::debug!("Generator: shutting down");
    })
  }

  /// 停止 Generator
  /// Stop the Generator
  pub fn shutdown(&self) {
    self.token.cancel();
  }

  /// 检查是否已完成
  /// Check if done
  pub fn is_done(&self) -> bool {
    self.token.is_cancelled()
  }
}

impl ComponentLifecycle for Generator {
  fn name(&self) -> &'static str {
    "generator"
  }

  fn start(self: Arc<Self>) -> JoinHandle<()> {
    Generator::start(self)
  }

  fn shutdown(&self) {
    Generator::shutdown(self)
  }

  fn is_done(&self) -> bool {
    Generator::is_done(self)
  }
}

/// 生成 url-safe 随机名称
/// Generate a random url-safe name
pub fn random_name(len: usize) -> String {
  let mut rng = rand::thread_rng();
  (0..len)
    .map(|_| URL_SAFE_ALPHABET[rng.gen_range(0..URL_SAFE_ALPHABET.len())] as char)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_generator_config_default() {
    let config = GeneratorConfig::default();
    assert_eq!(config.interval, Duration::from_secs(3));
    assert_eq!(config.name_len, 11);
  }

  #[test]
  fn test_random_name() {
    let name = random_name(GENERATED_NAME_LEN);
    assert_eq!(name.len(), GENERATED_NAME_LEN);
    assert!(name
      .bytes()
      .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    assert_ne!(random_name(32), random_name(32));
  }

  #[tokio::test]
  async fn test_generator_submits_on_each_tick() {
    let stop = CancellationToken::new();
    let pipeline = Pipeline::new(stop.clone());
    let config = GeneratorConfig {
      interval: Duration::from_millis(20),
      name_len: 8,
    };
    let generator = Arc::new(Generator::new(pipeline.clone(), config, stop.child_token()));
    let handle = generator.clone().start();

    tokio::time::sleep(Duration::from_millis(70)).await;
    generator.shutdown();
    handle.await.unwrap();

    let created = pipeline.registry.snapshot(None).await;
    // 第一次 tick 立即触发
    assert!(created.len() >= 2, "expected at least 2, got {}", created.len());
    assert!(created.iter().all(|info| info.name.len() == 8));
    assert_eq!(pipeline.queue.len(), created.len());
    assert_eq!(pipeline.counters.created() as usize, created.len());
  }
}
