//! 应用模块
//! Application module
//!
//! [`App`] 持有所有共享状态，负责启动和停止各个循环；[`AppHandle`] 是可克隆的
//! 查询与停止句柄，可以在 `run()` 阻塞期间从其他任务使用。
//!
//! [`App`] owns all shared state and starts and stops the loops;
//! [`AppHandle`] is a cloneable query and stop handle usable from other tasks
//! while `run()` is blocked.

use crate::base::{AppMode, AppState};
use crate::components::generator::{Generator, GeneratorConfig};
use crate::components::intake::ManualIntake;
use crate::components::janitor::Janitor;
use crate::components::processor::Processor;
use crate::components::ComponentLifecycle;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::pipeline::Pipeline;
use crate::reporter::Reporter;
use crate::request::{RequestInfo, RequestStatus};
use crate::source::CommandSource;
use crate::stats::AppStats;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 应用控制器
/// Application controller
pub struct App {
  config: AppConfig,
  pipeline: Pipeline,
  stop: CancellationToken,
  source: Option<Box<dyn CommandSource>>,
  reporter: Arc<dyn Reporter>,
  state: AppState,
  // 组件列表 - 统一管理实现 ComponentLifecycle 的组件
  // Component list - unified management of components implementing ComponentLifecycle
  components: Vec<(Arc<dyn ComponentLifecycle>, JoinHandle<()>)>,
}

impl App {
  /// 创建新的应用
  /// Create a new application
  pub fn new<S>(config: AppConfig, source: S, reporter: Arc<dyn Reporter>) -> Result<Self>
  where
    S: CommandSource + 'static,
  {
    config.validate()?;
    let stop = CancellationToken::new();
    Ok(Self {
      pipeline: Pipeline::new(stop.clone()),
      config,
      stop,
      source: Some(Box::new(source)),
      reporter,
      state: AppState::New,
      components: Vec::new(),
    })
  }

  /// 获取查询与停止句柄
  /// Get a query and stop handle
  pub fn handle(&self) -> AppHandle {
    AppHandle {
      pipeline: self.pipeline.clone(),
      stop: self.stop.clone(),
    }
  }

  pub fn state(&self) -> AppState {
    self.state
  }

  /// 运行应用直到收到停止信号，然后等待所有循环退出
  /// Run the application until stop is requested, then join every loop
  pub async fn run(&mut self) -> Result<()> {
    match self.state {
      AppState::Running => return Err(Error::AlreadyRunning),
      AppState::Stopped => return Err(Error::Stopped),
      AppState::New => {}
    }
    if self.stop.is_cancelled() {
      self.state = AppState::Stopped;
      return Err(Error::Stopped);
    }
    self.state = AppState::Running;
    tracing::info!(
      "App is ready to run (mode: {}, auto remove: {})",
      self.config.mode,
      self.config.auto_remove
    );

    let seeded = seed(self.pipeline.clone(), self.config.initial_requests.clone()).await;
    if let Err(e) = seeded {
      self.shutdown().await;
      return Err(e);
    }
    self.start_components();

    // 等待停止信号
    // Wait for the stop signal
    self.stop.cancelled().await;
    tracing::info!("Received stop signal");

    self.shutdown().await;
    Ok(())
  }

  /// 请求停止
  /// Request stop
  pub fn stop(&self) {
    self.stop.cancel();
  }

  fn start_components(&mut self) {
    let processor = Arc::new(Processor::new(
      self.pipeline.clone(),
      self.config.check_interval,
      self.stop.child_token(),
    ));
    self.spawn(processor);

    if let Some(source) = self.source.take() {
      let intake = Arc::new(ManualIntake::new(
        self.pipeline.clone(),
        source,
        Arc::clone(&self.reporter),
        self.stop.clone(),
      ));
      self.spawn(intake);
    }

    if self.config.mode == AppMode::Auto {
      let generator_config = GeneratorConfig {
        interval: self.config.create_interval,
        ..GeneratorConfig::default()
      };
      let generator = Arc::new(Generator::new(
        self.pipeline.clone(),
        generator_config,
        self.stop.child_token(),
      ));
      self.spawn(generator);
    }

    if self.config.auto_remove {
      let janitor = Arc::new(Janitor::new(
        self.pipeline.clone(),
        self.config.clear_interval,
        self.stop.child_token(),
      ));
      self.spawn(janitor);
    }
  }

  fn spawn(&mut self, component: Arc<dyn ComponentLifecycle>) {
    tracing::debug!("Starting {}", component.name());
    let handle = component.clone().start();
    self.components.push((component, handle));
  }

  /// 停止所有组件并等待其退出；排队中的请求被丢弃
  /// Stop every component and wait for it to exit; queued requests are dropped
  async fn shutdown(&mut self) {
    self.stop.cancel();
    for (component, mut handle) in self.components.drain(..) {
      component.shutdown();
      match tokio::time::timeout(self.config.shutdown_timeout, &mut handle).await {
        Ok(Ok(())) => tracing::debug!("{} stopped", component.name()),
        Ok(Err(e)) => tracing::error!("{} task failed: {}", component.name(), e),
        Err(_) => {
          tracing::warn!(
            "{} did not stop within {:?}, aborting",
            component.name(),
            self.config.shutdown_timeout
          );
          handle.abort();
        }
      }
    }
    let dropped = self.pipeline.queue.len();
    if dropped > 0 {
      tracing::info!("Dropped {} queued requests on stop", dropped);
    }
    self.state = AppState::Stopped;
    tracing::info!("App {}", self.state.as_str());
  }
}

impl Drop for App {
  // run() 的 future 被丢弃时循环仍在运行，取消它们
  fn drop(&mut self) {
    self.stop.cancel();
  }
}

/// 按顺序提交初始请求
/// Submit the initial requests in order
async fn seed(pipeline: Pipeline, names: Vec<String>) -> Result<()> {
  let count = names.len();
  for name in names {
    pipeline.submit(name).await?;
  }
  if count > 0 {
    tracing::debug!("Seeded {} requests", count);
  }
  Ok(())
}

/// 应用句柄
/// Application handle
#[derive(Clone)]
pub struct AppHandle {
  pipeline: Pipeline,
  stop: CancellationToken,
}

impl AppHandle {
  /// 请求停止；唤醒所有阻塞中的循环
  /// Request stop; wakes every blocked loop
  pub fn stop(&self) {
    self.stop.cancel();
  }

  pub fn is_running(&self) -> bool {
    !self.stop.is_cancelled()
  }

  /// 列出注册表中的所有请求
  /// List every request in the registry
  pub async fn list_all(&self) -> Vec<RequestInfo> {
    self.pipeline.registry.snapshot(None).await
  }

  /// 列出已处理的请求
  /// List processed requests
  pub async fn list_processed(&self) -> Vec<RequestInfo> {
    self
      .pipeline
      .registry
      .snapshot(Some(RequestStatus::Processed))
      .await
  }

  /// 创建请求，与手动输入相同
  /// Submit a request, same as manual input
  pub async fn submit<S: Into<String>>(&self, name: S) -> Result<RequestInfo> {
    Ok(self.pipeline.submit(name).await?.info())
  }

  /// 统计信息
  /// Statistics
  pub async fn stats(&self) -> AppStats {
    let requests = self.list_all().await;
    let counters = &self.pipeline.counters;
    AppStats {
      live: requests.len(),
      processed: requests
        .iter()
        .filter(|info| info.status == RequestStatus::Processed)
        .count(),
      queued: self.pipeline.queue.len(),
      created_total: counters.created(),
      processed_total: counters.processed(),
      removed_total: counters.removed(),
    }
  }
}
