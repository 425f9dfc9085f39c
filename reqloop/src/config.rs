//! 配置模块
//! Configuration module
//!
//! 定义了应用的构造期配置
//! Defines the construction-time configuration of the application

use crate::base::constants::{
  CHECK_REQUESTS_INTERVAL, CLEAR_PROCESSED_REQUEST_INTERVAL, CREATE_REQUEST_INTERVAL,
  DEFAULT_SHUTDOWN_TIMEOUT,
};
use crate::base::AppMode;
use crate::error::{Error, Result};
use std::time::Duration;

/// 应用配置
/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
  /// 启动时预置的请求名称
  /// Request names seeded on start
  pub initial_requests: Vec<String>,
  /// 运行模式
  /// Application mode
  pub mode: AppMode,
  /// 是否自动清理已处理的请求
  /// Whether processed requests are removed automatically
  pub auto_remove: bool,
  /// 处理单个请求的模拟耗时
  /// Simulated work per request
  pub check_interval: Duration,
  /// 自动生成请求的间隔
  /// Auto-generation period
  pub create_interval: Duration,
  /// 清理间隔
  /// Cleanup period
  pub clear_interval: Duration,
  /// 每个组件的关闭超时时间
  /// Shutdown timeout per component
  pub shutdown_timeout: Duration,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      initial_requests: Vec::new(),
      mode: AppMode::Auto,
      auto_remove: true,
      check_interval: CHECK_REQUESTS_INTERVAL,
      create_interval: CREATE_REQUEST_INTERVAL,
      clear_interval: CLEAR_PROCESSED_REQUEST_INTERVAL,
      shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
    }
  }
}

impl AppConfig {
  /// 创建新的应用配置
  /// Create a new application configuration
  pub fn new() -> Self {
    Self::default()
  }

  /// 设置预置请求
  /// Set the seeded requests
  pub fn initial_requests<I, S>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.initial_requests = names.into_iter().map(Into::into).collect();
    self
  }

  /// 设置运行模式
  /// Set the application mode
  pub fn mode(mut self, mode: AppMode) -> Self {
    self.mode = mode;
    self
  }

  /// 设置是否自动清理
  /// Set whether processed requests are removed automatically
  pub fn auto_remove(mut self, enabled: bool) -> Self {
    self.auto_remove = enabled;
    self
  }

  /// 设置处理耗时
  /// Set the simulated work duration
  pub fn check_interval(mut self, interval: Duration) -> Self {
    self.check_interval = interval;
    self
  }

  /// 设置生成间隔
  /// Set the auto-generation period
  pub fn create_interval(mut self, interval: Duration) -> Self {
    self.create_interval = interval;
    self
  }

  /// 设置清理间隔
  /// Set the cleanup period
  pub fn clear_interval(mut self, interval: Duration) -> Self {
    self.clear_interval = interval;
    self
  }

  /// 设置关闭超时时间
  /// Set the shutdown timeout
  pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
    self.shutdown_timeout = timeout;
    self
  }

  /// 验证配置
  /// Validate the configuration
  pub fn validate(&self) -> Result<()> {
    if self.check_interval.is_zero() {
      return Err(Error::config("check interval must be greater than 0"));
    }
    if self.mode == AppMode::Auto && self.create_interval.is_zero() {
      return Err(Error::config("create interval must be greater than 0"));
    }
    if self.auto_remove && self.clear_interval.is_zero() {
      return Err(Error::config("clear interval must be greater than 0"));
    }
    Ok(())
  }
}
