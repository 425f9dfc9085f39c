//! 错误处理模块
//! Error handling module
//!
//! 定义了 reqloop 中使用的错误类型
//! Defines the error types used across reqloop

use thiserror::Error;
use uuid::Uuid;

/// reqloop 的结果类型
/// Result type for reqloop
pub type Result<T> = std::result::Result<T, Error>;

/// reqloop 错误类型
/// reqloop error type
#[derive(Error, Debug)]
pub enum Error {
  /// 应用已停止，不再接受新的请求
  /// The application has stopped and no longer accepts requests
  #[error("Application stopped")]
  Stopped,

  /// 阻塞操作被停止信号打断
  /// A blocking operation was interrupted by the stop signal
  #[error("Operation cancelled")]
  Cancelled,

  /// 应用已在运行
  /// The application is already running
  #[error("Application is already running")]
  AlreadyRunning,

  /// 请求已处理
  /// Request already processed
  #[error("Request already processed: {id}")]
  AlreadyProcessed { id: Uuid },

  /// 请求已入队
  /// Request already enqueued
  #[error("Request already enqueued: {id}")]
  AlreadyEnqueued { id: Uuid },

  /// 无效的运行模式
  /// Invalid application mode
  #[error("Invalid mode: {mode}")]
  InvalidMode { mode: String },

  /// 配置错误
  /// Configuration error
  #[error("Configuration error: {message}")]
  Config { message: String },

  /// IO 错误
  /// IO error
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// 创建配置错误
  /// Create a configuration error
  pub fn config<S: Into<String>>(message: S) -> Self {
    Self::Config {
      message: message.into(),
    }
  }

  /// 检查错误是否由关闭流程引起
  /// Check whether the error comes from the shutdown path
  pub fn is_shutdown(&self) -> bool {
    matches!(self, Error::Stopped | Error::Cancelled)
  }
}
