//! 基础类型模块
//! Base types module
//!
//! 定义了应用运行模式和生命周期状态
//! Defines the application mode and lifecycle state

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

pub mod constants;

/// 应用运行模式
/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
  /// 仅手动输入请求
  /// Requests come from manual input only
  Manual,
  /// 手动输入之外，定时自动生成请求
  /// Requests are also generated on a timer
  #[default]
  Auto,
}

impl AppMode {
  /// 转换为字符串
  /// Convert to string
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Manual => "manual",
      Self::Auto => "auto",
    }
  }
}

impl fmt::Display for AppMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AppMode {
  type Err = Error;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "manual" => Ok(Self::Manual),
      "auto" => Ok(Self::Auto),
      _ => Err(Error::InvalidMode {
        mode: s.to_string(),
      }),
    }
  }
}

/// 应用生命周期状态
/// Application lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
  /// 新建状态
  /// New
  New,
  /// 运行中
  /// Running
  Running,
  /// 已停止
  /// Stopped
  Stopped,
}

impl AppState {
  /// 转换为字符串
  /// Convert to string
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::New => "new",
      Self::Running => "running",
      Self::Stopped => "stopped",
    }
  }
}
