//! Lifecycle 模块
//! Lifecycle module
//!
//! 提供后台循环通用的生命周期 trait
//! Provides a common lifecycle trait for the background loops
//!
//! 每个组件持有应用停止令牌的子令牌：应用停止时所有组件一起停止，
//! 单独调用 `shutdown()` 只停止该组件。
//! Every component holds a child of the application stop token: stopping the
//! application stops every component, calling `shutdown()` stops only that one.

use std::sync::Arc;
use tokio::task::JoinHandle;

pub mod generator;
pub mod intake;
pub mod janitor;
pub mod processor;

/// Lifecycle trait - 组件生命周期管理接口
/// Lifecycle trait - component lifecycle management interface
///
/// # 实现者 / Implementors
///
/// - [`Processor`](processor::Processor) - 出队并处理请求
/// - [`ManualIntake`](intake::ManualIntake) - 读取手动输入的命令
/// - [`Generator`](generator::Generator) - 定时生成随机请求
/// - [`Janitor`](janitor::Janitor) - 清理已处理的请求
pub trait ComponentLifecycle: Send + Sync {
  /// 组件名称，用于日志
  /// Component name, used in logs
  fn name(&self) -> &'static str;

  /// 启动组件
  /// Start the component
  ///
  /// 返回一个 `JoinHandle<()>`，可用于等待组件任务完成
  /// Returns a `JoinHandle<()>` that can be used to wait for the component task to complete
  fn start(self: Arc<Self>) -> JoinHandle<()>;

  /// 关闭组件
  /// Shutdown the component
  fn shutdown(&self);

  /// 检查组件是否已完成
  /// Check if the component is done
  fn is_done(&self) -> bool;
}
