//! 手动输入模块
//! Manual intake module
//!
//! 从命令来源逐行读取输入：控制命令触发停止或展示，其余输入作为新请求的名称。
//! 来源关闭或读取失败与 `exit` 一样触发全局停止。
//!
//! Reads input line by line from a command source: control tokens stop the
//! application or render the registry, anything else names a new request.
//! The source closing or failing triggers the same global stop as `exit`.

use crate::command::Command;
use crate::components::ComponentLifecycle;
use crate::pipeline::Pipeline;
use crate::reporter::{Reporter, RequestView};
use crate::source::CommandSource;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 手动输入循环
/// Manual intake loop
pub struct ManualIntake {
  pipeline: Pipeline,
  source: Mutex<Box<dyn CommandSource>>,
  reporter: Arc<dyn Reporter>,
  // 应用级停止令牌，`exit` 时取消
  stop: CancellationToken,
  token: CancellationToken,
}

impl ManualIntake {
  /// 创建新的手动输入循环；`stop` 为应用级停止令牌
  /// Create a new manual intake loop; `stop` is the application stop token
  pub fn new(
    pipeline: Pipeline,
    source: Box<dyn CommandSource>,
    reporter: Arc<dyn Reporter>,
    stop: CancellationToken,
  ) -> Self {
    let token = stop.child_token();
    Self {
      pipeline,
      source: Mutex::new(source),
      reporter,
      stop,
      token,
    }
  }

  /// 启动输入循环
  /// Start the intake loop
  pub fn start(self: Arc<Self>) -> JoinHandle<()> {
    tokio::spawn(async move {
      let mut source = self.source.lock().await;
      loop {
        let line = tokio::select! {
          _ = self.token.cancelled() => break,
          line = source.next_line() => line,
        };

        let line = match line {
          Ok(Some(line)) => line,
          Ok(None) => {
            tracing::info!("Command source closed, stopping application");
            self.stop.cancel();
            break;
          }
          Err(e) => {
            tracing::error!("Failed to read command: {}", e);
            self.stop.cancel();
            break;
          }
        };

        if !self.dispatch(Command::parse(&line)).await {
          break;
        }
      }
      tracing::debug!("Manual intake loop exited");
    })
  }

  /// 执行一条命令，返回是否继续
  /// Execute one command, returning whether to keep reading
  async fn dispatch(&self, command: Command) -> bool {
    match command {
      Command::Exit => {
        tracing::info!("Exit requested");
        self.stop.cancel();
        false
      }
      Command::PrintAll => {
        self.render(RequestView::All).await;
        true
      }
      Command::PrintCompleted => {
        self.render(RequestView::Processed).await;
        true
      }
      Command::Create(name) => match self.pipeline.submit(name).await {
        Ok(request) => {
          self.reporter.accepted(&request.info());
          true
        }
        Err(e) if e.is_shutdown() => false,
        Err(e) => {
          tracing::warn!("Failed to submit request: {}", e);
          true
        }
      },
    }
  }

  async fn render(&self, view: RequestView) {
    let requests = self.pipeline.registry.snapshot(view.filter()).await;
    self.reporter.render(view, &requests);
  }

  /// 停止输入循环
  /// Stop the intake loop
  pub fn shutdown(&self) {
    self.token.cancel();
  }

  /// 检查是否已停止
  /// Check if stopped
  pub fn is_done(&self) -> bool {
    self.token.is_cancelled()
  }
}

impl ComponentLifecycle for ManualIntake {
  fn name(&self) -> &'static str {
    "manual-intake"
  }

  fn start(self: Arc<Self>) -> JoinHandle<()> {
    ManualIntake::start(self)
  }

  fn shutdown(&self) {
    ManualIntake::shutdown(self)
  }

  fn is_done(&self) -> bool {
    ManualIntake::is_done(self)
  }
}
