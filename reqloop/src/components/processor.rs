//! 处理器模块
//! Processor module
//!
//! 处理循环是工作队列唯一的消费者：出队一个请求，模拟处理耗时，然后将其标记为
//! 已处理。出队和模拟处理都可以被停止信号打断；处理中途被打断的请求保持未处理
//! 状态，不会被重新入队。
//!
//! The processing loop is the only consumer of the work queue: it dequeues a
//! request, simulates work, then marks it processed. Both the dequeue and
//! the simulated work are interruptible by the stop signal; a request
//! interrupted mid-work stays unprocessed and is not requeued.

use crate::components::ComponentLifecycle;
use crate::pipeline::Pipeline;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 处理器 - 负责从队列中取出请求并处理
/// Processor - responsible for dequeuing and processing requests
pub struct Processor {
  pipeline: Pipeline,
  check_interval: Duration,
  token: CancellationToken,
}

impl Processor {
  /// 创建新的处理器
  /// Create a new processor
  pub fn new(pipeline: Pipeline, check_interval: Duration, token: CancellationToken) -> Self {
    Self {
      pipeline,
      check_interval,
      token,
    }
  }

  /// 启动处理器
  /// Start the processor
  pub fn start(self: Arc<Self>) -> JoinHandle<()> {
    tokio::spawn(async move {
      loop {
        // 等待下一个请求或停止信号
        // Wait for the next request or the stop signal
        let request = tokio::select! {
          _ = self.token.cancelled() => break,
          result = self.pipeline.queue.dequeue() => match result {
            Ok(request) => request,
            Err(e) => {
              tracing::debug!("Processor dequeue interrupted: {}", e);
              break;
            }
          },
        };

        tracing::debug!("Processing request {} ({:?})", request.id(), request.name());

        tokio::select! {
          _ = self.token.cancelled() => {
            tracing::debug!("Dropping in-flight request {}", request.id());
            break;
          }
          _ = tokio::time::sleep(self.check_interval) => {}
        }

        match request.mark_processed() {
          Ok(()) => {
            self.pipeline.counters.record_processed();
            tracing::info!("Request {} ({:?}) processed", request.id(), request.name());
          }
          Err(e) => tracing::error!("Failed to mark request as processed: {}", e),
        }
      }

      tracing::debug!("Processor loop exited");
    })
  }

  /// 停止处理器
  /// Stop the processor
  pub fn shutdown(&self) {
    self.token.cancel();
  }

  /// 检查是否已停止
  /// Check if stopped
  pub fn is_done(&self) -> bool {
    self.token.is_cancelled()
  }
}

impl ComponentLifecycle for Processor {
  fn name(&self) -> &'static str {
    "processor"
  }

  fn start(self: Arc<Self>) -> JoinHandle<()> {
    Processor::start(self)
  }

  fn shutdown(&self) {
    Processor::shutdown(self)
  }

  fn is_done(&self) -> bool {
    Processor::is_done(self)
  }
}
