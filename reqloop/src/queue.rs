//! 工作队列模块
//! Work queue module
//!
//! 请求创建与请求处理之间的无界 FIFO 通道。接收端位于异步互斥锁之后，
//! 同一时刻最多只有一个出队操作在进行。
//!
//! Unbounded FIFO hand-off between request creation and processing. The
//! receiving half sits behind an async mutex so at most one dequeue is
//! active at a time.

use crate::error::{Error, Result};
use crate::request::Request;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// 工作队列
/// Work queue
#[derive(Debug)]
pub struct WorkQueue {
  tx: mpsc::UnboundedSender<Arc<Request>>,
  rx: Mutex<mpsc::UnboundedReceiver<Arc<Request>>>,
  pending: AtomicUsize,
  stop: CancellationToken,
}

impl Default for WorkQueue {
  fn default() -> Self {
    Self::new(CancellationToken::new())
  }
}

impl WorkQueue {
  /// 创建新的工作队列；`stop` 取消后入队失败、阻塞的出队被唤醒
  /// Create a new work queue; once `stop` is cancelled enqueue fails and a
  /// blocked dequeue wakes up
  pub fn new(stop: CancellationToken) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      tx,
      rx: Mutex::new(rx),
      pending: AtomicUsize::new(0),
      stop,
    }
  }

  /// 将请求加入队列，不会阻塞
  /// Enqueue a request without blocking
  pub fn enqueue(&self, request: Arc<Request>) -> Result<()> {
    if self.stop.is_cancelled() {
      return Err(Error::Stopped);
    }
    if request.is_processed() {
      return Err(Error::AlreadyProcessed { id: request.id() });
    }
    request.claim_enqueue()?;
    self.pending.fetch_add(1, Ordering::AcqRel);
    self.tx.send(request).map_err(|_| {
      self.pending.fetch_sub(1, Ordering::AcqRel);
      Error::Stopped
    })
  }

  /// 取出队首请求；队列为空时等待，直到有请求或收到停止信号
  /// Dequeue the head request, waiting until one is available or stop is
  /// requested
  pub async fn dequeue(&self) -> Result<Arc<Request>> {
    let mut rx = tokio::select! {
      biased;
      _ = self.stop.cancelled() => return Err(Error::Cancelled),
      rx = self.rx.lock() => rx,
    };
    tokio::select! {
      biased;
      _ = self.stop.cancelled() => Err(Error::Cancelled),
      request = rx.recv() => {
        let request = request.ok_or(Error::Cancelled)?;
        self.pending.fetch_sub(1, Ordering::AcqRel);
        Ok(request)
      }
    }
  }

  /// 等待处理的请求数量
  /// Number of requests waiting to be dequeued
  pub fn len(&self) -> usize {
    self.pending.load(Ordering::Acquire)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
