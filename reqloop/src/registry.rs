//! 请求注册表模块
//! Request registry module
//!
//! 所有已知请求的共享集合。追加和压缩持有写锁，快照持有读锁，因此快照只会
//! 看到压缩之前或之后的完整集合，压缩期间的追加也不会丢失。
//!
//! Shared collection of every known request. Append and compact take the
//! write lock and snapshots take the read lock, so a snapshot observes either
//! the pre- or the post-compaction set and an append racing a compaction is
//! never lost.

use crate::error::{Error, Result};
use crate::request::{Request, RequestInfo, RequestStatus};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// 请求注册表
/// Request registry
#[derive(Debug)]
pub struct Registry {
  entries: RwLock<Vec<Arc<Request>>>,
  stop: CancellationToken,
}

impl Default for Registry {
  fn default() -> Self {
    Self::new(CancellationToken::new())
  }
}

impl Registry {
  /// 创建空注册表；`stop` 取消后拒绝追加
  /// Create an empty registry; appends are rejected once `stop` is cancelled
  pub fn new(stop: CancellationToken) -> Self {
    Self {
      entries: RwLock::new(Vec::new()),
      stop,
    }
  }

  /// 追加请求到末尾
  /// Append a request to the end
  pub async fn append(&self, request: Arc<Request>) -> Result<()> {
    let mut entries = self.entries.write().await;
    if self.stop.is_cancelled() {
      return Err(Error::Stopped);
    }
    entries.push(request);
    Ok(())
  }

  /// 读取当前条目的快照，可按状态过滤
  /// Take a snapshot of the current entries, optionally filtered by status
  pub async fn snapshot(&self, filter: Option<RequestStatus>) -> Vec<RequestInfo> {
    let entries = self.entries.read().await;
    entries
      .iter()
      .map(|request| request.info())
      .filter(|info| filter.is_none_or(|status| info.status == status))
      .collect()
  }

  /// 移除所有匹配 `predicate` 的条目，返回移除数量
  /// Drop every entry matching `predicate`, returning how many were removed
  pub async fn compact<F>(&self, predicate: F) -> usize
  where
    F: Fn(&Request) -> bool,
  {
    let mut entries = self.entries.write().await;
    let before = entries.len();
    entries.retain(|request| !predicate(request));
    before - entries.len()
  }

  pub async fn len(&self) -> usize {
    self.entries.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.entries.read().await.is_empty()
  }
}
