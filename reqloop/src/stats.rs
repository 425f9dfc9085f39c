//! 统计模块
//! Statistics module

use std::sync::atomic::{AtomicU64, Ordering};

/// 生命周期计数器，只增不减
/// Lifecycle counters, monotonic
#[derive(Debug, Default)]
pub struct Counters {
  created: AtomicU64,
  processed: AtomicU64,
  removed: AtomicU64,
}

impl Counters {
  pub fn record_created(&self) {
    self.created.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_processed(&self) {
    self.processed.fetch_add(1, Ordering::Relaxed);
  }

  pub fn record_removed(&self, count: usize) {
    self.removed.fetch_add(count as u64, Ordering::Relaxed);
  }

  pub fn created(&self) -> u64 {
    self.created.load(Ordering::Relaxed)
  }

  pub fn processed(&self) -> u64 {
    self.processed.load(Ordering::Relaxed)
  }

  pub fn removed(&self) -> u64 {
    self.removed.load(Ordering::Relaxed)
  }
}

/// 应用统计快照
/// Application statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppStats {
  /// 注册表中的请求数量
  /// Requests currently in the registry
  pub live: usize,
  /// 注册表中已处理的请求数量
  /// Processed requests still in the registry
  pub processed: usize,
  /// 等待处理的请求数量
  /// Requests waiting in the work queue
  pub queued: usize,
  /// 累计创建数
  /// Requests created since start
  pub created_total: u64,
  /// 累计处理数
  /// Requests processed since start
  pub processed_total: u64,
  /// 累计清理数
  /// Requests removed by cleanup since start
  pub removed_total: u64,
}
