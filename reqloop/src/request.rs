//! 请求模块
//! Request module
//!
//! 请求由不可变的标识、名称和一个原子状态单元组成。状态只会从
//! `Unprocessed` 变为 `Processed` 一次，由处理循环写入，其他循环可并发读取。
//!
//! A request is an immutable identity and name plus an atomic status cell.
//! The status moves from `Unprocessed` to `Processed` exactly once; the
//! processing loop is the only writer, every other loop may read it
//! concurrently.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use uuid::Uuid;

/// 请求状态
/// Request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RequestStatus {
  /// 未处理
  /// Not processed yet
  Unprocessed = 0,
  /// 已处理
  /// Processed
  Processed = 1,
}

impl RequestStatus {
  /// 转换为字符串
  /// Convert to string
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Unprocessed => "unprocessed",
      Self::Processed => "processed",
    }
  }

  /// 状态的唯一合法后继
  /// The only legal successor of this status
  pub fn successor(self) -> Option<Self> {
    match self {
      Self::Unprocessed => Some(Self::Processed),
      Self::Processed => None,
    }
  }

  fn from_u8(value: u8) -> Self {
    match value {
      0 => Self::Unprocessed,
      _ => Self::Processed,
    }
  }
}

impl fmt::Display for RequestStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// 请求
/// Request
#[derive(Debug)]
pub struct Request {
  id: Uuid,
  name: String,
  status: AtomicU8,
  enqueued: AtomicBool,
}

impl Request {
  /// 创建新的未处理请求
  /// Create a new unprocessed request
  pub fn new<S: Into<String>>(name: S) -> Self {
    Self {
      id: Uuid::new_v4(),
      name: name.into(),
      status: AtomicU8::new(RequestStatus::Unprocessed as u8),
      enqueued: AtomicBool::new(false),
    }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn status(&self) -> RequestStatus {
    RequestStatus::from_u8(self.status.load(Ordering::Acquire))
  }

  pub fn is_processed(&self) -> bool {
    self.status() == RequestStatus::Processed
  }

  /// 标记请求为已处理
  /// Mark the request as processed
  ///
  /// 状态已是 `Processed` 时返回 [`Error::AlreadyProcessed`]
  /// Returns [`Error::AlreadyProcessed`] when the status is already `Processed`
  pub fn mark_processed(&self) -> Result<()> {
    let current = self.status();
    let next = current
      .successor()
      .ok_or(Error::AlreadyProcessed { id: self.id })?;
    self
      .status
      .compare_exchange(current as u8, next as u8, Ordering::AcqRel, Ordering::Acquire)
      .map(|_| ())
      .map_err(|_| Error::AlreadyProcessed { id: self.id })
  }

  /// 占用入队标记；每个请求只能成功一次
  /// Claim the enqueue marker; succeeds once per request
  pub(crate) fn claim_enqueue(&self) -> Result<()> {
    if self.enqueued.swap(true, Ordering::AcqRel) {
      return Err(Error::AlreadyEnqueued { id: self.id });
    }
    Ok(())
  }

  /// 读取请求的一致快照
  /// Read a consistent snapshot of the request
  pub fn info(&self) -> RequestInfo {
    RequestInfo {
      id: self.id,
      name: self.name.clone(),
      status: self.status(),
    }
  }
}

impl PartialEq for Request {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Request {}

/// 请求快照，供展示使用
/// Request snapshot handed to the display collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
  pub id: Uuid,
  pub name: String,
  pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_request_new() {
    let request = Request::new("report");
    assert_eq!(request.name(), "report");
    assert_eq!(request.status(), RequestStatus::Unprocessed);
    assert!(!request.is_processed());
  }

  #[test]
  fn test_request_ids_are_unique() {
    let a = Request::new("same");
    let b = Request::new("same");
    assert_ne!(a.id(), b.id());
    assert_ne!(a, b);
  }

  #[test]
  fn test_mark_processed_once() {
    let request = Request::new("job");
    request.mark_processed().unwrap();
    assert!(request.is_processed());

    let err = request.mark_processed().unwrap_err();
    assert!(matches!(err, Error::AlreadyProcessed { id } if id == request.id()));
    assert_eq!(request.status(), RequestStatus::Processed);
  }

  #[test]
  fn test_status_transition() {
    assert_eq!(
      RequestStatus::Unprocessed.successor(),
      Some(RequestStatus::Processed)
    );
    assert_eq!(RequestStatus::Processed.successor(), None);
    assert_eq!(RequestStatus::Processed.to_string(), "processed");
  }

  #[test]
  fn test_claim_enqueue_once() {
    let request = Request::new("job");
    assert!(request.claim_enqueue().is_ok());
    assert!(matches!(
      request.claim_enqueue(),
      Err(Error::AlreadyEnqueued { .. })
    ));
  }

  #[test]
  fn test_info_snapshot() {
    let request = Request::new("");
    let before = request.info();
    request.mark_processed().unwrap();
    assert_eq!(before.status, RequestStatus::Unprocessed);
    assert_eq!(request.info().status, RequestStatus::Processed);
    assert_eq!(before.id, request.id());
    assert_eq!(before.name, "");
  }
}
