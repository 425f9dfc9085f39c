//! 展示模块
//! Reporter module
//!
//! 核心只产出 `(id, name, status)` 记录序列，具体渲染交给 [`Reporter`] 实现。
//! The core only produces `(id, name, status)` records; rendering them is up
//! to a [`Reporter`] implementation.

use crate::request::{RequestInfo, RequestStatus};

/// 请求视图
/// Request view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestView {
  /// 所有请求
  /// Every request
  All,
  /// 仅已处理的请求
  /// Processed requests only
  Processed,
}

impl RequestView {
  /// 对应的注册表状态过滤条件
  /// Matching registry status filter
  pub fn filter(&self) -> Option<RequestStatus> {
    match self {
      Self::All => None,
      Self::Processed => Some(RequestStatus::Processed),
    }
  }
}

/// 展示协作者
/// Display collaborator
pub trait Reporter: Send + Sync {
  /// 渲染请求列表
  /// Render a list of requests
  fn render(&self, view: RequestView, requests: &[RequestInfo]);

  /// 确认手动创建的请求已接收
  /// Acknowledge a manually created request
  fn accepted(&self, request: &RequestInfo);
}
