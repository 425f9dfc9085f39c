//! # reqloop
//!
//! 交互式请求处理演示：请求被创建、排队、在固定延迟后异步处理，处理完成后可被
//! 自动清理，并可通过状态表查看。
//! Interactive request-processing demo: requests are created, queued,
//! processed asynchronously after a fixed delay, optionally cleaned up once
//! processed, and inspectable through a status table.
//!
//! ## 组件
//! ## Components
//!
//! - 注册表：所有请求的共享集合
//!   - Registry: the shared collection of every request
//! - 工作队列：创建与处理之间的 FIFO 通道
//!   - Work queue: FIFO hand-off between creation and processing
//! - 处理循环、手动输入循环、自动生成循环、清理循环
//!   - Processing, manual intake, auto-generation and cleanup loops
//! - 应用控制器：启动、停止和查询
//!   - Application controller: start, stop and queries
//!
//! ## 快速开始
//! ## Quick Start
//!
//! ```rust,no_run
//! use reqloop::app::App;
//! use reqloop::base::AppMode;
//! use reqloop::config::AppConfig;
//! use reqloop::reporter::{Reporter, RequestView};
//! use reqloop::request::RequestInfo;
//! use reqloop::source::LineSource;
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl Reporter for Printer {
//!   fn render(&self, _view: RequestView, requests: &[RequestInfo]) {
//!     for request in requests {
//!       println!("{} {} {}", request.id, request.name, request.status);
//!     }
//!   }
//!
//!   fn accepted(&self, request: &RequestInfo) {
//!     println!("Request '{}' will be processed soon", request.name);
//!   }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = AppConfig::new()
//!     .mode(AppMode::Manual)
//!     .initial_requests(["a", "b"]);
//!   let source = LineSource::new(tokio::io::BufReader::new(tokio::io::stdin()));
//!   let mut app = App::new(config, source, Arc::new(Printer))?;
//!   app.run().await?;
//!   Ok(())
//! }
//! ```

pub mod app;
pub mod base;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod queue;
pub mod registry;
pub mod reporter;
pub mod request;
pub mod source;
pub mod stats;
