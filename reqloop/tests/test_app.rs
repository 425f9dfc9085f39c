//! 应用集成测试
//! Application integration tests
//!
//! 通过通道命令来源驱动整个应用
//! Drives the whole application through a channel-backed command source

use reqloop::app::App;
use reqloop::base::{AppMode, AppState};
use reqloop::config::AppConfig;
use reqloop::error::Error;
use reqloop::reporter::{Reporter, RequestView};
use reqloop::request::{RequestInfo, RequestStatus};
use reqloop::source::ChannelSource;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Default)]
struct RecordingReporter {
  rendered: Mutex<Vec<(RequestView, Vec<RequestInfo>)>>,
  accepted: Mutex<Vec<RequestInfo>>,
}

impl Reporter for RecordingReporter {
  fn render(&self, view: RequestView, requests: &[RequestInfo]) {
    self.rendered.lock().unwrap().push((view, requests.to_vec()));
  }

  fn accepted(&self, request: &RequestInfo) {
    self.accepted.lock().unwrap().push(request.clone());
  }
}

fn fast_config() -> AppConfig {
  AppConfig::new()
    .mode(AppMode::Manual)
    .auto_remove(false)
    .check_interval(Duration::from_millis(40))
    .create_interval(Duration::from_millis(40))
    .clear_interval(Duration::from_millis(40))
    .shutdown_timeout(Duration::from_secs(1))
}

fn build(config: AppConfig) -> (App, UnboundedSender<String>, Arc<RecordingReporter>) {
  let reporter = Arc::new(RecordingReporter::default());
  let (tx, source) = ChannelSource::channel();
  let app = App::new(config, source, reporter.clone()).unwrap();
  (app, tx, reporter)
}

async fn wait_for_accepted(reporter: &RecordingReporter) -> RequestInfo {
  tokio::time::timeout(Duration::from_secs(1), async {
    loop {
      if let Some(info) = reporter.accepted.lock().unwrap().first().cloned() {
        return info;
      }
      tokio::time::sleep(Duration::from_millis(5)).await;
    }
  })
  .await
  .expect("intake should acknowledge the request")
}

fn assert_send<T: Send>(_: &T) {}

#[test]
fn test_run_future_is_send() {
  let (mut app, _tx, _reporter) = build(fast_config());
  let run = app.run();
  assert_send(&run);
}

#[tokio::test]
async fn test_seeded_requests_are_processed() {
  let (mut app, tx, _reporter) = build(fast_config().initial_requests(["a", "b"]));
  let handle = app.handle();
  let run = tokio::spawn(async move { app.run().await });

  tokio::time::sleep(Duration::from_millis(250)).await;

  let all = handle.list_all().await;
  let names: Vec<_> = all.iter().map(|info| info.name.as_str()).collect();
  assert_eq!(names, vec!["a", "b"]);
  assert!(all.iter().all(|info| info.status == RequestStatus::Processed));
  assert_eq!(handle.list_processed().await, all);

  tx.send("exit".to_string()).unwrap();
  tokio::time::timeout(Duration::from_secs(2), run)
    .await
    .expect("run should return after exit")
    .unwrap()
    .unwrap();
}

#[tokio::test]
async fn test_list_processed_is_subset_of_list_all() {
  let config = fast_config()
    .initial_requests(["fast", "slow"])
    .check_interval(Duration::from_millis(100));
  let (mut app, tx, _reporter) = build(config);
  let handle = app.handle();
  let run = tokio::spawn(async move { app.run().await });

  tokio::time::sleep(Duration::from_millis(150)).await;

  let all = handle.list_all().await;
  let processed = handle.list_processed().await;
  assert_eq!(all.len(), 2);
  assert_eq!(processed.len(), 1);
  assert_eq!(processed[0].name, "fast");
  assert!(processed
    .iter()
    .all(|info| info.status == RequestStatus::Processed && all.iter().any(|a| a.id == info.id)));

  drop(tx);
  run.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_auto_remove_drops_processed_requests() {
  let config = fast_config().auto_remove(true);
  let (mut app, tx, reporter) = build(config);
  let handle = app.handle();
  let run = tokio::spawn(async move { app.run().await });

  tx.send("cleanup-me".to_string()).unwrap();
  let id = wait_for_accepted(&reporter).await.id;
  assert!(handle.list_all().await.iter().any(|info| info.id == id));

  // 一个处理间隔加一个清理间隔
  tokio::time::sleep(Duration::from_millis(200)).await;
  assert!(handle.list_all().await.iter().all(|info| info.id != id));

  let stats = handle.stats().await;
  assert_eq!(stats.created_total, 1);
  assert_eq!(stats.processed_total, 1);
  assert_eq!(stats.removed_total, 1);
  assert_eq!(stats.live, 0);

  tx.send("exit".to_string()).unwrap();
  run.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_exit_joins_every_loop() {
  let config = fast_config()
    .mode(AppMode::Auto)
    .auto_remove(true)
    // 处理中的请求在停止时被丢弃
    .check_interval(Duration::from_secs(60))
    .initial_requests(["in-flight", "queued"]);
  let (mut app, tx, _reporter) = build(config);
  let handle = app.handle();
  let run = tokio::spawn(async move {
    let result = app.run().await;
    (result, app.state())
  });

  tokio::time::sleep(Duration::from_millis(50)).await;
  assert!(handle.is_running());
  tx.send("exit".to_string()).unwrap();

  let (result, state) = tokio::time::timeout(Duration::from_millis(500), run)
    .await
    .expect("every loop should observe stop promptly")
    .unwrap();
  result.unwrap();
  assert_eq!(state, AppState::Stopped);
  assert!(!handle.is_running());

  // 停止后不再接受新请求，已有数据仍可查询
  assert!(matches!(handle.submit("late").await, Err(Error::Stopped)));
  let all = handle.list_all().await;
  assert!(all.len() >= 2);
  assert!(all.iter().all(|info| info.status == RequestStatus::Unprocessed));
}

#[tokio::test]
async fn test_stop_handle_interrupts_blocked_input() {
  let (mut app, _tx, _reporter) = build(fast_config());
  let handle = app.handle();
  let run = tokio::spawn(async move { app.run().await });

  tokio::time::sleep(Duration::from_millis(20)).await;
  handle.stop();
  tokio::time::timeout(Duration::from_millis(500), run)
    .await
    .expect("run should return while input is pending")
    .unwrap()
    .unwrap();
}

#[tokio::test]
async fn test_source_closed_triggers_stop() {
  let (mut app, tx, _reporter) = build(fast_config());
  let handle = app.handle();
  let run = tokio::spawn(async move { app.run().await });

  drop(tx);
  tokio::time::timeout(Duration::from_millis(500), run)
    .await
    .expect("eof should stop the application")
    .unwrap()
    .unwrap();
  assert!(!handle.is_running());
}

#[tokio::test]
async fn test_print_commands_render_snapshots() {
  let (mut app, tx, reporter) = build(fast_config().initial_requests(["seeded"]));
  let run = tokio::spawn(async move { app.run().await });

  tokio::time::sleep(Duration::from_millis(100)).await;
  tx.send("pending".to_string()).unwrap();
  tx.send("print_all_requests".to_string()).unwrap();
  tx.send("print_complete_requests".to_string()).unwrap();
  tokio::time::sleep(Duration::from_millis(20)).await;

  {
    let rendered = reporter.rendered.lock().unwrap();
    assert_eq!(rendered.len(), 2);

    let (view, all) = &rendered[0];
    assert_eq!(*view, RequestView::All);
    let names: Vec<_> = all.iter().map(|info| info.name.as_str()).collect();
    assert_eq!(names, vec!["seeded", "pending"]);

    let (view, completed) = &rendered[1];
    assert_eq!(*view, RequestView::Processed);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].name, "seeded");
  }

  // 控制命令不会创建请求
  let accepted = reporter.accepted.lock().unwrap().clone();
  assert_eq!(accepted.len(), 1);
  assert_eq!(accepted[0].name, "pending");

  tx.send("exit".to_string()).unwrap();
  run.await.unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_manual_and_auto_requests_appear_once() {
  let config = fast_config()
    .mode(AppMode::Auto)
    .create_interval(Duration::from_millis(15));
  let (mut app, tx, reporter) = build(config);
  let handle = app.handle();
  let run = tokio::spawn(async move { app.run().await });

  for i in 0..5 {
    tx.send(format!("manual-{i}")).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
  }
  tokio::time::sleep(Duration::from_millis(50)).await;

  let all = handle.list_all().await;
  let ids: HashSet<_> = all.iter().map(|info| info.id).collect();
  assert_eq!(ids.len(), all.len(), "every request appears exactly once");

  let manual: Vec<_> = all
    .iter()
    .filter(|info| info.name.starts_with("manual-"))
    .collect();
  assert_eq!(manual.len(), 5);
  assert!(all.len() > manual.len(), "auto intake should add requests too");
  let accepted = reporter.accepted.lock().unwrap().len();
  assert_eq!(accepted, 5);

  tx.send("exit".to_string()).unwrap();
  run.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_run_twice_fails() {
  let (mut app, tx, _reporter) = build(fast_config());
  tx.send("exit".to_string()).unwrap();
  app.run().await.unwrap();
  assert_eq!(app.state(), AppState::Stopped);
  assert!(matches!(app.run().await, Err(Error::Stopped)));
}

#[tokio::test]
async fn test_invalid_config_rejected() {
  let reporter = Arc::new(RecordingReporter::default());
  let (_tx, source) = ChannelSource::channel();
  let config = AppConfig::new().check_interval(Duration::ZERO);
  assert!(matches!(
    App::new(config, source, reporter),
    Err(Error::Config { .. })
  ));
}

#[tokio::test]
async fn test_dropping_app_stops_every_loop() {
  let config = fast_config()
    .mode(AppMode::Auto)
    .create_interval(Duration::from_millis(10));
  let (mut app, _tx, _reporter) = build(config);
  let handle = app.handle();

  // run() 的 future 在超时时被丢弃
  let timed_out = tokio::time::timeout(Duration::from_millis(30), app.run()).await;
  assert!(timed_out.is_err());
  assert!(handle.is_running());
  assert!(!handle.list_all().await.is_empty());

  drop(app);
  assert!(!handle.is_running());

  tokio::time::sleep(Duration::from_millis(20)).await;
  let before = handle.list_all().await.len();
  tokio::time::sleep(Duration::from_millis(50)).await;
  assert_eq!(handle.list_all().await.len(), before);
}
