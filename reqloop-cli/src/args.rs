use clap::{ArgAction, Parser};
use reqloop::base::AppMode;
use reqloop::config::AppConfig;
use std::time::Duration;

/// 命令行参数
/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "reqloop", version, about)]
pub(crate) struct Args {
  /// 运行模式：manual 或 auto
  /// Application mode: manual or auto
  #[arg(short, long, env = "REQLOOP_MODE", default_value = "auto")]
  pub(crate) mode: AppMode,

  /// 是否自动清理已处理的请求
  /// Remove processed requests automatically
  #[arg(long, env = "REQLOOP_AUTO_REMOVE", default_value_t = true, action = ArgAction::Set)]
  pub(crate) auto_remove: bool,

  /// 处理单个请求的耗时（秒）
  /// Simulated work per request, in seconds
  #[arg(long, env = "REQLOOP_CHECK_INTERVAL", default_value_t = 3)]
  pub(crate) check_interval: u64,

  /// 自动生成请求的间隔（秒）
  /// Auto-generation period, in seconds
  #[arg(long, env = "REQLOOP_CREATE_INTERVAL", default_value_t = 3)]
  pub(crate) create_interval: u64,

  /// 清理间隔（秒）
  /// Cleanup period, in seconds
  #[arg(long, env = "REQLOOP_CLEAR_INTERVAL", default_value_t = 3)]
  pub(crate) clear_interval: u64,

  /// 每个循环的关闭超时时间（秒）
  /// Shutdown timeout per loop, in seconds
  #[arg(long, env = "REQLOOP_SHUTDOWN_TIMEOUT", default_value_t = 5)]
  pub(crate) shutdown_timeout: u64,

  /// 启动时预置的请求名称
  /// Request names seeded on start
  pub(crate) requests: Vec<String>,
}

impl Args {
  pub(crate) fn to_config(&self) -> AppConfig {
    AppConfig::new()
      .initial_requests(self.requests.iter().cloned())
      .mode(self.mode)
      .auto_remove(self.auto_remove)
      .check_interval(Duration::from_secs(self.check_interval))
      .create_interval(Duration::from_secs(self.create_interval))
      .clear_interval(Duration::from_secs(self.clear_interval))
      .shutdown_timeout(Duration::from_secs(self.shutdown_timeout))
  }
}
