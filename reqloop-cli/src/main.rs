//! reqloop binary
//!
//! Interactive front end: reads commands from stdin, prints tables to stdout,
//! logs to stderr.

mod args;
mod source;
mod table;

use args::Args;
use clap::Parser;
use reqloop::app::App;
use reqloop::command::{EXIT, PRINT_ALL_REQUESTS, PRINT_COMPLETE_REQUESTS};
use source::PromptedStdin;
use std::sync::Arc;
use std::time::Duration;
use table::TableReporter;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const PROMPT: &str = "Enter Request name: ";

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  // Initialize logging
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(
      EnvFilter::from_default_env()
        .add_directive("reqloop=info".parse()?)
        .add_directive("reqloop_cli=info".parse()?),
    )
    .init();

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()?;
  let result = runtime.block_on(run(args));
  // stdin 读取线程可能仍阻塞在系统调用中，不无限等待它
  // The stdin reader thread may still be parked in a read; do not wait on it forever
  runtime.shutdown_timeout(Duration::from_millis(100));
  result
}

async fn run(args: Args) -> anyhow::Result<()> {
  let config = args.to_config();
  info!("Starting reqloop in {} mode", config.mode);

  let mut app = App::new(config, PromptedStdin::new(PROMPT), Arc::new(TableReporter))?;

  let handle = app.handle();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      info!("Received Ctrl-C");
      handle.stop();
    }
  });

  println!("App is ready to run...");
  println!();
  println!("Help Section:");
  println!(" - {EXIT}: Exit App");
  println!(" - {PRINT_ALL_REQUESTS}: Shows table of requests");
  println!(" - {PRINT_COMPLETE_REQUESTS}: Shows table of processed requests");
  println!();

  app.run().await?;
  info!("Bye");
  Ok(())
}
