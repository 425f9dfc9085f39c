use async_trait::async_trait;
use reqloop::error::Result;
use reqloop::source::{CommandSource, LineSource};
use std::io::Write;
use tokio::io::{BufReader, Stdin};

/// 带输入提示的标准输入来源
/// Stdin source printing a prompt before each read
pub(crate) struct PromptedStdin {
  inner: LineSource<BufReader<Stdin>>,
  prompt: &'static str,
}

impl PromptedStdin {
  pub(crate) fn new(prompt: &'static str) -> Self {
    Self {
      inner: LineSource::new(BufReader::new(tokio::io::stdin())),
      prompt,
    }
  }
}

#[async_trait]
impl CommandSource for PromptedStdin {
  async fn next_line(&mut self) -> Result<Option<String>> {
    {
      let mut stdout = std::io::stdout().lock();
      stdout.write_all(self.prompt.as_bytes())?;
      stdout.flush()?;
    }
    self.inner.next_line().await
  }
}
