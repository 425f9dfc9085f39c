//! 命令来源模块
//! Command source module
//!
//! 手动输入循环从 [`CommandSource`] 读取文本行。返回 `Ok(None)` 表示来源已关闭。
//! The manual intake loop reads lines from a [`CommandSource`]. `Ok(None)`
//! means the source has closed.

use crate::error::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// 命令来源 trait
/// Command source trait
#[async_trait]
pub trait CommandSource: Send {
  /// 读取下一行输入；实现必须是取消安全的
  /// Read the next line of input; implementations must be cancel-safe
  async fn next_line(&mut self) -> Result<Option<String>>;
}

/// 基于异步缓冲读取器的行来源，例如标准输入
/// Line source over an async buffered reader, such as stdin
///
/// 非 UTF-8 字节被替换为 U+FFFD，而不是作为读取错误
/// Invalid UTF-8 is replaced with U+FFFD instead of failing the read
pub struct LineSource<R> {
  reader: R,
  // 跨越被取消的读取保留部分行
  buf: Vec<u8>,
}

impl<R> LineSource<R>
where
  R: AsyncBufRead + Unpin + Send,
{
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      buf: Vec::new(),
    }
  }
}

#[async_trait]
impl<R> CommandSource for LineSource<R>
where
  R: AsyncBufRead + Unpin + Send,
{
  async fn next_line(&mut self) -> Result<Option<String>> {
    let read = self.reader.read_until(b'\n', &mut self.buf).await?;
    if read == 0 && self.buf.is_empty() {
      return Ok(None);
    }
    let mut line = std::mem::take(&mut self.buf);
    if line.last() == Some(&b'\n') {
      line.pop();
      if line.last() == Some(&b'\r') {
        line.pop();
      }
    }
    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
  }
}

/// 基于通道的命令来源，用于嵌入和测试
/// Channel-backed command source, for embedding and tests
pub struct ChannelSource {
  rx: mpsc::UnboundedReceiver<String>,
}

impl ChannelSource {
  /// 创建命令通道，所有发送端被丢弃后来源关闭
  /// Create a command channel; the source closes once every sender is dropped
  pub fn channel() -> (mpsc::UnboundedSender<String>, Self) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, Self { rx })
  }
}

#[async_trait]
impl CommandSource for ChannelSource {
  async fn next_line(&mut self) -> Result<Option<String>> {
    Ok(self.rx.recv().await)
  }
}
