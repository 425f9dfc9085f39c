//! 命令模块
//! Command module
//!
//! 将手动输入的一行文本解析为封闭的命令集合
//! Parses one line of manual input into a closed set of commands

/// 退出命令
pub const EXIT: &str = "exit";
/// 打印所有请求
pub const PRINT_ALL_REQUESTS: &str = "print_all_requests";
/// 打印已处理的请求
pub const PRINT_COMPLETE_REQUESTS: &str = "print_complete_requests";

/// 手动输入命令
/// Manual input command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// 停止整个应用
  /// Stop the whole application
  Exit,
  /// 展示所有请求
  /// Show every request
  PrintAll,
  /// 展示已处理的请求
  /// Show processed requests only
  PrintCompleted,
  /// 以给定名称创建请求
  /// Create a request with the given name
  Create(String),
}

impl Command {
  /// 解析一行输入。只去掉行尾换行符，其余内容原样作为请求名称。
  /// Parse one line of input. Only the line terminator is stripped; anything
  /// else is taken verbatim as a request name.
  pub fn parse(line: &str) -> Self {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    match line {
      EXIT => Self::Exit,
      PRINT_ALL_REQUESTS => Self::PrintAll,
      PRINT_COMPLETE_REQUESTS => Self::PrintCompleted,
      name => Self::Create(name.to_string()),
    }
  }
}
