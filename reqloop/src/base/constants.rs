use std::time::Duration;

/// 处理一个请求所需的模拟工作时间
pub const CHECK_REQUESTS_INTERVAL: Duration = Duration::from_secs(3);

/// 自动模式下生成请求的间隔
pub const CREATE_REQUEST_INTERVAL: Duration = Duration::from_secs(3);

/// 清理已处理请求的间隔
pub const CLEAR_PROCESSED_REQUEST_INTERVAL: Duration = Duration::from_secs(3);

/// 停止后等待每个组件退出的最长时间
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// 自动生成的请求名称长度（8 字节 url-safe token 的长度）
pub const GENERATED_NAME_LEN: usize = 11;

/// url-safe 字符表
pub const URL_SAFE_ALPHABET: &[u8] =
  b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_constants() {
    assert_eq!(CHECK_REQUESTS_INTERVAL, Duration::from_secs(3));
    assert_eq!(CREATE_REQUEST_INTERVAL, Duration::from_secs(3));
    assert_eq!(CLEAR_PROCESSED_REQUEST_INTERVAL, Duration::from_secs(3));
    assert_eq!(URL_SAFE_ALPHABET.len(), 64);
  }
}
