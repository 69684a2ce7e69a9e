//! 显式的重试策略
//!
//! `retry_with_limit` 把"最多尝试几次、失败后交给谁"变成一个可测试的函数，
//! 而不是散落在各处的循环。

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// 重试次数耗尽，携带最后一次的错误
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: usize,
    pub last_error: E,
}

/// 执行 `operation`，失败则重试，总尝试次数不超过 `max_attempts`
///
/// - `operation` 接收当前尝试序号（从 1 开始）
/// - 两次尝试之间等待 `delay`，最后一次失败后不再等待
/// - `max_attempts` 为 0 时按 1 处理
pub async fn retry_with_limit<T, E, F, Fut>(
    max_attempts: usize,
    delay: Duration,
    label: &str,
    mut operation: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    info!("{} 第 {} 次尝试成功", label, attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt >= max_attempts => {
                error!("❌ {} 失败，已尝试 {} 次: {}", label, attempt, e);
                return Err(RetryExhausted {
                    attempts: attempt,
                    last_error: e,
                });
            }
            Err(e) => {
                warn!(
                    "⚠️ {} 失败 (尝试 {}/{}): {}，{:?} 后重试...",
                    label, attempt, max_attempts, e, delay
                );
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}
