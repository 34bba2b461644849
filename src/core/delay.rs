use crate::utils::error::{FetchError, Result};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// 暫停目前的 task 至少 `ms` 毫秒
pub async fn delay(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// 可取消的 delay；token 被取消時提早回傳 `FetchError::Cancelled`
pub async fn delay_cancellable(ms: u64, token: &CancellationToken) -> Result<()> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(FetchError::Cancelled),
        _ = delay(ms) => Ok(()),
    }
}
