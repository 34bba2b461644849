use crate::core::cache_buster::bust_cache;
use crate::core::delay::delay_cancellable;
use crate::core::gateway::FetchGateway;
use crate::domain::ports::{ConfigProvider, Transport};
use crate::utils::error::{FetchError, Result};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollControl {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Callback,
    MaxAttempts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSummary {
    pub attempts: u32,
    pub successes: u32,
    pub failures: u32,
    pub stop_reason: StopReason,
}

/// 週期性抓取同一個 URL：fetch → callback → delay → 重複
///
/// 個別請求的錯誤交給 callback 決定，Poller 本身不重試。
pub struct Poller<T: Transport> {
    gateway: FetchGateway<T>,
    interval_ms: u64,
    max_attempts: Option<u32>,
    timeout_ms: Option<u64>,
    cache_bust: bool,
    cancel: CancellationToken,
}

impl<T: Transport> Poller<T> {
    pub fn new(gateway: FetchGateway<T>, interval_ms: u64) -> Self {
        Self {
            gateway,
            interval_ms,
            max_attempts: None,
            timeout_ms: None,
            cache_bust: true,
            cancel: CancellationToken::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(gateway: FetchGateway<T>, config: &C) -> Self {
        Self::new(gateway, config.poll_interval_ms())
            .with_max_attempts(config.max_attempts())
            .with_timeout_ms(config.timeout_ms())
            .with_cache_bust(config.cache_bust())
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_cache_bust(mut self, cache_bust: bool) -> Self {
        self.cache_bust = cache_bust;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// 取得可用來從外部停止輪詢的 token
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn poll<F>(&self, url: &str, action: &str, mut on_result: F) -> Result<PollSummary>
    where
        F: FnMut(Result<String>) -> PollControl,
    {
        let mut attempts = 0u32;
        let mut successes = 0u32;
        let mut failures = 0u32;

        loop {
            if self.cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            let target = if self.cache_bust {
                bust_cache(url)
            } else {
                url.to_string()
            };

            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(FetchError::Cancelled),
                result = self.attempt(&target, action) => result,
            };

            attempts += 1;
            match &result {
                Ok(_) => successes += 1,
                Err(e) => {
                    failures += 1;
                    tracing::debug!("Poll attempt {} failed: {}", attempts, e);
                }
            }

            let summary = |stop_reason| PollSummary {
                attempts,
                successes,
                failures,
                stop_reason,
            };

            if on_result(result) == PollControl::Stop {
                return Ok(summary(StopReason::Callback));
            }

            if self.max_attempts.is_some_and(|max| attempts >= max) {
                tracing::debug!("Reached max attempts ({})", attempts);
                return Ok(summary(StopReason::MaxAttempts));
            }

            delay_cancellable(self.interval_ms, &self.cancel).await?;
        }
    }

    async fn attempt(&self, url: &str, action: &str) -> Result<String> {
        match self.timeout_ms {
            Some(timeout_ms) => {
                self.gateway
                    .fetch_text_with_timeout(url, action, timeout_ms)
                    .await
            }
            None => self.gateway.fetch_text(url, action).await,
        }
    }
}
