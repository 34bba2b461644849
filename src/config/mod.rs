#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::poller::DEFAULT_POLL_INTERVAL_MS;
use crate::core::ConfigProvider;
use crate::domain::model::FetchRequest;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};

/// 合併檔案與命令列之後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub cache_bust: bool,
    pub poll_interval_ms: u64,
    pub max_attempts: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: None,
            cache_bust: true,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_attempts: None,
        }
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    fn cache_bust(&self) -> bool {
        self.cache_bust
    }

    fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
    }

    fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            validate_url("gateway.base_url", base_url)?;
        }

        if let Some(timeout_ms) = self.timeout_ms {
            validate_positive_number("gateway.timeout_ms", timeout_ms, 1)?;
        }

        if let Some(max_attempts) = self.max_attempts {
            validate_positive_number("poll.max_attempts", max_attempts.into(), 1)?;
        }

        Ok(())
    }
}

/// 一次 CLI 執行要做的事
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub request: FetchRequest,
    pub settings: Settings,
    pub watch: bool,
}

impl Validate for RunPlan {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("url", &self.request.url)?;
        validate_non_empty_string("action", &self.request.action)?;

        // 間隔只在 --watch 時有意義
        if self.watch {
            validate_positive_number("poll.interval_ms", self.settings.poll_interval_ms, 1)?;
        }

        self.settings.validate()
    }
}
