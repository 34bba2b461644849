use crate::config::Settings;
use crate::core::poller::DEFAULT_POLL_INTERVAL_MS;
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub gateway: GatewaySection,
    pub request: Option<RequestSection>,
    pub poll: PollSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub cache_bust: bool,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: None,
            cache_bust: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSection {
    pub url: String,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSection {
    pub interval_ms: u64,
    pub max_attempts: Option<u32>,
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_attempts: None,
        }
    }
}

impl GatewayConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FetchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_vars(content, |name| std::env::var(name).ok())?;

        toml::from_str(&processed_content).map_err(|e| FetchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換變數 (例如 ${PROXY_TARGET})；lookup 找不到的變數保持原樣
    fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FetchError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn settings(&self) -> Settings {
        Settings {
            base_url: self.gateway.base_url.clone(),
            timeout_ms: self.gateway.timeout_ms,
            cache_bust: self.gateway.cache_bust,
            poll_interval_ms: self.poll.interval_ms,
            max_attempts: self.poll.max_attempts,
        }
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        self.settings().validate()?;

        if let Some(request) = &self.request {
            validate_non_empty_string("request.url", &request.url)?;
        }

        Ok(())
    }
}
