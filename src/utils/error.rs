use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// 回應狀態碼不是 200；訊息只帶 action，狀態碼另外保留
    #[error("fail to {action}")]
    Status { action: String, status: u16 },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Timed out after {after:?} while trying to {action}")]
    Timeout { action: String, after: Duration },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FetchError {
    /// 非 200 回應的狀態碼；其他錯誤類型回傳 None
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FetchError::Status { .. } => "Check that the CGI script exists and returns HTTP 200",
            FetchError::Transport(_) | FetchError::Timeout { .. } => {
                "Check that the device is reachable and PROXY_TARGET points at it"
            }
            FetchError::InvalidUrl { .. } => {
                "Use an absolute http(s) URL or set a base URL for relative paths"
            }
            FetchError::Cancelled => "Nothing to do, the operation was stopped on request",
            _ => "Check the configuration file and command-line arguments",
        }
    }

    /// CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self {
            FetchError::Status { .. } => 2,
            FetchError::Transport(_)
            | FetchError::Timeout { .. }
            | FetchError::InvalidUrl { .. } => 3,
            FetchError::Cancelled => 0,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
