use crate::config::toml_config::GatewayConfig;
use crate::config::{RunPlan, Settings};
use crate::domain::model::FetchRequest;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cgi-fetch")]
#[command(about = "Fetch text from a CGI endpoint, once or on an interval")]
pub struct CliConfig {
    /// URL or path to fetch, e.g. /cgi-bin/videolist.sh
    pub url: Option<String>,

    /// Description of the request, used in error messages ("fail to <action>")
    #[arg(long)]
    pub action: Option<String>,

    /// Base URL for relative paths
    #[arg(long, env = "PROXY_TARGET")]
    pub base_url: Option<String>,

    /// TOML configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long, help = "Do not append the _t cache-busting parameter")]
    pub no_cache_bust: bool,

    #[arg(long, help = "Keep polling the URL and print every response")]
    pub watch: bool,

    #[arg(long)]
    pub interval_ms: Option<u64>,

    #[arg(long)]
    pub max_attempts: Option<u32>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn load_file(&self) -> Result<Option<GatewayConfig>> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                GatewayConfig::from_file(path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// 命令列參數優先於設定檔，設定檔優先於預設值
    pub fn resolve(&self) -> Result<RunPlan> {
        let file = self.load_file()?;
        self.merge(file.as_ref())
    }

    pub fn merge(&self, file: Option<&GatewayConfig>) -> Result<RunPlan> {
        let mut settings = file.map(GatewayConfig::settings).unwrap_or_default();
        let file_request = file.and_then(|f| f.request.as_ref());

        if let Some(base_url) = &self.base_url {
            settings.base_url = Some(base_url.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            settings.timeout_ms = Some(timeout_ms);
        }
        if self.no_cache_bust {
            settings.cache_bust = false;
        }
        if let Some(interval_ms) = self.interval_ms {
            settings.poll_interval_ms = interval_ms;
        }
        if let Some(max_attempts) = self.max_attempts {
            settings.max_attempts = Some(max_attempts);
        }

        let url = self
            .url
            .clone()
            .or_else(|| file_request.map(|r| r.url.clone()));
        let url = validate_required_field("url", &url)?.clone();

        let action = self
            .action
            .clone()
            .or_else(|| file_request.and_then(|r| r.action.clone()))
            .unwrap_or_else(|| format!("fetch {}", url));

        Ok(RunPlan {
            request: FetchRequest::new(url, action),
            settings,
            watch: self.watch,
        })
    }
}
