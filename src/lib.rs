pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::ReqwestTransport;
pub use config::{toml_config::GatewayConfig, RunPlan, Settings};
pub use core::{
    cache_buster::bust_cache,
    delay::{delay, delay_cancellable},
    gateway::FetchGateway,
    poller::{PollControl, PollSummary, Poller, StopReason},
};
pub use domain::model::{FetchOutcome, FetchRequest, RawResponse};
pub use domain::ports::Transport;
pub use tokio_util::sync::CancellationToken;
pub use utils::error::{FetchError, Result};
