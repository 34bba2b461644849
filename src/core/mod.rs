pub mod cache_buster;
pub mod delay;
pub mod gateway;
pub mod poller;

pub use crate::domain::model::{FetchOutcome, FetchRequest, RawResponse};
pub use crate::domain::ports::{ConfigProvider, Transport};
pub use crate::utils::error::Result;
