use crate::domain::model::RawResponse;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 對外發送 GET 的介面；實作不得附加任何 header 或 body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> Option<&str>;
    fn timeout_ms(&self) -> Option<u64>;
    fn cache_bust(&self) -> bool;
    fn poll_interval_ms(&self) -> u64;
    fn max_attempts(&self) -> Option<u32>;
}
