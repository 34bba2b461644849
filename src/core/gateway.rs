use crate::adapters::ReqwestTransport;
use crate::core::delay::delay;
use crate::domain::model::{FetchOutcome, FetchRequest};
use crate::domain::ports::{ConfigProvider, Transport};
use crate::utils::error::{FetchError, Result};
use std::time::Duration;
use url::Url;

/// 發送單一 GET 並檢查狀態碼的閘道
///
/// 只持有不可變的 transport 與 base URL，可以在多個 task 之間共用。
#[derive(Debug, Clone)]
pub struct FetchGateway<T: Transport> {
    transport: T,
    base_url: Option<Url>,
}

impl FetchGateway<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// 依設定建立 reqwest 版本的閘道
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let gateway = Self::new();
        match config.base_url() {
            Some(base) => gateway.with_base_url(base),
            None => Ok(gateway),
        }
    }
}

impl Default for FetchGateway<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> FetchGateway<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
        }
    }

    /// 設定相對路徑要接上的 base URL（例如 PROXY_TARGET）
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// 有 base URL 時把相對路徑接上去；沒有時原樣交給 transport
    pub fn resolve(&self, url: &str) -> Result<String> {
        match &self.base_url {
            Some(base) => base
                .join(url)
                .map(String::from)
                .map_err(|e| FetchError::InvalidUrl {
                    url: url.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(url.to_string()),
        }
    }

    /// 發送 GET，將狀態碼分成 Success / Failure，不轉成錯誤
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        let target = self.resolve(url)?;
        tracing::debug!("GET {}", target);

        let response = self.transport.get(&target).await?;
        tracing::debug!("Response status {} from {}", response.status, target);

        Ok(FetchOutcome::from_response(response))
    }

    /// 回應狀態必須剛好是 200，否則回傳 `fail to {action}`
    pub async fn fetch_text(&self, url: &str, action: &str) -> Result<String> {
        match self.fetch(url).await? {
            FetchOutcome::Success(body) => Ok(body),
            FetchOutcome::Failure(status) => Err(FetchError::Status {
                action: action.to_string(),
                status,
            }),
        }
    }

    pub async fn fetch_request(&self, request: &FetchRequest) -> Result<String> {
        self.fetch_text(&request.url, &request.action).await
    }

    /// 與 `delay(timeout_ms)` 賽跑，delay 先完成則回傳 Timeout
    pub async fn fetch_text_with_timeout(
        &self,
        url: &str,
        action: &str,
        timeout_ms: u64,
    ) -> Result<String> {
        tokio::select! {
            result = self.fetch_text(url, action) => result,
            _ = delay(timeout_ms) => {
                tracing::debug!("Request to {} timed out after {}ms", url, timeout_ms);
                Err(FetchError::Timeout {
                    action: action.to_string(),
                    after: Duration::from_millis(timeout_ms),
                })
            }
        }
    }
}
