use crate::domain::model::{FetchOutcome, RawResponse};
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// 以 reqwest 實作的 Transport
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        // 只有 200 才讀 body；其他狀態碼直接回傳，body 讀不讀得到都不影響結果
        if status != FetchOutcome::SUCCESS_STATUS {
            return Ok(RawResponse {
                status,
                body: String::new(),
            });
        }

        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
