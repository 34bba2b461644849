/// 一次 GET 請求的描述；action 只用於錯誤訊息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub action: String,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            action: action.into(),
        }
    }
}

/// Transport 回傳的原始回應
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// 只有狀態碼剛好是 200 才算成功，其餘一律 Failure（包含 201、204）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(String),
    Failure(u16),
}

impl FetchOutcome {
    pub const SUCCESS_STATUS: u16 = 200;

    pub fn from_response(response: RawResponse) -> Self {
        if response.status == Self::SUCCESS_STATUS {
            FetchOutcome::Success(response.body)
        } else {
            FetchOutcome::Failure(response.status)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}
