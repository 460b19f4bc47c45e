use serde::{Deserialize, Serialize};

/// Successful reply to `POST /pdf/upload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub summary: String,
}

/// Body of `POST /pdf/chat/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Successful reply to `POST /pdf/chat/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Body the service attaches to non-success statuses. The `error` field is
/// optional; callers substitute a generic message when it is absent.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
