use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use session_flow::{CandidateFile, DocumentService, Result, ServiceError, UploadReceipt};
use tracing::debug;

use crate::models::{ChatRequest, ChatResponse, ErrorBody, UploadResponse};

/// Shown when an upload fails without a server-supplied reason.
pub const UPLOAD_FALLBACK: &str = "Failed to upload PDF.";
/// Shown when a chat exchange fails without a server-supplied reason.
pub const CHAT_FALLBACK: &str = "Failed to get a response.";

/// reqwest-backed [`DocumentService`] adapter.
///
/// Success is an HTTP success status; any other status is a failure whose
/// reason is taken from the structured `error` field of the body when
/// present, else the operation's generic fallback message.
#[derive(Clone)]
pub struct HttpDocumentService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDocumentService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

fn malformed(err: reqwest::Error) -> ServiceError {
    ServiceError::MalformedResponse(err.to_string())
}

/// Pull the structured `error` field out of a failure body, substituting
/// the fallback when the field is absent or the body unreadable.
async fn rejection(response: reqwest::Response, fallback: &str) -> ServiceError {
    let body: ErrorBody = response.json().await.unwrap_or_default();
    ServiceError::Rejected(body.error.unwrap_or_else(|| fallback.to_string()))
}

#[async_trait]
impl DocumentService for HttpDocumentService {
    async fn upload(&self, file: &CandidateFile) -> Result<UploadReceipt> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(transport)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.url("/pdf/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(rejection(response, UPLOAD_FALLBACK).await);
        }

        let body: UploadResponse = response.json().await.map_err(malformed)?;
        debug!(session_id = %body.session_id, "upload accepted");
        Ok(UploadReceipt {
            session_id: body.session_id,
            summary: body.summary,
        })
    }

    async fn converse(&self, session_id: &str, message: &str) -> Result<String> {
        let response = self
            .http
            .post(self.url("/pdf/chat/"))
            .json(&ChatRequest {
                session_id: session_id.to_string(),
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(rejection(response, CHAT_FALLBACK).await);
        }

        let body: ChatResponse = response.json().await.map_err(malformed)?;
        Ok(body.response)
    }

    async fn terminate(&self, session_id: &str) -> Result<()> {
        // Completion is all that matters here; the body is not inspected.
        self.http
            .delete(self.url(&format!("/pdf/chat/end/{session_id}")))
            .send()
            .await
            .map_err(transport)?;
        Ok(())
    }
}
