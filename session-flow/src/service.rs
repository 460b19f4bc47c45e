use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{candidate::CandidateFile, error::Result};

/// What a successful upload hands back: the session handle and the
/// generated summary of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub session_id: String,
    pub summary: String,
}

/// The remote collaborator that holds the uploaded document and answers
/// questions about it. The session identifier it issues is the only state
/// shared between client and service.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Submit a candidate file. On success the service opens a session and
    /// returns its identifier together with the document summary.
    async fn upload(&self, file: &CandidateFile) -> Result<UploadReceipt>;

    /// Ask a question within an open session; returns the reply text.
    async fn converse(&self, session_id: &str, message: &str) -> Result<String>;

    /// Close a session. Best-effort: callers reset local state regardless
    /// of the result.
    async fn terminate(&self, session_id: &str) -> Result<()>;
}
