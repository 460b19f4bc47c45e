use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    candidate::CandidateFile,
    error::{Result, ServiceError},
    service::{DocumentService, UploadReceipt},
    transcript::Transcript,
};

/// Surfaced when a selected file does not declare the PDF media type.
pub const INVALID_FILE_ERROR: &str = "Please upload a valid PDF file.";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The finite set of states the client can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No file, no session.
    Idle,
    /// A file is chosen but not yet uploaded.
    FileSelected,
    /// Upload in flight.
    Uploading,
    /// Session open, chat available.
    Active,
    /// A chat turn in flight.
    Sending,
    /// Termination in flight. Always lands back in [`Phase::Idle`].
    Ending,
}

/// What an intent did, for callers that render the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The transition ran; the controller now sits in the contained phase.
    Advanced(Phase),
    /// A guard rejected the intent; nothing changed and no request was sent.
    Ignored,
}

/// An open conversation scoped to one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: String,
    pub summary: String,
}

/// Client-side session lifecycle controller.
///
/// Owns the candidate file, the active session, the transcript, the draft
/// input, and the pending error, and drives them through a fixed transition
/// table. Intents take `&mut self`, so an operation in flight holds the
/// exclusive borrow and a second request cannot be issued mid-transition;
/// guards additionally turn intents from the wrong phase into silent
/// no-ops.
///
/// Every service call runs under a bounded deadline; elapse takes the same
/// failure branch as a transport error, so none of the in-flight phases can
/// park the controller indefinitely.
pub struct SessionController {
    service: Arc<dyn DocumentService>,
    request_timeout: Duration,
    phase: Phase,
    candidate: Option<CandidateFile>,
    session: Option<ChatSession>,
    transcript: Transcript,
    pending_error: Option<String>,
    draft: String,
}

impl SessionController {
    pub fn new(service: Arc<dyn DocumentService>) -> Self {
        Self {
            service,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            phase: Phase::Idle,
            candidate: None,
            session: None,
            transcript: Transcript::new(),
            pending_error: None,
            draft: String::new(),
        }
    }

    /// Override the per-request deadline.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn candidate(&self) -> Option<&CandidateFile> {
        self.candidate.as_ref()
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The error surfaced by the last failed operation, if any. Cleared by
    /// the next successful operation or on session reset.
    pub fn pending_error(&self) -> Option<&str> {
        self.pending_error.as_deref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the in-progress input line.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// A file was chosen or dropped. A candidate that does not declare the
    /// PDF media type is discarded on the spot and a validation error
    /// surfaced; only the candidate and the error slot are touched.
    pub fn select_file(&mut self, file: CandidateFile) -> Outcome {
        match self.phase {
            Phase::Idle | Phase::FileSelected => {}
            _ => return Outcome::Ignored,
        }

        if !file.is_pdf() {
            debug!(media_type = %file.media_type, "rejected non-PDF candidate");
            self.candidate = None;
            self.pending_error = Some(INVALID_FILE_ERROR.to_string());
            self.phase = Phase::Idle;
            return Outcome::Advanced(Phase::Idle);
        }

        info!(name = %file.name, "candidate file selected");
        self.candidate = Some(file);
        self.pending_error = None;
        self.phase = Phase::FileSelected;
        Outcome::Advanced(Phase::FileSelected)
    }

    /// Submit the selected file. On success a session opens with the
    /// summary as the first transcript turn; on failure the candidate is
    /// dropped and the reason surfaced as the pending error.
    pub async fn upload(&mut self) -> Outcome {
        if self.phase != Phase::FileSelected {
            return Outcome::Ignored;
        }
        let Some(file) = self.candidate.take() else {
            return Outcome::Ignored;
        };

        self.phase = Phase::Uploading;
        info!(name = %file.name, "uploading candidate file");
        let result = self.bounded(self.service.upload(&file)).await;

        match result {
            Ok(UploadReceipt {
                session_id,
                summary,
            }) => {
                info!(session_id = %session_id, "upload accepted, session open");
                self.transcript = Transcript::opening(format!("Summary: {summary}"));
                self.session = Some(ChatSession {
                    id: session_id,
                    summary,
                });
                // The candidate is kept until the session ends.
                self.candidate = Some(file);
                self.pending_error = None;
                self.phase = Phase::Active;
                Outcome::Advanced(Phase::Active)
            }
            Err(err) => {
                warn!(error = %err, "upload failed");
                self.pending_error = Some(err.to_string());
                self.phase = Phase::Idle;
                Outcome::Advanced(Phase::Idle)
            }
        }
    }

    /// Submit the current draft as a question. An empty draft or a missing
    /// session is a silent no-op. A failed exchange leaves the transcript
    /// untouched and keeps the draft so the question can be resent.
    pub async fn send_message(&mut self) -> Outcome {
        if self.phase != Phase::Active || self.draft.is_empty() {
            return Outcome::Ignored;
        }
        let Some(session) = self.session.as_ref() else {
            return Outcome::Ignored;
        };
        let session_id = session.id.clone();
        let question = self.draft.clone();

        self.phase = Phase::Sending;
        let result = self
            .bounded(self.service.converse(&session_id, &question))
            .await;

        match result {
            Ok(reply) => {
                self.transcript.push_exchange(question, reply);
                self.draft.clear();
                self.pending_error = None;
                self.phase = Phase::Active;
                Outcome::Advanced(Phase::Active)
            }
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "exchange failed");
                self.pending_error = Some(err.to_string());
                self.phase = Phase::Active;
                Outcome::Advanced(Phase::Active)
            }
        }
    }

    /// Terminate the conversation. Best-effort: a failed remote call is
    /// logged and never surfaced, and local state resets either way. With
    /// no open session this is a no-op and nothing is sent.
    pub async fn end_chat(&mut self) -> Outcome {
        let Some(session) = self.session.as_ref() else {
            return Outcome::Ignored;
        };
        let session_id = session.id.clone();

        self.phase = Phase::Ending;
        if let Err(err) = self.bounded(self.service.terminate(&session_id)).await {
            warn!(session_id = %session_id, error = %err, "failed to end session remotely");
        }

        info!(session_id = %session_id, "session ended");
        self.reset();
        Outcome::Advanced(Phase::Idle)
    }

    /// Return to the initial `Idle` data state.
    fn reset(&mut self) {
        self.session = None;
        self.transcript.clear();
        self.candidate = None;
        self.pending_error = None;
        self.draft.clear();
        self.phase = Phase::Idle;
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        match timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.request_timeout)),
        }
    }
}
