pub mod candidate;
pub mod controller;
pub mod error;
pub mod service;
pub mod transcript;

// Re-export commonly used types
pub use candidate::{CandidateFile, PDF_MEDIA_TYPE};
pub use controller::{ChatSession, INVALID_FILE_ERROR, Outcome, Phase, SessionController};
pub use error::{Result, ServiceError};
pub use service::{DocumentService, UploadReceipt};
pub use transcript::{Sender, Transcript, Turn};
