use std::time::Duration;

use thiserror::Error;

/// Errors produced by a [`DocumentService`](crate::DocumentService) call.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service rejected the request and said why. Carries the server's
    /// message verbatim so it can be surfaced to the user as-is.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a usable response (connection refused,
    /// broken transfer, and so on).
    #[error("request failed: {0}")]
    Transport(String),

    /// The request exceeded its deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a body that does not match the contract.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
