//! Runtime error types.

use jobfill_protocols::MessagingError;
use thiserror::Error;

/// Profile service failures. Callers treat every variant as "no profile".
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Local store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures surfaced to the popup.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Backend unavailable and no cached profile: {0}")]
    BackendUnavailable(String),

    #[error(transparent)]
    Messaging(#[from] MessagingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
