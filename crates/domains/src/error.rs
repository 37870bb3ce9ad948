//! # Errors
//!
//! Centralized error handling for the art-map toolkit.
//! Board API failures are values, never panics: every adapter call returns
//! `Result<_, ApiError>` and callers branch on it.

use thiserror::Error;

/// Failure talking to the remote board API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection refused, DNS failure, TLS failure, ...
    #[error("transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured client timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The board answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not a JSON:API document we understand
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by the error, when the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transient failures worth another attempt. Authorization failures
    /// (401/403) and other client errors are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) | ApiError::Timeout(_) => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Decode(_) => false,
        }
    }

    /// Operator-facing hint for credential and permission failures.
    pub fn hint(&self) -> Option<&'static str> {
        match self.status_code() {
            Some(401) => Some("Check your API key (PADLET_API_KEY)"),
            Some(403) => Some("You need admin/write access to this board"),
            _ => None,
        }
    }
}

/// Failure persisting a snapshot, analysis or report.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The primary error type for service-level operations.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("board API error: {0}")]
    Api(#[from] ApiError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Free-text location that matches no known venue or alias
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("render error: {0}")]
    Render(String),
}

/// A specialized Result type for service logic.
pub type Result<T> = std::result::Result<T, AppError>;
