//! API client errors.

use thiserror::Error;

/// Failure talking to the backend API.
///
/// Status failures carry the backend's `message` field when the body had
/// one, otherwise a fixed per-operation fallback, so `to_string()` is
/// always suitable for direct display.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Display-ready message.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Malformed(String),

    /// The request could not be constructed (bad identifier, bad URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Returns the HTTP status, when the backend answered at all.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
