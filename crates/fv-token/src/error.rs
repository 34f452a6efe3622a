//! Token decoding error types.

use thiserror::Error;

/// Result type for token operations.
pub type TokenResult<T> = std::result::Result<T, TokenError>;

/// Errors produced while decoding an identity token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is not a three-segment compact JWT.
    #[error("malformed token: expected three dot-separated segments")]
    Malformed,

    /// The payload segment is not valid base64url.
    #[error("invalid payload encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The payload is not the expected JSON claim set.
    #[error("invalid payload claims: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
