//! Classified authentication error taxonomy.
//!
//! Each variant renders a short, fixed user-facing message; the messages
//! are part of the contract with the UI and are therefore written by hand
//! rather than derived.

use std::fmt;

/// Classified authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong password or identifier.
    InvalidCredentials,
    /// No account exists for the given identifier.
    AccountNotFound,
    /// Sign-in attempted before email confirmation. Carries the submitted
    /// identifier so the UI can route directly to the verification step.
    AccountUnverified {
        /// The identifier the user signed in with.
        identifier: String,
    },
    /// Registration with an identifier that already has an account.
    AccountAlreadyExists,
    /// Confirmation or reset code mismatch.
    InvalidCode,
    /// Confirmation or reset code expired.
    ExpiredCode,
    /// Password policy violation.
    WeakSecret,
    /// Too many attempts; retry later. Never retried automatically.
    RateLimited,
    /// Any unclassified provider error, surfaced with the provider's raw
    /// message as fallback text.
    Unknown {
        /// The provider's raw message.
        message: String,
    },
}

impl AuthError {
    /// Creates an unclassified error from a raw provider message.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Returns the identifier attached to an unverified-account error.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::AccountUnverified { identifier } => Some(identifier),
            _ => None,
        }
    }

    /// Checks whether the UI should redirect to the verification flow.
    #[must_use]
    pub const fn requires_verification(&self) -> bool {
        matches!(self, Self::AccountUnverified { .. })
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "Incorrect email or password. Please try again.")
            }
            Self::AccountNotFound => {
                write!(f, "No account found with this email. Please sign up first.")
            }
            Self::AccountUnverified { .. } => write!(
                f,
                "Your email address needs to be verified before you can sign in. \
                 Please check your email for the verification code."
            ),
            Self::AccountAlreadyExists => write!(
                f,
                "An account with this email already exists. \
                 Please sign in or use a different email."
            ),
            Self::InvalidCode => {
                write!(f, "Invalid verification code. Please check and try again.")
            }
            Self::ExpiredCode => write!(
                f,
                "Verification code has expired. Please request a new one."
            ),
            Self::WeakSecret => write!(
                f,
                "Password does not meet requirements. Please use a stronger password."
            ),
            Self::RateLimited => write!(f, "Too many attempts. Please try again later."),
            Self::Unknown { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for AuthError {}

/// Result type for authentication operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;
