//! Identity provider trait and wire types.
//!
//! The managed identity provider is an external collaborator: the client
//! consumes sign-in/up/confirm/reset, session retrieval, and sign-out as
//! abstract capabilities, not a specific vendor API. Implementations may
//! wrap a vendor SDK; tests use a scripted mock.

use async_trait::async_trait;
use thiserror::Error;

/// Raw, unclassified failure reported by the identity provider.
///
/// Providers may report the same condition through different channels, so
/// all three signals are kept: a structured error code when available, the
/// message always, and the HTTP status when the transport exposes one.
/// Classification into [`crate::AuthError`] happens in [`crate::classify`].
#[derive(Debug, Clone, Error)]
#[error("provider error: {message}")]
pub struct ProviderError {
    /// Structured error code, e.g. `UserNotConfirmedException`.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// HTTP status of the underlying response, when known.
    pub status: Option<u16>,
}

impl ProviderError {
    /// Creates an error with a structured code.
    #[must_use]
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            status: None,
        }
    }

    /// Creates an error carrying only a message.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            status: None,
        }
    }

    /// Sets the HTTP status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Checks whether the structured code matches.
    #[must_use]
    pub fn code_is(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

/// Result type for raw provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// The follow-up step a provider may require after sign-in.
///
/// Providers may answer an unverified account with a challenge instead of
/// an error, so sign-in outcomes carry the next step explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInStep {
    /// Sign-in is complete.
    Done,
    /// The account must confirm its sign-up code first.
    ConfirmSignUp,
    /// A sign-in code challenge (e.g. SMS/TOTP) must be answered.
    ConfirmSignInWithCode,
    /// Any other provider-specific step, carried verbatim.
    Other(String),
}

impl SignInStep {
    /// Checks whether the step means the account is unverified.
    ///
    /// Any step whose name mentions confirmation is treated as requiring
    /// verification, matching the provider's challenge naming convention.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        match self {
            Self::Done => false,
            Self::ConfirmSignUp | Self::ConfirmSignInWithCode => true,
            Self::Other(name) => name.contains("CONFIRM"),
        }
    }
}

/// Outcome of a successful provider sign-in call.
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    /// The step the provider requires next, if any.
    pub next_step: SignInStep,
}

impl SignInOutcome {
    /// A completed sign-in with no further step.
    #[must_use]
    pub const fn done() -> Self {
        Self {
            next_step: SignInStep::Done,
        }
    }

    /// A sign-in answered with a follow-up step.
    #[must_use]
    pub const fn with_step(step: SignInStep) -> Self {
        Self { next_step: step }
    }
}

/// An existing provider session.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    /// The signed identity token, decodable without network access.
    pub id_token: String,
}

/// Attributes supplied at registration.
#[derive(Debug, Clone)]
pub struct SignUpAttributes {
    /// Email address (also the account identifier).
    pub email: String,
    /// Full display name.
    pub full_name: Option<String>,
}

impl SignUpAttributes {
    /// Creates registration attributes.
    #[must_use]
    pub fn new(email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            full_name: Some(full_name.into()),
        }
    }
}

/// Abstract identity provider capability.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies credentials and establishes a provider session.
    async fn sign_in(&self, identifier: &str, secret: &str) -> ProviderResult<SignInOutcome>;

    /// Registers a new account.
    async fn sign_up(
        &self,
        identifier: &str,
        secret: &str,
        attributes: &SignUpAttributes,
    ) -> ProviderResult<()>;

    /// Confirms a registration with the emailed code.
    async fn confirm_sign_up(&self, identifier: &str, code: &str) -> ProviderResult<()>;

    /// Re-sends the registration confirmation code.
    async fn resend_confirmation_code(&self, identifier: &str) -> ProviderResult<()>;

    /// Starts a password reset (sends a reset code).
    async fn request_password_reset(&self, identifier: &str) -> ProviderResult<()>;

    /// Completes a password reset with the emailed code.
    async fn confirm_password_reset(
        &self,
        identifier: &str,
        code: &str,
        new_secret: &str,
    ) -> ProviderResult<()>;

    /// Fetches the current session, failing if none exists.
    async fn current_session(&self) -> ProviderResult<ProviderSession>;

    /// Invalidates the current session.
    async fn sign_out(&self) -> ProviderResult<()>;

    /// Updates a single attribute on the signed-in account.
    async fn update_user_attribute(&self, name: &str, value: &str) -> ProviderResult<()>;
}
