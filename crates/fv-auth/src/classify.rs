//! Provider-error classification.
//!
//! The same structured provider code maps to different error kinds
//! depending on the operation (`NotAuthorizedException` means bad
//! credentials at sign-in but a bad code at confirmation), so each provider
//! operation gets its own classification function with an explicit mapping
//! table. The richest signal available wins: structured code first, then
//! message substrings, since providers report the same condition through
//! different channels.

use crate::error::AuthError;
use crate::provider::ProviderError;

/// Message fragments that indicate an unverified account.
///
/// Known source of false negatives: if the provider changes its error
/// shape or wording, unverified accounts will fall through to the generic
/// classification for the operation instead.
const UNVERIFIED_FRAGMENTS: &[&str] = &[
    "UserNotConfirmedException",
    "not confirmed",
    "unverified",
    "not verified",
    "verify your email",
];

/// Checks whether a provider error indicates an unverified account.
///
/// Combines the structured code, a fixed set of message substrings, and
/// the HTTP-400 + substring combination into a single predicate. Any
/// positive signal classifies.
#[must_use]
pub fn is_unverified(err: &ProviderError) -> bool {
    if err.code_is("UserNotConfirmedException") || err.code_is("EMAIL_NOT_VERIFIED") {
        return true;
    }

    let message = err.message.to_ascii_lowercase();
    if UNVERIFIED_FRAGMENTS
        .iter()
        .any(|fragment| message.contains(&fragment.to_ascii_lowercase()))
    {
        return true;
    }

    // Some transports surface only a bare 400 whose body mentions the
    // unverified state.
    err.status == Some(400) && (message.contains("unverified") || message.contains("not confirmed"))
}

/// Classifies a sign-in failure.
///
/// Carries the submitted identifier into the unverified case so the UI can
/// route directly to the verification step.
#[must_use]
pub fn classify_sign_in(err: &ProviderError, identifier: &str) -> AuthError {
    if is_unverified(err) {
        return AuthError::AccountUnverified {
            identifier: identifier.to_string(),
        };
    }

    match err.code.as_deref() {
        Some("UserNotFoundException") => AuthError::AccountNotFound,
        Some("NotAuthorizedException") => AuthError::InvalidCredentials,
        Some("PasswordResetRequiredException") => {
            AuthError::unknown("Password reset is required. Please reset your password.")
        }
        Some("TooManyRequestsException" | "LimitExceededException") => AuthError::RateLimited,
        _ => fallback(err, "Login failed"),
    }
}

/// Classifies a registration failure.
#[must_use]
pub fn classify_sign_up(err: &ProviderError) -> AuthError {
    match err.code.as_deref() {
        Some("UsernameExistsException" | "AliasExistsException") => AuthError::AccountAlreadyExists,
        Some("InvalidPasswordException") => AuthError::WeakSecret,
        Some("InvalidParameterException") => {
            AuthError::unknown("Invalid email or password format. Please check your input.")
        }
        Some("TooManyRequestsException" | "LimitExceededException") => AuthError::RateLimited,
        Some("NotAuthorizedException") => AuthError::InvalidCredentials,
        Some("UserNotFoundException" | "ResourceNotFoundException") => AuthError::AccountNotFound,
        _ => fallback(err, "Registration failed"),
    }
}

/// Classifies a sign-up confirmation failure.
#[must_use]
pub fn classify_confirmation(err: &ProviderError) -> AuthError {
    match err.code.as_deref() {
        Some("CodeMismatchException" | "NotAuthorizedException") => AuthError::InvalidCode,
        Some("ExpiredCodeException") => AuthError::ExpiredCode,
        Some("UserNotFoundException") => AuthError::AccountNotFound,
        Some("TooManyRequestsException" | "LimitExceededException") => AuthError::RateLimited,
        _ => fallback(err, "Confirmation failed"),
    }
}

/// Classifies a password-reset request failure.
#[must_use]
pub fn classify_reset_request(err: &ProviderError) -> AuthError {
    match err.code.as_deref() {
        Some("UserNotFoundException") => AuthError::AccountNotFound,
        Some("TooManyRequestsException" | "LimitExceededException") => AuthError::RateLimited,
        Some("InvalidParameterException") => AuthError::unknown("Invalid email address."),
        Some("NotAuthorizedException") => {
            AuthError::unknown("Unable to send reset code. Please try again.")
        }
        _ => fallback(err, "Failed to send reset code"),
    }
}

/// Classifies a password-reset confirmation failure.
#[must_use]
pub fn classify_reset_confirm(err: &ProviderError) -> AuthError {
    match err.code.as_deref() {
        Some("CodeMismatchException" | "NotAuthorizedException") => AuthError::InvalidCode,
        Some("ExpiredCodeException") => AuthError::ExpiredCode,
        Some("InvalidPasswordException") => AuthError::WeakSecret,
        Some("UserNotFoundException") => AuthError::AccountNotFound,
        Some("TooManyRequestsException" | "LimitExceededException") => AuthError::RateLimited,
        _ => fallback(err, "Failed to reset password"),
    }
}

/// Classifies a resend-verification-code failure.
#[must_use]
pub fn classify_resend(err: &ProviderError) -> AuthError {
    match err.code.as_deref() {
        Some("UserNotFoundException") => AuthError::AccountNotFound,
        Some("TooManyRequestsException" | "LimitExceededException") => AuthError::RateLimited,
        Some("InvalidParameterException") => AuthError::unknown("Invalid email address."),
        _ => fallback(err, "Failed to resend verification code"),
    }
}

/// Falls back to the provider's raw message, or a fixed operation message
/// when the provider supplied nothing usable.
fn fallback(err: &ProviderError, operation_message: &str) -> AuthError {
    if err.message.is_empty() {
        AuthError::unknown(operation_message)
    } else {
        AuthError::unknown(err.message.clone())
    }
}
