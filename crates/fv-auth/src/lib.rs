//! # fv-auth
//!
//! Identity-provider abstraction for the FileVault client.
//!
//! This crate defines the provider seam (sign-in, registration,
//! confirmation, password reset, session retrieval, sign-out), the raw
//! [`ProviderError`] shape providers report failures through, and the
//! classified [`AuthError`] taxonomy the rest of the application consumes.
//!
//! All provider calls are wrapped at this boundary: callers never see a
//! vendor exception name, only a classified error with a user-facing
//! message.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod classify;
pub mod error;
pub mod provider;

pub use error::{AuthError, AuthResult};
pub use provider::{
    IdentityProvider, ProviderError, ProviderResult, ProviderSession, SignInOutcome, SignInStep,
    SignUpAttributes,
};
