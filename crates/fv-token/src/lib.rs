//! # fv-token
//!
//! Identity-token handling for the FileVault client.
//!
//! The identity provider issues signed JWT identity tokens; the client
//! decodes the payload locally (without network access) to read the subject,
//! email, display name, and group memberships, and derives the user's role
//! from the group set. Signature and expiry validation are the provider's
//! responsibility; this crate only reads claims from tokens the provider
//! session already vouches for.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claims;
pub mod decode;
pub mod error;
pub mod role;

pub use claims::IdentityClaims;
pub use decode::decode_claims;
pub use error::{TokenError, TokenResult};
pub use role::Role;
