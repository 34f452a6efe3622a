//! # fv-api
//!
//! Typed client for the FileVault backend REST API: file listing,
//! pre-signed upload/download grants, deletion, and user administration
//! (roles and editor delegation).
//!
//! The client is stateless with respect to identity: every call takes the
//! caller's token, which the session layer owns. Backend payloads are
//! decoded tolerantly (see [`normalize`]) because several field spellings
//! and list wrappers exist in the wild.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::VaultApi;
pub use error::{ApiError, ApiResult};
pub use types::{FileEntry, UploadGrant, UploadRequest, UserStatus, VaultUser};
