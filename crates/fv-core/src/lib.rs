//! # fv-core
//!
//! Configuration for the FileVault client.
//!
//! Loaded once at startup from environment variables; the session and API
//! crates derive their own settings from [`VaultConfig`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;

pub use config::VaultConfig;
