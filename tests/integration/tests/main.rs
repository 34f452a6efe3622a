//! End-to-end tests across the FileVault client crates.
//!
//! These drive the real session manager against a scripted identity
//! provider under a paused tokio clock, from token decode through the
//! inactivity state machine to classified auth errors.

mod common;

mod auth_flows;
mod session_lifecycle;
