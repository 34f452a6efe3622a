//! # fv-session
//!
//! Session lifecycle management for the FileVault client.
//!
//! The [`SessionManager`] owns the authenticated-user record, derives the
//! role from identity-token claims, and runs an inactivity-driven
//! auto-logout state machine with a pre-logout warning countdown. It is
//! explicitly constructed with its collaborators (identity provider,
//! notifier, timing configuration) and handed to the application root;
//! there is no ambient global.
//!
//! ## State machine
//!
//! ```text
//! Unauthenticated --login/restore--> Active
//! Active --activity--> Active                (timers re-armed)
//! Active --T-60s idle--> Warning             (countdown 60..0)
//! Warning --activity/acknowledge--> Active   (timers re-armed)
//! Warning --countdown 0 / T idle--> Unauthenticated (sign-out, once)
//! Active|Warning --logout--> Unauthenticated
//! ```
//!
//! Two timers are armed together on every qualifying activity event: the
//! warning timer (inactivity timeout minus warning window) and the hard
//! logout timer (full inactivity timeout). The hard timer is the source of
//! truth; the countdown is a derived, independently ticking display
//! synchronized to the same deadline at creation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod activity;
pub mod manager;
pub mod notify;
pub mod session;

pub use activity::ActivityKind;
pub use manager::SessionManager;
pub use notify::{LogNotifier, NoopNotifier, SessionNotice, SessionNotifier};
pub use session::{SessionConfig, SessionPhase, SessionSnapshot, SessionUser};
