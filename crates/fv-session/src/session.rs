//! Session state types.

use std::time::Duration;

use fv_token::{IdentityClaims, Role};

/// The authenticated user record.
///
/// Present on the session if and only if the phase is `Active` or
/// `Warning`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Email address.
    pub email: String,
    /// Display name, falling back to the email local part.
    pub display_name: String,
    /// Role derived from the token's group claims.
    pub role: Role,
    /// The raw identity token, passed as the bearer token to the backend.
    pub raw_token: String,
    /// The provider's subject identifier, used as the user id in API calls.
    pub subject_id: String,
}

impl SessionUser {
    /// Builds the user record from decoded token claims.
    #[must_use]
    pub fn from_claims(claims: &IdentityClaims, raw_token: impl Into<String>) -> Self {
        Self {
            email: claims.email.clone(),
            display_name: claims.display_name(),
            role: Role::from_groups(&claims.groups),
            raw_token: raw_token.into(),
            subject_id: claims.sub.clone(),
        }
    }
}

/// Phase of the session state machine.
///
/// The transient logged-out moment collapses into `Unauthenticated`: by the
/// time any observer sees the state, teardown has already happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No authenticated user.
    #[default]
    Unauthenticated,
    /// Authenticated, inactivity timers armed.
    Active,
    /// Authenticated, pre-logout warning countdown running.
    Warning,
}

impl SessionPhase {
    /// Checks whether a user is signed in during this phase.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Active | Self::Warning)
    }
}

/// Timing configuration for the inactivity state machine.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Total inactivity allowed before automatic logout.
    pub inactivity_timeout: Duration,
    /// Final portion of the timeout during which the warning is shown.
    pub warning_window: Duration,
}

impl SessionConfig {
    /// Creates a configuration with explicit timings.
    #[must_use]
    pub const fn new(inactivity_timeout: Duration, warning_window: Duration) -> Self {
        Self {
            inactivity_timeout,
            warning_window,
        }
    }

    /// Idle time before the warning fires.
    #[must_use]
    pub fn warning_delay(&self) -> Duration {
        self.inactivity_timeout.saturating_sub(self.warning_window)
    }

    /// The warning window in whole seconds, as shown by the countdown.
    #[must_use]
    pub fn warning_seconds(&self) -> u32 {
        u32::try_from(self.warning_window.as_secs()).unwrap_or(u32::MAX)
    }
}

impl From<&fv_core::VaultConfig> for SessionConfig {
    fn from(config: &fv_core::VaultConfig) -> Self {
        Self {
            inactivity_timeout: config.inactivity_timeout(),
            warning_window: config.warning_window(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout: Duration::from_secs(300), // 5 minutes
            warning_window: Duration::from_secs(60),      // 1 minute warning
        }
    }
}

/// A cloneable view of the session state, published through a watch
/// channel whenever the state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The authenticated user, if any.
    pub user: Option<SessionUser>,
    /// True until the initial silent restore has settled.
    pub loading: bool,
    /// Current state-machine phase.
    pub phase: SessionPhase,
    /// Seconds left on the warning countdown. Meaningful only while the
    /// phase is `Warning`.
    pub warning_seconds_remaining: u32,
}

impl SessionSnapshot {
    /// The state before the initial restore has run.
    #[must_use]
    pub const fn initial(warning_seconds: u32) -> Self {
        Self {
            user: None,
            loading: true,
            phase: SessionPhase::Unauthenticated,
            warning_seconds_remaining: warning_seconds,
        }
    }

    /// Checks whether the inactivity warning should be displayed.
    #[must_use]
    pub const fn warning_visible(&self) -> bool {
        matches!(self.phase, SessionPhase::Warning)
    }

    /// Checks whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.phase.is_authenticated()
    }
}
