//! Best-effort local session notifications.
//!
//! Notification dispatch never blocks or fails the state machine: a host
//! whose notification backend is denied or unsupported simply installs the
//! no-op implementation.

/// A session event worth surfacing outside the application window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// The inactivity warning countdown has started.
    InactivityWarning {
        /// Seconds until automatic logout.
        seconds_remaining: u32,
    },
    /// The session was ended by the inactivity timeout.
    SessionEnded,
}

impl SessionNotice {
    /// Notification title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InactivityWarning { .. } => "FileVault Session Warning",
            Self::SessionEnded => "FileVault Session Ended",
        }
    }

    /// Notification body text.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::InactivityWarning { seconds_remaining } => {
                let minutes = seconds_remaining.div_ceil(60);
                format!(
                    "You will be logged out in {minutes} minute{} due to inactivity.",
                    if minutes == 1 { "" } else { "s" }
                )
            }
            Self::SessionEnded => {
                "You have been automatically logged out due to inactivity.".to_string()
            }
        }
    }
}

/// Sink for best-effort session notifications.
pub trait SessionNotifier: Send + Sync {
    /// Requests notification permission from the host environment.
    ///
    /// Called once at startup; denial is not an error.
    fn request_permission(&self) {}

    /// Delivers a notification. Must not block.
    fn notify(&self, notice: &SessionNotice);
}

/// Notifier that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl SessionNotifier for NoopNotifier {
    fn notify(&self, _notice: &SessionNotice) {}
}

/// Notifier that writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl SessionNotifier for LogNotifier {
    fn notify(&self, notice: &SessionNotice) {
        tracing::info!(title = notice.title(), body = %notice.body(), "session notice");
    }
}
