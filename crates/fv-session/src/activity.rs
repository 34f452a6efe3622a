//! Qualifying user-activity events.
//!
//! The hosting application forwards these from its event sources (any tab)
//! into [`crate::SessionManager::record_activity`]. There is no debounce
//! window: every qualifying event unconditionally resets both timers, and
//! rapid repeats simply re-issue the same idempotent cancel/rearm pair.

/// A user-interaction event that counts as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// Pointer button pressed.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Key pressed.
    KeyPress,
    /// Page scrolled.
    Scroll,
    /// Touch started.
    TouchStart,
    /// Element clicked.
    Click,
}

impl ActivityKind {
    /// All qualifying event kinds, in the order hosts typically register
    /// listeners for them.
    pub const ALL: [Self; 6] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::KeyPress,
        Self::Scroll,
        Self::TouchStart,
        Self::Click,
    ];
}
