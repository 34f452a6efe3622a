//! Role derivation from token group claims.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Group marker granting the Admin role.
pub const ADMIN_GROUP: &str = "Admins";

/// Group marker granting the Editor role.
pub const EDITOR_GROUP: &str = "Editors";

/// A user's role, controlling which operations the UI permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    /// Full user and file administration.
    Admin,
    /// File management for own and delegated viewers' files.
    Editor,
    /// Read-only access to own files.
    #[default]
    Viewer,
}

impl Role {
    /// Derives the role from the token's group memberships.
    ///
    /// Admin takes precedence over Editor. Unknown or absent groups yield
    /// Viewer, the fail-safe minimum, never an error.
    #[must_use]
    pub fn from_groups<S: AsRef<str>>(groups: &[S]) -> Self {
        if groups.iter().any(|g| g.as_ref() == ADMIN_GROUP) {
            Self::Admin
        } else if groups.iter().any(|g| g.as_ref() == EDITOR_GROUP) {
            Self::Editor
        } else {
            Self::Viewer
        }
    }

    /// Parses a role name, defaulting to Viewer for anything unrecognized.
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        if name.eq_ignore_ascii_case("Admin") {
            Self::Admin
        } else if name.eq_ignore_ascii_case("Editor") {
            Self::Editor
        } else {
            Self::Viewer
        }
    }

    /// Returns the role name as used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }

    /// Checks whether this role may manage other users.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Checks whether this role may upload and delete files.
    #[must_use]
    pub const fn can_manage_files(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
