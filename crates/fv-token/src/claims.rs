//! Identity-token claim types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Claims carried in the identity token payload.
///
/// Only the claims the client actually reads are modelled as fields; any
/// other claims the provider includes are preserved in `additional`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject: the provider's unique identifier for the user. Used as
    /// the user id in backend API calls.
    pub sub: String,

    /// Email address.
    pub email: String,

    /// Full display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Group memberships, from which the role is derived. Providers emit
    /// this under a namespaced key; a plain `groups` key is also accepted.
    #[serde(rename = "cognito:groups", alias = "groups", default)]
    pub groups: Vec<String>,

    /// Expiration time (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at time (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional claims.
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

impl IdentityClaims {
    /// Creates a minimal claim set.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            sub: subject.into(),
            email: email.into(),
            name: None,
            groups: Vec::new(),
            exp: None,
            iat: None,
            additional: HashMap::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the group memberships.
    #[must_use]
    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    /// Returns the display name, falling back to the local part of the
    /// email address when the token carries no name claim.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.email
                .split('@')
                .next()
                .unwrap_or(self.email.as_str())
                .to_string()
        })
    }
}
