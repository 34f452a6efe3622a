//! Typed API payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fv_token::Role;

/// A stored file as presented to the client.
///
/// Built through [`crate::normalize`] rather than deserialized directly:
/// the backend has shipped several field spellings over time and the
/// client accepts them all.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// Storage key, e.g. `uploads/{uuid}/report.pdf`.
    pub key: String,
    /// Display file name.
    pub file_name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last-modified timestamp, when the backend supplied one.
    pub last_modified: Option<DateTime<Utc>>,
    /// Owning user's email, when known.
    pub owner_email: Option<String>,
    /// Owning user's id, when known.
    pub owner_id: Option<String>,
    /// Owning user's display name, when known.
    pub owner_name: Option<String>,
    /// Stable file id for download/delete, when the backend supplied one.
    pub file_id: Option<String>,
}

/// Account activity status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account may sign in.
    #[default]
    Active,
    /// Account is disabled.
    Inactive,
}

/// A vault user record from the user-administration endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultUser {
    /// Stable user id (the provider's subject claim).
    pub id: String,
    /// Email address.
    pub email: String,
    /// Full display name.
    pub full_name: String,
    /// Assigned role.
    pub role: Role,
    /// Id of the editor this viewer is delegated to, if any.
    pub delegated_editor: Option<String>,
    /// Account creation timestamp, when supplied.
    pub created_at: Option<DateTime<Utc>>,
    /// Last sign-in timestamp, when supplied.
    pub last_login: Option<DateTime<Utc>>,
    /// Activity status.
    pub status: UserStatus,
}

/// Pre-signed upload grant returned by the upload-url endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrant {
    /// Pre-signed PUT URL.
    pub upload_url: String,
    /// Storage key the object will land under.
    pub file_key: String,
    /// Headers the PUT must carry verbatim.
    #[serde(default)]
    pub required_headers: HashMap<String, String>,
}

/// Request body for the upload-url endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Name of the file being uploaded.
    pub filename: String,
    /// MIME type, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Upload on behalf of this user (editors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_user_id: Option<String>,
}

impl UploadRequest {
    /// An upload into the caller's own vault.
    #[must_use]
    pub fn own(filename: impl Into<String>, content_type: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            target_user_id: None,
        }
    }

    /// An upload on behalf of another user.
    #[must_use]
    pub fn for_user(
        filename: impl Into<String>,
        content_type: Option<String>,
        target_user_id: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            target_user_id: Some(target_user_id.into()),
        }
    }
}
