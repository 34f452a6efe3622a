//! Tolerant decoding of backend payloads.
//!
//! The backend has shipped several spellings of the same fields (`s3Key`
//! vs `key` vs `fileKey`, `lastModified` vs `modifiedAt` vs `uploadedAt`),
//! and list endpoints answer either a bare array or a wrapping object.
//! Everything here accepts all known shapes and never fails a whole list
//! for one odd record.

use chrono::{DateTime, Utc};
use serde_json::Value;

use fv_token::Role;

use crate::types::{FileEntry, UserStatus, VaultUser};

fn str_field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| value.get(*name)?.as_str())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn timestamp_field(value: &Value, names: &[&str]) -> Option<DateTime<Utc>> {
    str_field(value, names).and_then(parse_timestamp)
}

/// Decodes one file record, tolerating all known key/name spellings.
///
/// Returns `None` only when no usable storage key is present at all.
pub fn file_entry(value: &Value) -> Option<FileEntry> {
    let key = str_field(value, &["s3Key", "key", "fileKey", "id"])?.to_string();

    let file_name = str_field(value, &["fileName", "name"])
        .map(str::to_string)
        .or_else(|| key.rsplit('/').next().map(str::to_string))
        .unwrap_or_else(|| "Unknown File".to_string());

    let owner_email = str_field(value, &["ownerEmail", "ownerId"]).map(str::to_string);
    let owner_id = str_field(value, &["ownerId", "ownerEmail"]).map(str::to_string);

    Some(FileEntry {
        key,
        file_name,
        size: value.get("size").and_then(Value::as_u64).unwrap_or(0),
        last_modified: timestamp_field(value, &["lastModified", "modifiedAt", "uploadedAt"]),
        owner_email,
        owner_id,
        owner_name: str_field(value, &["ownerName"]).map(str::to_string),
        file_id: str_field(value, &["fileId"]).map(str::to_string),
    })
}

/// Decodes a file-list response: `{ "files": [...] }` or a bare array.
pub fn file_list(body: &Value) -> Vec<FileEntry> {
    let items = body
        .get("files")
        .and_then(Value::as_array)
        .or_else(|| body.as_array());

    items
        .into_iter()
        .flatten()
        .filter_map(|item| {
            let entry = file_entry(item);
            if entry.is_none() {
                tracing::warn!("skipping file record with no storage key");
            }
            entry
        })
        .collect()
}

/// Decodes one user record.
pub fn user(value: &Value) -> Option<VaultUser> {
    let id = str_field(value, &["id", "sub"])?.to_string();
    let email = str_field(value, &["email"]).unwrap_or_default().to_string();

    let status = match str_field(value, &["status"]) {
        Some("inactive") => UserStatus::Inactive,
        _ => UserStatus::Active,
    };

    Some(VaultUser {
        id,
        email,
        full_name: str_field(value, &["fullName", "name"])
            .unwrap_or_default()
            .to_string(),
        role: Role::parse_lenient(str_field(value, &["role"]).unwrap_or_default()),
        delegated_editor: str_field(value, &["delegatedEditor"]).map(str::to_string),
        created_at: timestamp_field(value, &["createdAt"]),
        last_login: timestamp_field(value, &["lastLogin"]),
        status,
    })
}

/// Decodes a user-list response.
///
/// Accepts a bare array, `{ "users": [...] }`, or the delegated-viewers
/// wrapper `{ "delegatedViewers": [...] }`; anything else is an empty list.
pub fn user_list(body: &Value) -> Vec<VaultUser> {
    let items = body
        .as_array()
        .or_else(|| body.get("users").and_then(Value::as_array))
        .or_else(|| body.get("delegatedViewers").and_then(Value::as_array));

    items.into_iter().flatten().filter_map(user).collect()
}
