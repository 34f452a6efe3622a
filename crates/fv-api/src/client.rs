//! HTTP client for the FileVault backend.
//!
//! Every call takes the caller's identity token; the client holds no
//! session state of its own, so a token refresh or logout elsewhere never
//! leaves a stale credential cached here.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use url::Url;

use fv_token::Role;

use crate::error::{ApiError, ApiResult};
use crate::normalize;
use crate::types::{FileEntry, UploadGrant, UploadRequest, VaultUser};

/// Typed client for the backend REST API.
#[derive(Debug, Clone)]
pub struct VaultApi {
    http: reqwest::Client,
    base: Url,
}

impl VaultApi {
    /// Creates a client against the given API endpoint.
    ///
    /// # Errors
    ///
    /// Fails when the endpoint is not a valid absolute URL.
    pub fn new(endpoint: &str) -> ApiResult<Self> {
        let base = Url::parse(endpoint)
            .map_err(|err| ApiError::InvalidRequest(format!("bad API endpoint: {err}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails when the configured endpoint is not a valid absolute URL.
    pub fn from_config(config: &fv_core::VaultConfig) -> ApiResult<Self> {
        Self::new(&config.api_endpoint)
    }

    /// Creates a client reusing an existing connection pool.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    fn request(&self, method: Method, path: &[&str], token: &str) -> ApiResult<RequestBuilder> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidRequest("API endpoint cannot be a base".into()))?;
            segments.pop_if_empty();
            for segment in path {
                segments.push(segment);
            }
        }
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Lists the files the caller may see.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success status.
    pub async fn list_files(&self, token: &str) -> ApiResult<Vec<FileEntry>> {
        let response = self
            .request(Method::GET, &["api", "files"], token)?
            .send()
            .await?;
        let body = check(response, "Failed to list files").await?;
        Ok(normalize::file_list(&body))
    }

    /// Requests a pre-signed upload grant.
    ///
    /// # Errors
    ///
    /// A 403 means the caller may not upload for the target user; a 404
    /// means the target user does not exist. Both carry fixed messages.
    pub async fn upload_grant(&self, token: &str, request: &UploadRequest) -> ApiResult<UploadGrant> {
        let response = self
            .request(Method::POST, &["api", "files", "upload-url"], token)?
            .json(request)
            .send()
            .await?;

        match response.status() {
            StatusCode::FORBIDDEN => Err(ApiError::status(
                403,
                "You are not authorized to upload for this user.",
            )),
            StatusCode::NOT_FOUND => Err(ApiError::status(404, "Target user not found.")),
            _ => {
                let body = check(response, "Failed to get upload URL").await?;
                serde_json::from_value(body)
                    .map_err(|err| ApiError::Malformed(err.to_string()))
            }
        }
    }

    /// Fetches a pre-signed download URL for a file.
    ///
    /// The backend addresses files by id; when only a storage key is
    /// known, its last path segment serves as the id.
    ///
    /// # Errors
    ///
    /// Fails when neither a file id nor a storage key is available, on
    /// transport errors, or when the response carries no URL.
    pub async fn download_url(
        &self,
        token: &str,
        key: &str,
        file_id: Option<&str>,
    ) -> ApiResult<String> {
        let id = file_id
            .map(str::to_string)
            .or_else(|| download_id_from_key(key))
            .ok_or_else(|| {
                ApiError::InvalidRequest("file key or file id is required for download".into())
            })?;

        let response = self
            .request(Method::GET, &["api", "files", &id, "download"], token)?
            .send()
            .await?;
        let body = check(response, "Failed to get download URL").await?;

        body.get("downloadUrl")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ApiError::Malformed("response carried no download URL".into()))
    }

    /// Deletes a file, returning the key the backend reports as deleted.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success status.
    pub async fn delete_file(
        &self,
        token: &str,
        key: &str,
        file_id: Option<&str>,
    ) -> ApiResult<String> {
        let id = file_id
            .map(str::to_string)
            .unwrap_or_else(|| delete_id_from_key(key));

        let response = self
            .request(Method::DELETE, &["api", "files", &id], token)?
            .send()
            .await?;
        let body = check(response, "Failed to delete file").await?;

        Ok(body
            .get("deleted")
            .and_then(Value::as_str)
            .unwrap_or(key)
            .to_string())
    }

    /// Lists all vault users (admin only).
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success status.
    pub async fn list_users(&self, token: &str) -> ApiResult<Vec<VaultUser>> {
        let response = self
            .request(Method::GET, &["api", "users"], token)?
            .send()
            .await?;
        let body = check(response, "Failed to list users").await?;
        Ok(normalize::user_list(&body))
    }

    /// Lists the viewers delegated to the calling editor.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success status.
    pub async fn list_delegated_users(&self, token: &str) -> ApiResult<Vec<VaultUser>> {
        let response = self
            .request(Method::GET, &["api", "users", "delegated"], token)?
            .send()
            .await?;
        let body = check(response, "Failed to list delegated users").await?;
        Ok(normalize::user_list(&body))
    }

    /// Updates a user's full name.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success status.
    pub async fn update_user(
        &self,
        token: &str,
        user_id: &str,
        full_name: &str,
    ) -> ApiResult<Option<VaultUser>> {
        validate_user_id(user_id)?;
        let response = self
            .request(Method::PATCH, &["api", "users", user_id], token)?
            .json(&serde_json::json!({ "fullName": full_name }))
            .send()
            .await?;
        let body = check(response, "Failed to update user").await?;
        Ok(body.get("user").and_then(normalize::user))
    }

    /// Assigns a role to a user (admin only).
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success status.
    pub async fn update_user_role(
        &self,
        token: &str,
        user_id: &str,
        role: Role,
    ) -> ApiResult<Option<VaultUser>> {
        validate_user_id(user_id)?;
        let response = self
            .request(Method::PATCH, &["api", "users", user_id, "role"], token)?
            .json(&serde_json::json!({ "role": role.as_str() }))
            .send()
            .await?;
        let body = check(response, "Failed to update user role").await?;
        Ok(body.get("user").and_then(normalize::user))
    }

    /// Links a viewer to an editor, or unlinks with `None` (admin only).
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success status.
    pub async fn delegate_user(
        &self,
        token: &str,
        user_id: &str,
        editor_id: Option<&str>,
    ) -> ApiResult<Option<VaultUser>> {
        validate_user_id(user_id)?;
        let response = self
            .request(Method::PATCH, &["api", "users", user_id, "delegate"], token)?
            .json(&serde_json::json!({ "editorId": editor_id }))
            .send()
            .await?;
        let body = check(response, "Failed to delegate user").await?;
        Ok(body.get("user").and_then(normalize::user))
    }
}

fn validate_user_id(user_id: &str) -> ApiResult<()> {
    if user_id.is_empty() || user_id == "unknown-id" {
        return Err(ApiError::InvalidRequest(format!(
            "invalid user id {user_id:?}: must be a subject claim or email address"
        )));
    }
    Ok(())
}

/// Download ids address the object by file name: the last path segment of
/// the storage key.
fn download_id_from_key(key: &str) -> Option<String> {
    let name = key.rsplit('/').next()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Delete ids address the object by its upload uuid: the second segment of
/// an `uploads/{uuid}/{name}` key, falling back to the first segment after
/// stripping the `uploads/` prefix.
fn delete_id_from_key(key: &str) -> String {
    let mut parts = key.split('/');
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        Some(second) if !second.is_empty() => second.to_string(),
        _ => first.trim_start_matches("uploads/").to_string(),
    }
}

/// Checks the status and decodes the JSON body.
///
/// Non-success statuses surface the backend's `message` field when the
/// body carries one, otherwise `fallback`. Success with a non-JSON body is
/// malformed.
async fn check(response: Response, fallback: &str) -> ApiResult<Value> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|err| ApiError::Malformed(err.to_string()));
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map_or_else(|| fallback.to_string(), str::to_string);

    tracing::debug!(status = status.as_u16(), %message, "API request rejected");
    Err(ApiError::status(status.as_u16(), message))
}
