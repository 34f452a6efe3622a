//! Common test utilities and fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use parking_lot::Mutex;

use fv_auth::{
    IdentityProvider, ProviderError, ProviderResult, ProviderSession, SignInOutcome,
    SignUpAttributes,
};
use fv_session::{SessionConfig, SessionManager, SessionNotice, SessionNotifier};

/// Initializes tracing once for the test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fv_session=trace,fv_auth=debug")
        .with_test_writer()
        .try_init();
}

/// Mints an unsigned identity token with the given claims.
pub fn mint_token(sub: &str, email: &str, name: Option<&str>, groups: &[&str]) -> String {
    let mut payload = serde_json::json!({
        "sub": sub,
        "email": email,
        "cognito:groups": groups,
    });
    if let Some(name) = name {
        payload["name"] = serde_json::json!(name);
    }
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
    format!("{header}.{body}.sig")
}

/// Scripted identity provider covering the whole provider surface.
///
/// Each operation's result can be scripted per test; unscripted
/// operations succeed. `current_session` answers with the stored token,
/// which `sign_out` clears.
#[derive(Default)]
pub struct ScriptedProvider {
    pub token: Mutex<Option<String>>,
    pub sign_in: Mutex<Option<ProviderResult<SignInOutcome>>>,
    pub sign_up: Mutex<Option<ProviderResult<()>>>,
    pub confirm_sign_up: Mutex<Option<ProviderResult<()>>>,
    pub resend_code: Mutex<Option<ProviderResult<()>>>,
    pub reset_request: Mutex<Option<ProviderResult<()>>>,
    pub reset_confirm: Mutex<Option<ProviderResult<()>>>,
    pub sign_out_error: Mutex<Option<ProviderError>>,
    pub sign_out_calls: AtomicUsize,
}

impl ScriptedProvider {
    /// A provider with an established session for the given token.
    pub fn signed_in(token: String) -> Arc<Self> {
        let provider = Self::default();
        *provider.token.lock() = Some(token);
        Arc::new(provider)
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sign_out_count(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn sign_in(&self, _identifier: &str, _secret: &str) -> ProviderResult<SignInOutcome> {
        self.sign_in
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(SignInOutcome::done()))
    }

    async fn sign_up(
        &self,
        _identifier: &str,
        _secret: &str,
        _attributes: &SignUpAttributes,
    ) -> ProviderResult<()> {
        self.sign_up.lock().clone().unwrap_or(Ok(()))
    }

    async fn confirm_sign_up(&self, _identifier: &str, _code: &str) -> ProviderResult<()> {
        self.confirm_sign_up.lock().clone().unwrap_or(Ok(()))
    }

    async fn resend_confirmation_code(&self, _identifier: &str) -> ProviderResult<()> {
        self.resend_code.lock().clone().unwrap_or(Ok(()))
    }

    async fn request_password_reset(&self, _identifier: &str) -> ProviderResult<()> {
        self.reset_request.lock().clone().unwrap_or(Ok(()))
    }

    async fn confirm_password_reset(
        &self,
        _identifier: &str,
        _code: &str,
        _new_secret: &str,
    ) -> ProviderResult<()> {
        self.reset_confirm.lock().clone().unwrap_or(Ok(()))
    }

    async fn current_session(&self) -> ProviderResult<ProviderSession> {
        self.token
            .lock()
            .clone()
            .map(|id_token| ProviderSession { id_token })
            .ok_or_else(|| ProviderError::from_message("no current session"))
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        match self.sign_out_error.lock().clone() {
            Some(err) => Err(err),
            None => {
                *self.token.lock() = None;
                Ok(())
            }
        }
    }

    async fn update_user_attribute(&self, _name: &str, _value: &str) -> ProviderResult<()> {
        Ok(())
    }
}

/// Notifier that records every notice it sees.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<SessionNotice>>,
    pub permission_requests: AtomicUsize,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<SessionNotice> {
        self.notices.lock().clone()
    }
}

impl SessionNotifier for RecordingNotifier {
    fn request_permission(&self) {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
    }

    fn notify(&self, notice: &SessionNotice) {
        self.notices.lock().push(notice.clone());
    }
}

/// Builds a manager with default timings around the given provider.
pub fn new_manager(provider: Arc<ScriptedProvider>) -> (SessionManager, Arc<RecordingNotifier>) {
    init_tracing();
    let notifier = Arc::new(RecordingNotifier::default());
    let manager = SessionManager::new(provider, notifier.clone(), SessionConfig::default());
    (manager, notifier)
}

/// Lets spawned timer tasks reach their next await point without
/// advancing the paused clock.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Advances the paused clock and settles.
pub async fn advance(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}
