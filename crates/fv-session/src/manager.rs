//! The session lifecycle manager.
//!
//! All state transitions happen synchronously under the session lock; the
//! only suspension points are the awaited identity-provider calls, and
//! timers are cancelled before and re-armed after those await boundaries so
//! no timer callback ever mutates the user record concurrently with an
//! in-flight login or logout.
//!
//! Cancellation uses two layers: scheduled tasks are aborted, and every
//! arm/cancel bumps an epoch counter that each task validates under the
//! lock before acting. The epoch makes a task that was already past its
//! sleep when cancelled a guaranteed no-op, so cancel-before-rearm is
//! atomic relative to concurrent task wakeups.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use fv_auth::classify;
use fv_auth::{AuthError, AuthResult, IdentityProvider, SignUpAttributes};
use fv_token::decode_claims;

use crate::activity::ActivityKind;
use crate::notify::{NoopNotifier, SessionNotice, SessionNotifier};
use crate::session::{SessionConfig, SessionPhase, SessionSnapshot, SessionUser};

/// Mutable session state, guarded by the manager's lock.
struct SessionData {
    user: Option<SessionUser>,
    phase: SessionPhase,
    loading: bool,
    warning_remaining: u32,
    /// Bumped on every timer cancel; scheduled tasks validate it before
    /// acting, so a stale timer can never advance a newer session's state.
    epoch: u64,
    warning_timer: Option<JoinHandle<()>>,
    logout_timer: Option<JoinHandle<()>>,
    countdown: Option<JoinHandle<()>>,
}

impl SessionData {
    fn new(warning_seconds: u32) -> Self {
        Self {
            user: None,
            phase: SessionPhase::Unauthenticated,
            loading: true,
            warning_remaining: warning_seconds,
            epoch: 0,
            warning_timer: None,
            logout_timer: None,
            countdown: None,
        }
    }

    fn pending_timers(&self) -> usize {
        usize::from(self.warning_timer.is_some())
            + usize::from(self.logout_timer.is_some())
            + usize::from(self.countdown.is_some())
    }
}

/// Shared core behind the manager handle.
struct Inner {
    provider: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn SessionNotifier>,
    config: SessionConfig,
    state: Mutex<SessionData>,
    watch_tx: watch::Sender<SessionSnapshot>,
}

impl Inner {
    /// Publishes the current state to subscribers.
    fn publish(&self, data: &SessionData) {
        self.watch_tx.send_replace(SessionSnapshot {
            user: data.user.clone(),
            loading: data.loading,
            phase: data.phase,
            warning_seconds_remaining: data.warning_remaining,
        });
    }

    /// Cancels all scheduled timers as a single step.
    ///
    /// Bumping the epoch first means a task that already woke and is
    /// waiting on the lock finds itself stale and returns without acting.
    fn cancel_timers(data: &mut SessionData) {
        data.epoch = data.epoch.wrapping_add(1);
        for handle in [
            data.warning_timer.take(),
            data.logout_timer.take(),
            data.countdown.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
    }
}

/// Cancels and re-arms the warning and logout timers. Must be called with
/// an authenticated user in `data`.
fn arm_timers(inner: &Arc<Inner>, data: &mut SessionData) {
    Inner::cancel_timers(data);
    let epoch = data.epoch;

    let warning_delay = inner.config.warning_delay();
    let weak = Arc::downgrade(inner);
    data.warning_timer = Some(tokio::spawn(async move {
        tokio::time::sleep(warning_delay).await;
        if let Some(inner) = weak.upgrade() {
            enter_warning(&inner, epoch);
        }
    }));

    let logout_delay = inner.config.inactivity_timeout;
    let weak = Arc::downgrade(inner);
    data.logout_timer = Some(tokio::spawn(async move {
        tokio::time::sleep(logout_delay).await;
        let Some(inner) = weak.upgrade() else { return };
        {
            let mut data = inner.state.lock();
            if data.epoch != epoch {
                return;
            }
            // Fired: drop our own handle so the cancel pass inside
            // auto-logout cannot abort this task mid-sign-out.
            data.logout_timer = None;
        }
        auto_logout(&inner, epoch).await;
    }));
}

/// Transition `Active -> Warning`: start the countdown and notify.
fn enter_warning(inner: &Arc<Inner>, epoch: u64) {
    let seconds = {
        let mut data = inner.state.lock();
        if data.epoch != epoch || data.phase != SessionPhase::Active {
            return;
        }
        data.warning_timer = None;
        data.phase = SessionPhase::Warning;
        data.warning_remaining = inner.config.warning_seconds();

        let weak = Arc::downgrade(inner);
        data.countdown = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            // The first tick of an interval completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else { return };
                if !countdown_tick(&inner, epoch).await {
                    return;
                }
            }
        }));

        tracing::info!(
            seconds_remaining = data.warning_remaining,
            "inactivity warning"
        );
        inner.publish(&data);
        data.warning_remaining
    };

    inner.notifier.notify(&SessionNotice::InactivityWarning {
        seconds_remaining: seconds,
    });
}

/// One countdown tick. Returns false when the countdown should stop.
async fn countdown_tick(inner: &Arc<Inner>, epoch: u64) -> bool {
    {
        let mut data = inner.state.lock();
        if data.epoch != epoch || data.phase != SessionPhase::Warning {
            return false;
        }
        if data.warning_remaining > 1 {
            data.warning_remaining -= 1;
            inner.publish(&data);
            return true;
        }
        data.warning_remaining = 0;
        data.countdown = None;
        inner.publish(&data);
    }
    // Countdown exhausted: funnel into the shared, epoch-guarded
    // auto-logout so sign-out happens exactly once even though the hard
    // deadline timer targets the same instant.
    auto_logout(inner, epoch).await;
    false
}

/// Automatic logout on inactivity. Local state is torn down first; the
/// provider sign-out afterwards is best-effort and never retried.
async fn auto_logout(inner: &Arc<Inner>, epoch: u64) {
    {
        let mut data = inner.state.lock();
        if data.epoch != epoch || !data.phase.is_authenticated() {
            return;
        }
        Inner::cancel_timers(&mut data);
        data.user = None;
        data.phase = SessionPhase::Unauthenticated;
        data.warning_remaining = 0;
        tracing::info!("session ended due to inactivity");
        inner.publish(&data);
    }

    if let Err(err) = inner.provider.sign_out().await {
        tracing::warn!(%err, "provider sign-out failed during automatic logout");
    }
    inner.notifier.notify(&SessionNotice::SessionEnded);
}

/// Owns the session state machine and the inactivity timers.
///
/// Cheap to clone (a shared handle); the hosting application constructs one
/// at startup and threads it to whatever needs session state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    /// Creates a manager with explicit collaborators.
    #[must_use]
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn SessionNotifier>,
        config: SessionConfig,
    ) -> Self {
        let (watch_tx, _) = watch::channel(SessionSnapshot::initial(config.warning_seconds()));
        Self {
            inner: Arc::new(Inner {
                provider,
                notifier,
                config,
                state: Mutex::new(SessionData::new(config.warning_seconds())),
                watch_tx,
            }),
        }
    }

    /// Creates a manager with default timings and no notifier.
    #[must_use]
    pub fn with_defaults(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::new(provider, Arc::new(NoopNotifier), SessionConfig::default())
    }

    /// Subscribes to session state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.watch_tx.subscribe()
    }

    /// Returns the current session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.watch_tx.borrow().clone()
    }

    /// Returns the authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.inner.state.lock().user.clone()
    }

    /// Returns the current state-machine phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.inner.state.lock().phase
    }

    /// Attempts a silent restore from an existing provider session.
    ///
    /// Best-effort: any failure leaves the session unauthenticated with
    /// `loading` cleared, and surfaces nothing to the caller. Also requests
    /// notification permission, which is equally best-effort.
    pub async fn restore(&self) {
        self.inner.notifier.request_permission();

        if let Err(err) = self.populate_from_provider().await {
            tracing::debug!(%err, "no existing session restored");
            let mut data = self.inner.state.lock();
            Inner::cancel_timers(&mut data);
            data.user = None;
            data.phase = SessionPhase::Unauthenticated;
            data.loading = false;
            self.inner.publish(&data);
        }
    }

    /// Signs in with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns a classified [`AuthError`]. An unverified account, whether
    /// reported as an error or as a confirmation next-step, raises
    /// [`AuthError::AccountUnverified`] carrying the submitted email.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<()> {
        let outcome = self
            .inner
            .provider
            .sign_in(email, password)
            .await
            .map_err(|err| classify::classify_sign_in(&err, email))?;

        if outcome.next_step.requires_confirmation() {
            return Err(AuthError::AccountUnverified {
                identifier: email.to_string(),
            });
        }

        self.populate_from_provider().await
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns a classified [`AuthError`] on provider rejection.
    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> AuthResult<()> {
        let attributes = SignUpAttributes::new(email, full_name);
        self.inner
            .provider
            .sign_up(email, password, &attributes)
            .await
            .map_err(|err| classify::classify_sign_up(&err))
    }

    /// Confirms a registration with the emailed code.
    ///
    /// # Errors
    ///
    /// Returns a classified [`AuthError`] on code mismatch or expiry.
    pub async fn confirm_sign_up(&self, email: &str, code: &str) -> AuthResult<()> {
        self.inner
            .provider
            .confirm_sign_up(email, code)
            .await
            .map_err(|err| classify::classify_confirmation(&err))
    }

    /// Re-sends the registration confirmation code.
    ///
    /// # Errors
    ///
    /// Returns a classified [`AuthError`] on provider rejection.
    pub async fn resend_verification_code(&self, email: &str) -> AuthResult<()> {
        self.inner
            .provider
            .resend_confirmation_code(email)
            .await
            .map_err(|err| classify::classify_resend(&err))
    }

    /// Starts a password reset (sends a reset code).
    ///
    /// # Errors
    ///
    /// Returns a classified [`AuthError`] on provider rejection.
    pub async fn forgot_password(&self, email: &str) -> AuthResult<()> {
        self.inner
            .provider
            .request_password_reset(email)
            .await
            .map_err(|err| classify::classify_reset_request(&err))
    }

    /// Completes a password reset with the emailed code.
    ///
    /// # Errors
    ///
    /// Returns a classified [`AuthError`] on code mismatch, expiry, or a
    /// policy-violating new password.
    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> AuthResult<()> {
        self.inner
            .provider
            .confirm_password_reset(email, code, new_password)
            .await
            .map_err(|err| classify::classify_reset_confirm(&err))
    }

    /// Updates the display name on the provider and locally.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unknown`] with the provider's message on
    /// failure; local state is untouched in that case.
    pub async fn update_profile(&self, full_name: &str) -> AuthResult<()> {
        self.inner
            .provider
            .update_user_attribute("name", full_name)
            .await
            .map_err(|err| {
                if err.message.is_empty() {
                    AuthError::unknown("Profile update failed")
                } else {
                    AuthError::unknown(err.message.clone())
                }
            })?;

        let mut data = self.inner.state.lock();
        if let Some(user) = data.user.as_mut() {
            user.display_name = full_name.to_string();
        }
        self.inner.publish(&data);
        Ok(())
    }

    /// Signs out explicitly.
    ///
    /// Timers are cancelled before the provider call so no timer fires
    /// across the await boundary. On provider failure the session stays
    /// live: the provider session was not invalidated, so the timers are
    /// re-armed and the error surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unknown`] with the provider's message.
    pub async fn logout(&self) -> AuthResult<()> {
        {
            let mut data = self.inner.state.lock();
            Inner::cancel_timers(&mut data);
        }

        match self.inner.provider.sign_out().await {
            Ok(()) => {
                let mut data = self.inner.state.lock();
                Inner::cancel_timers(&mut data);
                data.user = None;
                data.phase = SessionPhase::Unauthenticated;
                data.warning_remaining = 0;
                self.inner.publish(&data);
                Ok(())
            }
            Err(err) => {
                let mut data = self.inner.state.lock();
                if data.user.is_some() {
                    data.phase = SessionPhase::Active;
                    arm_timers(&self.inner, &mut data);
                    self.inner.publish(&data);
                }
                Err(if err.message.is_empty() {
                    AuthError::unknown("Logout failed")
                } else {
                    AuthError::unknown(err.message.clone())
                })
            }
        }
    }

    /// Immediate logout from the warning UI or countdown exhaustion.
    ///
    /// Local teardown happens first; the provider sign-out is best-effort
    /// (failures logged and ignored; the session is already torn down).
    pub async fn force_logout(&self) {
        let had_session = {
            let mut data = self.inner.state.lock();
            let had = data.user.is_some();
            Inner::cancel_timers(&mut data);
            data.user = None;
            data.phase = SessionPhase::Unauthenticated;
            data.warning_remaining = 0;
            self.inner.publish(&data);
            had
        };

        if let Err(err) = self.inner.provider.sign_out().await {
            tracing::warn!(%err, "provider sign-out failed during forced logout");
        }
        if had_session {
            self.inner.notifier.notify(&SessionNotice::SessionEnded);
        }
    }

    /// Records a qualifying user-interaction event.
    ///
    /// No-op while unauthenticated. Otherwise cancels and re-arms both
    /// inactivity timers and, from `Warning`, returns to `Active`.
    pub fn record_activity(&self, kind: ActivityKind) {
        tracing::trace!(?kind, "activity");
        self.reset_inactivity_timer();
    }

    /// "Stay logged in": acknowledges the warning and returns to `Active`.
    ///
    /// Equivalent to activity; idempotent.
    pub fn acknowledge_warning(&self) {
        self.reset_inactivity_timer();
    }

    /// Cancels and re-arms both inactivity timers from this instant.
    pub fn reset_inactivity_timer(&self) {
        let mut data = self.inner.state.lock();
        if data.user.is_none() {
            return;
        }
        let was_warning = data.phase == SessionPhase::Warning;
        data.phase = SessionPhase::Active;
        data.warning_remaining = self.inner.config.warning_seconds();
        arm_timers(&self.inner, &mut data);
        if was_warning {
            self.inner.publish(&data);
        }
    }

    /// Fetches the current provider session, decodes the identity token,
    /// and transitions to `Active` with timers armed.
    async fn populate_from_provider(&self) -> AuthResult<()> {
        let session = self
            .inner
            .provider
            .current_session()
            .await
            .map_err(|err| AuthError::unknown(err.message.clone()))?;

        let claims =
            decode_claims(&session.id_token).map_err(|err| AuthError::unknown(err.to_string()))?;
        let user = SessionUser::from_claims(&claims, session.id_token);

        let mut data = self.inner.state.lock();
        data.user = Some(user);
        data.phase = SessionPhase::Active;
        data.loading = false;
        data.warning_remaining = self.inner.config.warning_seconds();
        arm_timers(&self.inner, &mut data);
        self.inner.publish(&data);
        Ok(())
    }

    /// Number of outstanding scheduled timers (for tests).
    #[cfg(test)]
    fn pending_timers(&self) -> usize {
        self.inner.state.lock().pending_timers()
    }
}
