//! Full inactivity-lifecycle scenarios against a scripted provider.

use std::time::Duration;

use fv_session::{ActivityKind, SessionNotice, SessionPhase};
use fv_token::Role;

use crate::common::{advance, mint_token, new_manager, settle, ScriptedProvider};

#[tokio::test(start_paused = true)]
async fn restore_decodes_token_and_arms_session() {
    let provider = ScriptedProvider::signed_in(mint_token(
        "sub-admin",
        "admin@example.com",
        Some("Ada Admin"),
        &["Admins", "Editors"],
    ));
    let (manager, notifier) = new_manager(provider);

    manager.restore().await;
    settle().await;

    let user = manager.current_user().unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.display_name, "Ada Admin");
    assert_eq!(manager.phase(), SessionPhase::Active);
    assert_eq!(
        notifier
            .permission_requests
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn idle_session_warns_then_auto_logs_out() {
    let provider = ScriptedProvider::signed_in(mint_token("sub-1", "user@example.com", None, &[]));
    let (manager, notifier) = new_manager(provider.clone());
    manager.restore().await;
    settle().await;

    // Four minutes idle: the five-minute session enters its warning.
    advance(Duration::from_secs(240)).await;
    let snapshot = manager.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Warning);
    assert_eq!(snapshot.warning_seconds_remaining, 60);

    // The countdown runs out and the session ends, with both notices in
    // order and exactly one provider sign-out.
    advance(Duration::from_secs(61)).await;
    assert_eq!(manager.phase(), SessionPhase::Unauthenticated);
    assert!(manager.current_user().is_none());
    assert_eq!(provider.sign_out_count(), 1);
    assert_eq!(
        notifier.notices(),
        vec![
            SessionNotice::InactivityWarning {
                seconds_remaining: 60
            },
            SessionNotice::SessionEnded,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn staying_logged_in_restarts_the_full_window() {
    let provider = ScriptedProvider::signed_in(mint_token("sub-1", "user@example.com", None, &[]));
    let (manager, notifier) = new_manager(provider.clone());
    manager.restore().await;
    settle().await;

    advance(Duration::from_secs(240)).await;
    advance(Duration::from_secs(30)).await;
    assert_eq!(manager.snapshot().warning_seconds_remaining, 30);

    manager.acknowledge_warning();
    settle().await;
    assert_eq!(manager.phase(), SessionPhase::Active);

    // The next warning comes a full four minutes later, not earlier.
    advance(Duration::from_secs(239)).await;
    assert_eq!(manager.phase(), SessionPhase::Active);
    advance(Duration::from_secs(1)).await;
    assert_eq!(manager.phase(), SessionPhase::Warning);

    assert_eq!(provider.sign_out_count(), 0);
    assert_eq!(notifier.notices().len(), 2); // two warnings, no ending
}

#[tokio::test(start_paused = true)]
async fn steady_activity_never_triggers_the_warning() {
    let provider = ScriptedProvider::signed_in(mint_token("sub-1", "user@example.com", None, &[]));
    let (manager, notifier) = new_manager(provider.clone());
    manager.restore().await;
    settle().await;

    // An hour of activity at two-minute intervals.
    for _ in 0..30 {
        advance(Duration::from_secs(120)).await;
        manager.record_activity(ActivityKind::KeyPress);
        settle().await;
    }

    assert_eq!(manager.phase(), SessionPhase::Active);
    assert!(notifier.notices().is_empty());
    assert_eq!(provider.sign_out_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn warning_notice_renders_remaining_minutes() {
    let notice = SessionNotice::InactivityWarning {
        seconds_remaining: 60,
    };
    assert_eq!(notice.title(), "FileVault Session Warning");
    assert_eq!(
        notice.body(),
        "You will be logged out in 1 minute due to inactivity."
    );

    let ended = SessionNotice::SessionEnded;
    assert_eq!(ended.title(), "FileVault Session Ended");
    assert_eq!(
        ended.body(),
        "You have been automatically logged out due to inactivity."
    );
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_the_countdown_progress() {
    let provider = ScriptedProvider::signed_in(mint_token("sub-1", "user@example.com", None, &[]));
    let (manager, _notifier) = new_manager(provider);
    manager.restore().await;
    settle().await;

    let mut rx = manager.subscribe();
    advance(Duration::from_secs(240)).await;
    assert_eq!(rx.borrow_and_update().warning_seconds_remaining, 60);

    advance(Duration::from_secs(1)).await;
    assert_eq!(rx.borrow_and_update().warning_seconds_remaining, 59);

    advance(Duration::from_secs(10)).await;
    assert_eq!(rx.borrow_and_update().warning_seconds_remaining, 49);
}

#[tokio::test(start_paused = true)]
async fn explicit_logout_cancels_all_timers() {
    let provider = ScriptedProvider::signed_in(mint_token("sub-1", "user@example.com", None, &[]));
    let (manager, notifier) = new_manager(provider.clone());
    manager.restore().await;
    settle().await;

    advance(Duration::from_secs(240)).await;
    assert_eq!(manager.phase(), SessionPhase::Warning);

    manager.logout().await.unwrap();
    assert_eq!(manager.phase(), SessionPhase::Unauthenticated);

    // Nothing fires afterwards: no auto-logout, no further notices.
    advance(Duration::from_secs(600)).await;
    assert_eq!(provider.sign_out_count(), 1);
    assert_eq!(notifier.notices().len(), 1); // only the warning
}
