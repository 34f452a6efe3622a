//! Registration, verification, and password-reset flows end to end.

use fv_auth::{AuthError, ProviderError, SignInOutcome, SignInStep};
use fv_session::SessionPhase;
use fv_token::Role;

use crate::common::{mint_token, new_manager, settle, ScriptedProvider};

#[tokio::test(start_paused = true)]
async fn register_confirm_then_login() {
    let provider = ScriptedProvider::signed_out();
    let (manager, _) = new_manager(provider.clone());

    manager
        .register("Bob Builder", "bob@example.com", "s3cret-Pass!")
        .await
        .unwrap();
    manager
        .confirm_sign_up("bob@example.com", "123456")
        .await
        .unwrap();

    // The provider now has a session to hand back after sign-in.
    *provider.token.lock() = Some(mint_token(
        "sub-bob",
        "bob@example.com",
        Some("Bob Builder"),
        &["Editors"],
    ));
    manager.login("bob@example.com", "s3cret-Pass!").await.unwrap();
    settle().await;

    let user = manager.current_user().unwrap();
    assert_eq!(user.role, Role::Editor);
    assert!(user.role.can_manage_files());
    assert_eq!(manager.phase(), SessionPhase::Active);
}

#[tokio::test(start_paused = true)]
async fn unverified_sign_in_reports_the_identifier() {
    // Reported as a structured error.
    let provider = ScriptedProvider::signed_out();
    *provider.sign_in.lock() = Some(Err(ProviderError::with_code(
        "UserNotConfirmedException",
        "User is not confirmed.",
    )));
    let (manager, _) = new_manager(provider);

    let err = manager.login("eve@example.com", "pw").await.unwrap_err();
    assert_eq!(err.identifier(), Some("eve@example.com"));
    assert!(err.to_string().contains("needs to be verified"));

    // Reported as a confirmation next-step instead of an error.
    let provider = ScriptedProvider::signed_out();
    *provider.sign_in.lock() = Some(Ok(SignInOutcome::with_step(SignInStep::ConfirmSignUp)));
    let (manager, _) = new_manager(provider);

    let err = manager.login("eve@example.com", "pw").await.unwrap_err();
    assert_eq!(err.identifier(), Some("eve@example.com"));
}

#[tokio::test(start_paused = true)]
async fn duplicate_registration_is_classified() {
    let provider = ScriptedProvider::signed_out();
    *provider.sign_up.lock() = Some(Err(ProviderError::with_code(
        "UsernameExistsException",
        "An account with the given email already exists.",
    )));
    let (manager, _) = new_manager(provider);

    let err = manager
        .register("Bob", "bob@example.com", "pw")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::AccountAlreadyExists);
}

#[tokio::test(start_paused = true)]
async fn password_reset_flow_classifies_each_step() {
    let provider = ScriptedProvider::signed_out();
    let (manager, _) = new_manager(provider.clone());

    manager.forgot_password("bob@example.com").await.unwrap();

    // Wrong code first.
    *provider.reset_confirm.lock() = Some(Err(ProviderError::with_code(
        "CodeMismatchException",
        "Invalid verification code provided",
    )));
    let err = manager
        .reset_password("bob@example.com", "000000", "N3w-Passw0rd!")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidCode);

    // Then a policy-violating password.
    *provider.reset_confirm.lock() = Some(Err(ProviderError::with_code(
        "InvalidPasswordException",
        "Password did not conform with policy",
    )));
    let err = manager
        .reset_password("bob@example.com", "123456", "short")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::WeakSecret);

    // Then success.
    *provider.reset_confirm.lock() = Some(Ok(()));
    manager
        .reset_password("bob@example.com", "123456", "N3w-Passw0rd!")
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn resend_rate_limit_is_classified() {
    let provider = ScriptedProvider::signed_out();
    *provider.resend_code.lock() = Some(Err(ProviderError::with_code(
        "LimitExceededException",
        "Attempt limit exceeded, please try after some time.",
    )));
    let (manager, _) = new_manager(provider);

    let err = manager
        .resend_verification_code("bob@example.com")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::RateLimited);
    assert_eq!(err.to_string(), "Too many attempts. Please try again later.");
}

#[tokio::test(start_paused = true)]
async fn failed_login_leaves_no_session() {
    let provider = ScriptedProvider::signed_out();
    *provider.sign_in.lock() = Some(Err(ProviderError::with_code(
        "NotAuthorizedException",
        "Incorrect username or password.",
    )));
    let (manager, _) = new_manager(provider);

    let err = manager.login("bob@example.com", "wrong").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(
        err.to_string(),
        "Incorrect email or password. Please try again."
    );
    assert_eq!(manager.phase(), SessionPhase::Unauthenticated);
    assert!(manager.current_user().is_none());
}
