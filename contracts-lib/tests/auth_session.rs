//! Sign-in flows against the in-memory identity provider.

use std::sync::Arc;

use contracts_lib::auth::AuthSession;
use contracts_lib::auth::AuthStep;
use contracts_lib::auth::InMemoryIdentityProvider;
use contracts_lib::auth::TokenProvider;
use contracts_lib::config::PasswordPolicy;
use contracts_lib::error::AuthError;
use contracts_lib::error::PasswordViolation;

fn provider() -> InMemoryIdentityProvider {
    InMemoryIdentityProvider::new()
        .with_user("laura.mendez@erp.test", "Segura123!")
        .with_temporary_user("carlos@erp.test", "Temporal1!")
        .with_challenged_user("mfa@erp.test", "Segura123!", "CONFIRM_SIGN_IN_WITH_TOTP_CODE")
}

#[tokio::test]
async fn first_login_forces_password_change() {
    let mut session = AuthSession::new(provider());
    assert!(!session.restore().await);

    let step = session.login("carlos@erp.test", "Temporal1!").await.unwrap();
    assert_eq!(step, AuthStep::NewPasswordRequired);
    assert!(!session.is_authenticated());

    let err = session.change_password("abcdefgh", "abcdefgh").await.unwrap_err();
    assert!(matches!(
        err,
        AuthError::WeakPassword(PasswordViolation::MissingUppercase)
    ));
    assert_eq!(
        err.user_message(),
        "La contraseña debe contener al menos una mayúscula"
    );

    let step = session.change_password("Nueva123$", "Nueva123$").await.unwrap();
    assert_eq!(step, AuthStep::Authenticated);
    assert_eq!(session.profile().initials, "CA");
    assert_eq!(session.profile().name, "carlos");

    // The new password is now the one that works.
    session.logout().await.unwrap();
    assert!(session.login("carlos@erp.test", "Temporal1!").await.is_err());
    let step = session.login("carlos@erp.test", "Nueva123$").await.unwrap();
    assert_eq!(step, AuthStep::Authenticated);
}

#[tokio::test]
async fn relaxed_policy_accepts_simple_password() {
    let policy = PasswordPolicy::length_only(8).with_special(false);
    let mut session = AuthSession::new(provider()).with_policy(policy);
    session.login("carlos@erp.test", "Temporal1!").await.unwrap();
    let step = session.change_password("abcdefgh", "abcdefgh").await.unwrap();
    assert_eq!(step, AuthStep::Authenticated);
}

#[tokio::test]
async fn unsupported_step_stays_on_login() {
    let mut session = AuthSession::new(provider());
    let step = session.login("mfa@erp.test", "Segura123!").await.unwrap();
    assert_eq!(step, AuthStep::Login);
    assert!(session.user().is_none());
}

#[tokio::test]
async fn provider_errors_have_friendly_messages() {
    let mut session = AuthSession::new(provider());
    let err = session.login("nadie@erp.test", "x").await.unwrap_err();
    assert_eq!(err.user_message(), "Usuario no encontrado");

    let err = session.login("  ", "x").await.unwrap_err();
    assert_eq!(err.user_message(), "Por favor completa todos los campos");
}

#[tokio::test]
async fn session_tokens_follow_sign_in_state() {
    let provider = Arc::new(provider());
    let mut session = AuthSession::from_arc(Arc::clone(&provider));
    let tokens = session.token_provider();
    assert!(tokens.get_token().await.unwrap().is_none());

    session.login("laura.mendez@erp.test", "Segura123!").await.unwrap();
    let token = tokens.get_token().await.unwrap().unwrap();
    assert!(token.as_bearer().starts_with("Bearer token-"));
    assert_eq!(session.profile().initials, "LM");

    session.logout().await.unwrap();
    assert!(tokens.get_token().await.unwrap().is_none());
    assert!(session.access_token().await.is_none());
}
