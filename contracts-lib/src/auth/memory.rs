//! In-memory identity provider for tests and demos

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AccessToken;
use super::AuthUser;
use super::IdentityProvider;
use super::SignInOutcome;
use crate::error::AuthError;

#[derive(Debug, Clone)]
struct Account {
    user_id: String,
    password: String,
    /// Set for accounts created with a temporary password.
    must_change_password: bool,
    /// Unsupported challenge returned after the password is accepted.
    extra_step: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    signed_in: Option<String>,
    pending: Option<String>,
}

/// Identity provider backed by a map of accounts.
///
/// Errors use the same names a hosted user pool reports, so they map to the
/// same [`AuthError`] variants.
///
/// # Example
///
/// ```
/// use contracts_lib::auth::InMemoryIdentityProvider;
///
/// let provider = InMemoryIdentityProvider::new()
///     .with_user("ana@erp.com", "Secret123!")
///     .with_temporary_user("nuevo@erp.com", "Temp123!");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    state: RwLock<State>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_account(self, email: &str, account: Account) -> Self {
        let mut state = self.state.into_inner();
        state.accounts.insert(email.to_string(), account);
        Self {
            state: RwLock::new(state),
        }
    }

    /// Adds a confirmed account.
    pub fn with_user(self, email: &str, password: &str) -> Self {
        let user_id = format!("user-{}", email.split('@').next().unwrap_or(email));
        self.with_account(
            email,
            Account {
                user_id,
                password: password.to_string(),
                must_change_password: false,
                extra_step: None,
            },
        )
    }

    /// Adds an account whose password must be replaced on first sign-in.
    pub fn with_temporary_user(self, email: &str, password: &str) -> Self {
        let user_id = format!("user-{}", email.split('@').next().unwrap_or(email));
        self.with_account(
            email,
            Account {
                user_id,
                password: password.to_string(),
                must_change_password: true,
                extra_step: None,
            },
        )
    }

    /// Adds an account that answers sign-in with an unsupported `step`.
    pub fn with_challenged_user(self, email: &str, password: &str, step: &str) -> Self {
        let user_id = format!("user-{}", email.split('@').next().unwrap_or(email));
        self.with_account(
            email,
            Account {
                user_id,
                password: password.to_string(),
                must_change_password: false,
                extra_step: Some(step.to_string()),
            },
        )
    }

    /// Starts with `email` already signed in, as after a page reload.
    pub async fn sign_in_as(&self, email: &str) {
        self.state.write().await.signed_in = Some(email.to_string());
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome, AuthError> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get(email)
            .ok_or_else(|| {
                AuthError::from_provider("UserNotFoundException", "User does not exist.")
            })?;
        if account.password != password {
            return Err(AuthError::from_provider(
                "NotAuthorizedException",
                "Incorrect username or password.",
            ));
        }
        let must_change_password = account.must_change_password;
        let extra_step = account.extra_step.clone();

        if must_change_password {
            state.pending = Some(email.to_string());
            return Ok(SignInOutcome::NewPasswordRequired);
        }
        if let Some(step) = extra_step {
            return Ok(SignInOutcome::Other(step));
        }
        state.signed_in = Some(email.to_string());
        Ok(SignInOutcome::SignedIn)
    }

    async fn confirm_new_password(&self, new_password: &str) -> Result<SignInOutcome, AuthError> {
        let mut state = self.state.write().await;
        let email = state.pending.take().ok_or(AuthError::NoPendingChallenge)?;
        let account = state
            .accounts
            .get_mut(&email)
            .ok_or_else(|| {
                AuthError::from_provider("UserNotFoundException", "User does not exist.")
            })?;
        account.password = new_password.to_string();
        account.must_change_password = false;
        state.signed_in = Some(email);
        Ok(SignInOutcome::SignedIn)
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
        let state = self.state.read().await;
        let Some(email) = &state.signed_in else {
            return Ok(None);
        };
        Ok(state.accounts.get(email).map(|account| AuthUser {
            username: account.user_id.clone(),
            email: email.clone(),
            user_id: account.user_id.clone(),
        }))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut state = self.state.write().await;
        state.signed_in = None;
        state.pending = None;
        Ok(())
    }

    async fn access_token(&self) -> Result<Option<AccessToken>, AuthError> {
        let state = self.state.read().await;
        Ok(state
            .signed_in
            .as_ref()
            .and_then(|email| state.accounts.get(email))
            .map(|account| AccessToken::new(format!("token-{}", account.user_id))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_and_token() {
        let provider = InMemoryIdentityProvider::new().with_user("ana@erp.com", "pw");
        assert_eq!(provider.sign_in("ana@erp.com", "pw").await.unwrap(), SignInOutcome::SignedIn);
        let token = provider.access_token().await.unwrap().unwrap();
        assert_eq!(token.access_token, "token-user-ana");
        provider.sign_out().await.unwrap();
        assert!(provider.access_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_errors() {
        let provider = InMemoryIdentityProvider::new().with_user("ana@erp.com", "pw");
        assert!(matches!(
            provider.sign_in("nobody@erp.com", "pw").await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            provider.sign_in("ana@erp.com", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            provider.confirm_new_password("x").await,
            Err(AuthError::NoPendingChallenge)
        ));
    }
}
