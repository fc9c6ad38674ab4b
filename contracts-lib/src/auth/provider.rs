//! Identity provider seam

use std::sync::Arc;

use async_trait::async_trait;

use super::AccessToken;
use super::TokenProvider;
use crate::error::AuthError;

/// The signed-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    /// Login id used to sign in; empty if the provider doesn't report it.
    pub email: String,
    pub user_id: String,
}

/// What a sign-in attempt asks for next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn,
    /// The account has a temporary password that must be replaced.
    NewPasswordRequired,
    /// A step this application doesn't handle (MFA, custom challenges).
    Other(String),
}

/// A hosted user directory that signs users in and issues tokens.
///
/// Failures are reported as [`AuthError`]; implementations map their own
/// error names with [`AuthError::from_provider`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome, AuthError>;

    /// Answers a pending new-password challenge.
    async fn confirm_new_password(&self, new_password: &str) -> Result<SignInOutcome, AuthError>;

    /// Returns the signed-in user, or `None` without an active session.
    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Returns the current session's access token.
    async fn access_token(&self) -> Result<Option<AccessToken>, AuthError>;
}

/// Adapts an identity provider into a [`TokenProvider`] for the API client.
pub struct IdentityTokenProvider<P> {
    provider: Arc<P>,
}

impl<P> IdentityTokenProvider<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P> Clone for IdentityTokenProvider<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

#[async_trait]
impl<P: IdentityProvider> TokenProvider for IdentityTokenProvider<P> {
    async fn get_token(&self) -> Result<Option<AccessToken>, AuthError> {
        self.provider.access_token().await
    }
}
