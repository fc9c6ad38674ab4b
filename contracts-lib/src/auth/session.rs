//! Sign-in state machine

use std::sync::Arc;

use log::debug;
use log::info;
use log::warn;

use super::AccessToken;
use super::AuthUser;
use super::IdentityProvider;
use super::IdentityTokenProvider;
use super::SignInOutcome;
use super::UserProfile;
use crate::config::PasswordPolicy;
use crate::error::AuthError;

/// Where the user is in the sign-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStep {
    #[default]
    Login,
    /// Signed in with a temporary password that must be replaced.
    NewPasswordRequired,
    Authenticated,
}

/// Authentication session over an [`IdentityProvider`].
///
/// Moves from [`AuthStep::Login`] to [`AuthStep::Authenticated`], possibly
/// through [`AuthStep::NewPasswordRequired`]. Form validation happens here
/// before the provider is contacted.
///
/// # Example
///
/// ```ignore
/// let mut session = AuthSession::new(provider);
/// if !session.restore().await {
///     match session.login(email, password).await? {
///         AuthStep::NewPasswordRequired => session.change_password(new, confirm).await?,
///         step => step,
///     };
/// }
/// ```
pub struct AuthSession<P> {
    provider: Arc<P>,
    policy: PasswordPolicy,
    step: AuthStep,
    user: Option<AuthUser>,
    pending_email: Option<String>,
}

impl<P: IdentityProvider> AuthSession<P> {
    pub fn new(provider: P) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    pub fn from_arc(provider: Arc<P>) -> Self {
        Self {
            provider,
            policy: PasswordPolicy::default(),
            step: AuthStep::Login,
            user: None,
            pending_email: None,
        }
    }

    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn step(&self) -> AuthStep {
        self.step
    }

    pub fn is_authenticated(&self) -> bool {
        self.step == AuthStep::Authenticated
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Email waiting on a new-password challenge.
    pub fn pending_email(&self) -> Option<&str> {
        self.pending_email.as_deref()
    }

    /// Top-bar profile of the signed-in user.
    pub fn profile(&self) -> UserProfile {
        match &self.user {
            Some(user) => UserProfile::from_email(&user.email),
            None => UserProfile::default(),
        }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Token source for the API client, sharing this session's provider.
    pub fn token_provider(&self) -> IdentityTokenProvider<P> {
        IdentityTokenProvider::new(Arc::clone(&self.provider))
    }

    /// Resumes an existing provider session, if any.
    ///
    /// Returns `true` when a user with a valid token is signed in. Provider
    /// failures leave the session at [`AuthStep::Login`].
    pub async fn restore(&mut self) -> bool {
        match self.load_user().await {
            Ok(Some(user)) => {
                info!("Restored session for {}", user.username);
                self.user = Some(user);
                self.step = AuthStep::Authenticated;
                true
            }
            Ok(None) => {
                debug!("No authenticated user");
                self.reset();
                false
            }
            Err(e) => {
                debug!("Session restore failed: {}", e);
                self.reset();
                false
            }
        }
    }

    async fn load_user(&self) -> Result<Option<AuthUser>, AuthError> {
        let Some(user) = self.provider.current_user().await? else {
            return Ok(None);
        };
        if self.provider.access_token().await?.is_none() {
            return Ok(None);
        }
        Ok(Some(user))
    }

    fn reset(&mut self) {
        self.user = None;
        self.step = AuthStep::Login;
    }

    /// Signs in with email and password and returns the resulting step.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthStep, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        match self.provider.sign_in(email, password).await? {
            SignInOutcome::SignedIn => {
                self.finish_sign_in().await?;
            }
            SignInOutcome::NewPasswordRequired => {
                info!("New password required for {}", email);
                self.pending_email = Some(email.to_string());
                self.step = AuthStep::NewPasswordRequired;
            }
            SignInOutcome::Other(step) => {
                warn!("Unsupported sign-in step: {}", step);
            }
        }
        Ok(self.step)
    }

    /// Replaces a temporary password and completes sign-in.
    pub async fn change_password(
        &mut self,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<AuthStep, AuthError> {
        if self.step != AuthStep::NewPasswordRequired {
            return Err(AuthError::NoPendingChallenge);
        }
        if new_password.is_empty() || confirm_password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if new_password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        self.policy.validate(new_password)?;

        match self.provider.confirm_new_password(new_password).await? {
            SignInOutcome::SignedIn => {
                self.finish_sign_in().await?;
            }
            outcome => {
                warn!("Password changed but sign-in is not complete: {:?}", outcome);
            }
        }
        Ok(self.step)
    }

    async fn finish_sign_in(&mut self) -> Result<(), AuthError> {
        let user = self.provider.current_user().await?;
        if let Some(user) = &user {
            info!("Signed in as {}", user.username);
        }
        self.user = user;
        self.pending_email = None;
        self.step = AuthStep::Authenticated;
        Ok(())
    }

    /// Signs out and returns to the login step.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        self.provider.sign_out().await?;
        info!("Signed out");
        self.reset();
        self.pending_email = None;
        Ok(())
    }

    /// Current access token; failures are logged and reported as `None`.
    pub async fn access_token(&self) -> Option<AccessToken> {
        match self.provider.access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to get access token: {}", e);
                None
            }
        }
    }
}
