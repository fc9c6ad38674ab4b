//! Environment configuration and the password policy

use url::Url;

use crate::error::AuthError;
use crate::error::ConfigError;
use crate::error::PasswordViolation;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_REGION: &str = "us-east-1";

/// Deployment settings: where the contracts API lives and which identity
/// pool users sign in against.
///
/// # Example
///
/// ```
/// use contracts_lib::config::Environment;
///
/// let env = Environment::default()
///     .with_api_url("https://api.example.com")
///     .with_production(true);
/// assert_eq!(env.region, "us-east-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub production: bool,
    /// Base URL of the contracts API.
    ///
    /// Default: `http://localhost:3000`
    pub api_url: String,
    /// Default: `us-east-1`
    pub region: String,
    pub user_pool_id: String,
    pub user_pool_client_id: String,
    pub identity_pool_id: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            production: false,
            api_url: DEFAULT_API_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            user_pool_id: String::new(),
            user_pool_client_id: String::new(),
            identity_pool_id: String::new(),
        }
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration from process environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env = Self::default();

        if let Some(api_url) = lookup("API_URL") {
            Url::parse(&api_url).map_err(|e| ConfigError::invalid("API_URL", e.to_string()))?;
            env.api_url = api_url;
        }
        if let Some(production) = lookup("PRODUCTION") {
            env.production = parse_bool(&production)
                .ok_or_else(|| ConfigError::invalid("PRODUCTION", "expected true or false"))?;
        }
        if let Some(region) = lookup("AWS_REGION") {
            env.region = region;
        }
        if let Some(id) = lookup("AWS_USER_POOL_ID") {
            env.user_pool_id = id;
        }
        if let Some(id) = lookup("AWS_USER_POOL_CLIENT_ID") {
            env.user_pool_client_id = id;
        }
        if let Some(id) = lookup("AWS_IDENTITY_POOL_ID") {
            env.identity_pool_id = id;
        }

        Ok(env)
    }

    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_user_pool(
        mut self,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        self.user_pool_id = user_pool_id.into();
        self.user_pool_client_id = client_id.into();
        self
    }

    pub fn with_identity_pool_id(mut self, identity_pool_id: impl Into<String>) -> Self {
        self.identity_pool_id = identity_pool_id.into();
        self
    }

    /// Returns `true` if a user pool is configured.
    pub fn has_identity_provider(&self) -> bool {
        !self.user_pool_id.is_empty() && !self.user_pool_client_id.is_empty()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Requirements a new password must meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_digit: bool,
    /// Any character outside `[A-Za-z0-9]` counts as special.
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_lowercase: true,
            require_uppercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl PasswordPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that only checks length.
    pub fn length_only(min_length: usize) -> Self {
        Self {
            min_length,
            require_lowercase: false,
            require_uppercase: false,
            require_digit: false,
            require_special: false,
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_special(mut self, required: bool) -> Self {
        self.require_special = required;
        self
    }

    /// Returns the first requirement `password` fails, if any.
    pub fn check(&self, password: &str) -> Option<PasswordViolation> {
        if password.chars().count() < self.min_length {
            return Some(PasswordViolation::TooShort {
                min_length: self.min_length,
            });
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Some(PasswordViolation::MissingUppercase);
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Some(PasswordViolation::MissingLowercase);
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Some(PasswordViolation::MissingDigit);
        }
        if self.require_special && password.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Some(PasswordViolation::MissingSpecial);
        }
        None
    }

    /// Validates `password`, returning [`AuthError::WeakPassword`] on failure.
    pub fn validate(&self, password: &str) -> Result<(), AuthError> {
        match self.check(password) {
            Some(violation) => Err(AuthError::WeakPassword(violation)),
            None => Ok(()),
        }
    }
}
