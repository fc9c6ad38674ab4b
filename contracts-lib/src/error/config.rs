//! Configuration error types

/// Errors raised while reading the environment configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value can't be used.
    #[error("Invalid value for {variable}: {message}")]
    InvalidValue { variable: String, message: String },
}

impl ConfigError {
    /// Creates a new invalid value error.
    pub fn invalid(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            variable: variable.into(),
            message: message.into(),
        }
    }
}
