//! Error types

mod api;
mod auth;
mod config;
mod field;

pub use api::*;
pub use auth::*;
pub use config::*;
pub use field::*;

/// Top-level error for operations that can fail for more than one reason.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP or response-decoding failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Identity provider or session failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Typed record access failure.
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl Error {
    /// Returns the message to show to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(e) => e.user_message(),
            Error::Auth(e) => e.user_message(),
            Error::Config(e) => e.to_string(),
            Error::Field(e) => e.to_string(),
        }
    }
}
