//! CLI error type.

use std::path::PathBuf;

use contracts_lib::error::ConfigError;
use contracts_lib::error::Error as LibError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Lib(#[from] LibError),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid contracts file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "unknown status '{0}' (expected borrador, pendiente_firma, activo, finalizado or suspendido)"
    )]
    InvalidStatus(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("column '{0}' cannot be sorted")]
    NotSortable(String),

    #[error("contract {0} not found")]
    NotFound(String),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Lib(e.into())
    }
}

impl CliError {
    /// Message printed to stderr before exiting.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Lib(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
