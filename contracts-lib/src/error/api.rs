//! API error types

use std::time::Duration;

/// Errors that can occur while talking to the contracts API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the status reason.
        message: String,
    },

    /// Transport failure before a response arrived.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The configured base URL or a derived URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to decode the response body.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` when the server rejected the session.
    ///
    /// Callers end the session and return to the login screen on this error.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Returns the message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { status, message } => match status {
                401 => "No autorizado. Por favor, inicia sesión nuevamente.".to_string(),
                403 => "No tienes permisos para realizar esta acción.".to_string(),
                404 => "Recurso no encontrado.".to_string(),
                500 => "Error del servidor. Intenta más tarde.".to_string(),
                503 => "Servicio no disponible. Intenta más tarde.".to_string(),
                _ => format!("Error {}: {}", status, message),
            },
            Self::Network(e) => format!("Error: {}", e),
            Self::Timeout(_) => "Error de conexión. Verifica tu internet.".to_string(),
            Self::InvalidUrl(_) | Self::Parse { .. } => "Ha ocurrido un error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_messages() {
        assert_eq!(
            ApiError::http(404, "Not Found").user_message(),
            "Recurso no encontrado."
        );
        assert_eq!(
            ApiError::http(503, "").user_message(),
            "Servicio no disponible. Intenta más tarde."
        );
    }

    #[test]
    fn test_unknown_status_falls_back_to_body() {
        assert_eq!(
            ApiError::http(418, "teapot").user_message(),
            "Error 418: teapot"
        );
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::http(401, "").is_unauthorized());
        assert!(!ApiError::http(403, "").is_unauthorized());
        assert!(!ApiError::InvalidUrl("x".into()).is_unauthorized());
    }
}
