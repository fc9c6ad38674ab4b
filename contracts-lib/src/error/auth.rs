//! Authentication error types

/// A requirement of the password policy that a new password failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordViolation {
    /// Shorter than the minimum length.
    #[error("shorter than {min_length} characters")]
    TooShort { min_length: usize },
    /// No uppercase letter.
    #[error("no uppercase letter")]
    MissingUppercase,
    /// No lowercase letter.
    #[error("no lowercase letter")]
    MissingLowercase,
    /// No digit.
    #[error("no digit")]
    MissingDigit,
    /// No character outside `[A-Za-z0-9]`.
    #[error("no special character")]
    MissingSpecial,
}

impl PasswordViolation {
    /// Returns the message shown on the change-password form.
    pub fn user_message(&self) -> String {
        match self {
            Self::TooShort { min_length } => {
                format!("La contraseña debe tener al menos {} caracteres", min_length)
            }
            Self::MissingUppercase => {
                "La contraseña debe contener al menos una mayúscula".to_string()
            }
            Self::MissingLowercase => {
                "La contraseña debe contener al menos una minúscula".to_string()
            }
            Self::MissingDigit => "La contraseña debe contener al menos un número".to_string(),
            Self::MissingSpecial => {
                "La contraseña debe contener al menos un carácter especial".to_string()
            }
        }
    }
}

/// Errors that can occur during sign-in, password change, and sign-out.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required form field was left empty.
    #[error("Missing required fields")]
    MissingFields,

    /// The new password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The new password breaks the password policy.
    #[error("Password rejected: {0}")]
    WeakPassword(PasswordViolation),

    /// The account does not exist.
    #[error("User not found")]
    UserNotFound,

    /// Wrong email or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account exists but its email was never confirmed.
    #[error("User not confirmed")]
    UserNotConfirmed,

    /// The provider rejected the password itself.
    #[error("Invalid password")]
    InvalidPassword,

    /// The provider is throttling sign-in attempts.
    #[error("Too many requests")]
    TooManyRequests,

    /// A password change was attempted without a pending challenge.
    #[error("No password change is pending")]
    NoPendingChallenge,

    /// No user is signed in.
    #[error("Not signed in")]
    NotSignedIn,

    /// Network error while contacting the identity provider.
    #[error("Network error during auth: {0}")]
    Network(String),

    /// Any other provider failure, identified by the provider's error name.
    #[error("{name}: {message}")]
    Provider { name: String, message: String },
}

impl AuthError {
    /// Builds an error from the provider's error name and message.
    ///
    /// Known names map to their dedicated variants.
    pub fn from_provider(name: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match name {
            "UserNotFoundException" => Self::UserNotFound,
            "NotAuthorizedException" => Self::InvalidCredentials,
            "UserNotConfirmedException" => Self::UserNotConfirmed,
            "InvalidPasswordException" => Self::InvalidPassword,
            "TooManyRequestsException" => Self::TooManyRequests,
            "NetworkError" => Self::Network(message),
            _ => Self::Provider {
                name: name.to_string(),
                message,
            },
        }
    }

    /// Returns the message shown on the login form.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingFields => "Por favor completa todos los campos".to_string(),
            Self::PasswordMismatch => "Las contraseñas no coinciden".to_string(),
            Self::WeakPassword(violation) => violation.user_message(),
            Self::UserNotFound => "Usuario no encontrado".to_string(),
            Self::InvalidCredentials => "Email o contraseña incorrectos".to_string(),
            Self::UserNotConfirmed => "Usuario no confirmado. Verifica tu email.".to_string(),
            Self::InvalidPassword => "Contraseña inválida".to_string(),
            Self::TooManyRequests => "Demasiados intentos. Intenta más tarde.".to_string(),
            Self::NoPendingChallenge => "Error al cambiar contraseña".to_string(),
            Self::NotSignedIn => {
                "Sesión expirada. Por favor, inicia sesión nuevamente.".to_string()
            }
            Self::Network(_) => "Error de conexión. Verifica tu internet.".to_string(),
            Self::Provider { message, .. } if !message.is_empty() => message.clone(),
            Self::Provider { .. } => "Error desconocido".to_string(),
        }
    }
}
