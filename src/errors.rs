use thiserror::Error;

/// All errors that can occur while stretching a password.
#[derive(Debug, Error)]
pub enum KeyStretcherError {
    // --- Parameter errors ---
    #[error("Invalid {name}: {reason}")]
    Parameter { name: &'static str, reason: String },

    // --- Derivation errors ---
    #[error("Cannot combine derived keys of different lengths ({left} vs {right} bytes)")]
    LengthMismatch { left: usize, right: usize },

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl KeyStretcherError {
    /// Shorthand for building a [`KeyStretcherError::Parameter`].
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Parameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for key-stretcher results.
pub type Result<T> = std::result::Result<T, KeyStretcherError>;
