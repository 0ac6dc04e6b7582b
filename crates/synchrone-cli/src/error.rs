//! Error types for synchrone-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from synchrone-core
    #[error(transparent)]
    Core(#[from] synchrone_core::Error),

    /// Error from synchrone-config
    #[error(transparent)]
    Config(#[from] synchrone_config::Error),

    /// Error from synchrone-fs
    #[error(transparent)]
    Fs(#[from] synchrone_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
