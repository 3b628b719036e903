//! Error types for dirsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that stop the process before or between passes
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from dirsync-core
    #[error(transparent)]
    Core(#[from] dirsync_core::Error),

    /// Error from dirsync-fs
    #[error(transparent)]
    Fs(#[from] dirsync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Logging could not be set up
    #[error("Cannot initialize logging: {message}")]
    Logging { message: String },

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

    pub fn logging(message: impl std::fmt::Display) -> Self {
        Self::Logging {
            message: message.to_string(),
        }
    }
}
