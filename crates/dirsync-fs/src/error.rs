//! Error types for dirsync-fs

use std::path::{Path, PathBuf};

/// Result type for dirsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dirsync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::ConfigParse { path, .. } => Some(path),
            Self::UnsupportedFormat { .. } => None,
        }
    }
}
