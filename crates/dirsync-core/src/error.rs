//! Error types for dirsync-core
//!
//! Only configuration problems surface as errors. Failures on individual
//! entries during a pass are reported as events and never returned.

use std::path::PathBuf;

/// Result type for dirsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that prevent a pass from starting
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source root does not exist
    #[error("Source root not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Source root exists but is not a directory
    #[error("Source root is not a directory: {path}")]
    SourceNotDirectory { path: PathBuf },

    /// Source root cannot be listed
    #[error("Source root is not readable: {path}")]
    SourceNotReadable { path: PathBuf },

    /// Target root exists but is not a directory
    #[error("Target root is not a directory: {path}")]
    TargetNotDirectory { path: PathBuf },

    /// Target root cannot be written to
    #[error("Target root is not writable: {path}")]
    TargetNotWritable { path: PathBuf },

    /// One root contains the other
    #[error("Source root {source_root} and target root {target_root} overlap")]
    OverlappingRoots {
        source_root: PathBuf,
        target_root: PathBuf,
    },

    /// Filesystem error from dirsync-fs
    #[error(transparent)]
    Fs(#[from] dirsync_fs::Error),
}
