//! Source/target root validation

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dirsync_fs::absolute_path;

use crate::{Error, Result};

/// The pair of directory roots a pass mirrors between.
///
/// Both roots are canonical absolute paths. Construction validates that the
/// source is a readable directory, that the target is (or can be created as)
/// a writable directory, and that neither root contains the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPair {
    source: PathBuf,
    target: PathBuf,
}

impl RootPair {
    /// Validate and canonicalize a root pair, creating the target if missing.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either root is unusable.
    pub fn new(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<Self> {
        let source = validate_source(source.as_ref())?;
        let target = prepare_target(target.as_ref())?;

        if target.starts_with(&source) || source.starts_with(&target) {
            return Err(Error::OverlappingRoots {
                source_root: source,
                target_root: target,
            });
        }

        Ok(Self { source, target })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Absolute source-side path for a root-relative path.
    pub fn source_path(&self, relative: &Path) -> PathBuf {
        absolute_path(&self.source, relative)
    }

    /// Absolute target-side path for a root-relative path.
    pub fn target_path(&self, relative: &Path) -> PathBuf {
        absolute_path(&self.target, relative)
    }

    /// Recreate the target root if it vanished since validation.
    ///
    /// Returns `true` when the directory had to be created.
    pub fn ensure_target(&self) -> Result<bool> {
        if self.target.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.target).map_err(|e| dirsync_fs::Error::io(&self.target, e))?;
        Ok(true)
    }
}

fn validate_source(path: &Path) -> Result<PathBuf> {
    let metadata = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(dirsync_fs::Error::io(path, e).into()),
    };
    if !metadata.is_dir() {
        return Err(Error::SourceNotDirectory {
            path: path.to_path_buf(),
        });
    }
    if fs::read_dir(path).is_err() {
        return Err(Error::SourceNotReadable {
            path: path.to_path_buf(),
        });
    }

    fs::canonicalize(path).map_err(|e| dirsync_fs::Error::io(path, e).into())
}

fn prepare_target(path: &Path) -> Result<PathBuf> {
    match fs::metadata(path) {
        Ok(meta) if !meta.is_dir() => {
            return Err(Error::TargetNotDirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| dirsync_fs::Error::io(path, e))?;
            tracing::info!(path = %path.display(), "Created missing target root");
        }
        Err(e) => return Err(dirsync_fs::Error::io(path, e).into()),
    }

    if !is_writable(path) {
        return Err(Error::TargetNotWritable {
            path: path.to_path_buf(),
        });
    }

    fs::canonicalize(path).map_err(|e| dirsync_fs::Error::io(path, e).into())
}

#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};
    access(path, AccessFlags::W_OK | AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
