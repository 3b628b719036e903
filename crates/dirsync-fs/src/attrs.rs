//! Attribute transfer: permission bits and timestamps.

use filetime::{FileTime, set_file_times};
use std::fs::{self, Metadata};
use std::path::Path;

use crate::{Error, Result};

/// Modification time of an entry, with the precision the platform offers.
pub fn modification_time(metadata: &Metadata) -> FileTime {
    FileTime::from_last_modification_time(metadata)
}

/// Copy permission bits from `source` metadata onto `dest`.
pub fn copy_permissions(source: &Metadata, dest: &Path) -> Result<()> {
    fs::set_permissions(dest, source.permissions()).map_err(|e| Error::io(dest, e))
}

/// Copy access and modification times from `source` metadata onto `dest`.
pub fn copy_times(source: &Metadata, dest: &Path) -> Result<()> {
    let atime = FileTime::from_last_access_time(source);
    let mtime = FileTime::from_last_modification_time(source);
    set_file_times(dest, atime, mtime).map_err(|e| Error::io(dest, e))
}

/// Permission bits of an entry in Unix mode notation.
#[cfg(unix)]
pub fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
pub fn permission_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Make `path` writable by its owner so its content can be replaced.
///
/// Returns whether the permissions had to change. The original bits are
/// expected to be restored afterwards with [`copy_permissions`].
pub fn ensure_owner_writable(path: &Path) -> Result<bool> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    let mut permissions = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = permissions.mode();
        if mode & 0o200 != 0 {
            return Ok(false);
        }
        permissions.set_mode(mode | 0o200);
    }
    #[cfg(not(unix))]
    {
        if !permissions.readonly() {
            return Ok(false);
        }
        permissions.set_readonly(false);
    }

    fs::set_permissions(path, permissions).map_err(|e| Error::io(path, e))?;
    Ok(true)
}
