//! Content copy, special-file creation and tree removal

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::{EntryKind, Error, Result, ensure_owner_writable};

/// Copy the byte content of `source` over `dest`.
///
/// The destination is created if missing and truncated otherwise; there is
/// no temp-file-and-rename step, so an interrupted copy can leave a partial
/// file behind. Returns the number of bytes written.
pub fn copy_contents(source: &Path, dest: &Path) -> Result<u64> {
    let mut reader = File::open(source).map_err(|e| Error::io(source, e))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
        .map_err(|e| Error::io(dest, e))?;

    io::copy(&mut reader, &mut writer).map_err(|e| Error::io(dest, e))
}

/// Create a named pipe at `dest` with the given permission bits.
///
/// The process umask applies; callers that need exact bits should follow
/// up with [`crate::copy_permissions`].
#[cfg(unix)]
pub fn create_named_pipe(dest: &Path, mode: u32) -> Result<()> {
    use nix::sys::stat::Mode;

    let mode = Mode::from_bits_truncate((mode & 0o7777) as nix::libc::mode_t);
    nix::unistd::mkfifo(dest, mode).map_err(|errno| Error::io(dest, io::Error::from(errno)))
}

#[cfg(not(unix))]
pub fn create_named_pipe(dest: &Path, _mode: u32) -> Result<()> {
    Err(Error::io(
        dest,
        io::Error::new(
            io::ErrorKind::Unsupported,
            "named pipes are only supported on Unix platforms",
        ),
    ))
}

/// Remove the directory `root` and everything below it, bottom-up.
///
/// Walks with an explicit worklist instead of recursion. A directory is only
/// removed after every one of its descendants has been; symlinks are removed
/// as links and never followed. `on_removed` is called for each removed path,
/// `root` last. Directories without owner write permission are made
/// writable before their children are removed. Stops at the first failure.
pub fn remove_tree(root: &Path, mut on_removed: impl FnMut(&Path, EntryKind)) -> Result<()> {
    // (directory, children already queued)
    let mut stack: Vec<(PathBuf, bool)> = vec![(root.to_path_buf(), false)];

    while let Some((dir, expanded)) = stack.pop() {
        if expanded {
            fs::remove_dir(&dir).map_err(|e| Error::io(&dir, e))?;
            on_removed(&dir, EntryKind::Directory);
            continue;
        }

        stack.push((dir.clone(), true));
        ensure_owner_writable(&dir)?;
        for entry in fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))? {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let path = entry.path();
            let kind = EntryKind::from_file_type(entry.file_type().map_err(|e| Error::io(&path, e))?);
            if kind == EntryKind::Directory {
                stack.push((path, false));
            } else {
                fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
                on_removed(&path, kind);
            }
        }
    }

    Ok(())
}
