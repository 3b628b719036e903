//! Conversions between root-relative and absolute paths

use std::path::{Path, PathBuf};

/// Express `absolute` relative to `root`.
///
/// Returns `None` when `absolute` does not live under `root`.
pub fn relative_path(root: &Path, absolute: &Path) -> Option<PathBuf> {
    absolute.strip_prefix(root).ok().map(Path::to_path_buf)
}

/// Resolve a root-relative path against `root`.
///
/// An empty relative path resolves to `root` itself.
pub fn absolute_path(root: &Path, relative: &Path) -> PathBuf {
    if relative.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}
