//! Filesystem entry classification.

use std::fs::{FileType, Metadata};

/// The kind of a filesystem entry, as far as synchronization cares.
///
/// Classification never follows symbolic links: a symlink is [`EntryKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// FIFO special file
    NamedPipe,
    /// Anything else: symlinks, sockets, block and character devices
    Other,
}

impl EntryKind {
    /// Classify a file type obtained without following symlinks.
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_file() {
            Self::File
        } else if file_type.is_dir() {
            Self::Directory
        } else if is_fifo(&file_type) {
            Self::NamedPipe
        } else {
            Self::Other
        }
    }

    /// Classify from metadata obtained via `symlink_metadata`.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self::from_file_type(metadata.file_type())
    }

    /// Whether entries of this kind are mirrored at all.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::NamedPipe => "named pipe",
            Self::Other => "unsupported entry",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(unix)]
fn is_fifo(file_type: &FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;
    file_type.is_fifo()
}

#[cfg(not(unix))]
fn is_fifo(_file_type: &FileType) -> bool {
    false
}
