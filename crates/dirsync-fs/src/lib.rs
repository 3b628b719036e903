//! Filesystem primitives for dirsync
//!
//! Entry classification, content checksums, attribute transfer and the
//! handful of I/O helpers the synchronization core is built on.

pub mod attrs;
pub mod checksum;
pub mod config;
pub mod entry;
pub mod error;
pub mod io;
pub mod path;

pub use attrs::{
    copy_permissions, copy_times, ensure_owner_writable, modification_time, permission_bits,
};
pub use checksum::compute_file_checksum;
pub use config::ConfigStore;
pub use entry::EntryKind;
pub use error::{Error, Result};
pub use io::{copy_contents, create_named_pipe, remove_tree};
pub use path::{absolute_path, relative_path};
