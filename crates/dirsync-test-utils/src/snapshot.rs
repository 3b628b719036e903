//! Whole-tree snapshots for mirror assertions.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dirsync_fs::{EntryKind, compute_file_checksum, modification_time, permission_bits};
use filetime::FileTime;

/// What is recorded for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySnapshot {
    File {
        checksum: String,
        len: u64,
        modified: FileTime,
        mode: u32,
    },
    Directory,
    NamedPipe,
    Other,
}

/// Root-relative path to entry snapshot, for every entry below a root.
pub type TreeSnapshot = BTreeMap<PathBuf, EntrySnapshot>;

/// Snapshot every entry below `root`, without following symlinks.
pub fn snapshot(root: &Path) -> TreeSnapshot {
    let mut entries = TreeSnapshot::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            let rel = path.strip_prefix(root).unwrap().to_path_buf();
            let meta = fs::symlink_metadata(&path).unwrap();
            let recorded = match EntryKind::from_metadata(&meta) {
                EntryKind::File => EntrySnapshot::File {
                    checksum: compute_file_checksum(&path).unwrap(),
                    len: meta.len(),
                    modified: modification_time(&meta),
                    mode: permission_bits(&meta),
                },
                EntryKind::Directory => {
                    pending.push(path);
                    EntrySnapshot::Directory
                }
                EntryKind::NamedPipe => EntrySnapshot::NamedPipe,
                EntryKind::Other => EntrySnapshot::Other,
            };
            entries.insert(rel, recorded);
        }
    }

    entries
}

/// Assert that `target` mirrors every supported entry of `source`.
///
/// Unsupported entries are left out of both snapshots.
///
/// # Panics
/// Panics with a diff of the two snapshots when they differ.
pub fn assert_mirrored(source: &Path, target: &Path) {
    let supported = |snap: TreeSnapshot| -> TreeSnapshot {
        snap.into_iter()
            .filter(|(_, entry)| *entry != EntrySnapshot::Other)
            .collect()
    };
    pretty_assertions::assert_eq!(supported(snapshot(source)), supported(snapshot(target)));
}
