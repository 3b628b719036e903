//! Sync plan types

use std::path::{Path, PathBuf};

use dirsync_fs::EntryKind;

/// Why an entry needs no work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Present on both sides and considered equal
    Unchanged,
    /// Not a file, directory or named pipe
    Unsupported,
}

/// What to do with one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    Skip(SkipReason),
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Skip(_) => "skip",
        }
    }

    /// Whether this action touches the target tree.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Skip(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a plan: a root-relative path, its kind and the action.
///
/// For deletions `kind` is the kind found in the target; otherwise it is the
/// kind found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub action: Action,
}

impl PlanItem {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, action: Action) -> Self {
        Self {
            path: path.into(),
            kind,
            action,
        }
    }
}

/// An ordered list of plan items.
///
/// Ordering invariants:
/// - a directory's create item precedes every item below it;
/// - a delete item for a path precedes a create item for the same path
///   (kind replacement);
/// - a directory delete covers its whole subtree, which the synchronizer
///   removes bottom-up, so no item below a deleted directory appears.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    items: Vec<PlanItem>,
    scan_failures: usize,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: PlanItem) {
        self.items.push(item);
    }

    pub(crate) fn record_scan_failure(&mut self) {
        self.scan_failures += 1;
    }

    pub fn items(&self) -> &[PlanItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of directories or entries that could not be inspected.
    pub fn scan_failures(&self) -> usize {
        self.scan_failures
    }

    /// Items that modify the target.
    pub fn changes(&self) -> impl Iterator<Item = &PlanItem> {
        self.items.iter().filter(|item| item.action.is_change())
    }

    /// First item for `path`, if any.
    pub fn find(&self, path: impl AsRef<Path>) -> Option<&PlanItem> {
        let path = path.as_ref();
        self.items.iter().find(|item| item.path == path)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PlanItem;
    type IntoIter = std::slice::Iter<'a, PlanItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
