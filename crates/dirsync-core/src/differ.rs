//! Tree differencer
//!
//! Walks the source and target trees side by side and classifies every
//! relative path in their union. Traversal is depth-first over directories
//! using an explicit worklist; entries of a directory are visited in byte
//! order of their names, so plans are deterministic. A directory's own item
//! is always emitted before anything below it.
//!
//! Classification per path:
//!
//! | source       | target       | plan                              |
//! |--------------|--------------|-----------------------------------|
//! | kind K       | absent       | create K (descend if directory)   |
//! | absent       | kind K       | delete K (whole subtree)          |
//! | directory    | directory    | skip, descend                     |
//! | named pipe   | named pipe   | skip                              |
//! | file         | file         | update if size or mtime differ    |
//! | kind A       | kind B       | delete B, then create A           |
//! | unsupported  | anything     | skip with one warning             |
//! | anything     | unsupported  | skip with one warning             |

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dirsync_fs::{EntryKind, modification_time};

use crate::context::SyncContext;
use crate::events::{Side, SyncEvent};
use crate::plan::{Action, Plan, PlanItem, SkipReason};

type Listing = BTreeMap<OsString, EntryKind>;

/// A directory waiting to be compared.
struct PendingDir {
    relative: PathBuf,
    /// False when the directory is known to be absent from the target
    in_target: bool,
}

/// Produces a [`Plan`] by comparing the two roots of a context.
pub struct Differencer<'a> {
    ctx: &'a SyncContext,
}

impl<'a> Differencer<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self { ctx }
    }

    /// Compare both trees and return the ordered plan.
    ///
    /// Directories that cannot be listed on either side are left out of the
    /// plan entirely (reported as scan failures), so an unreadable source
    /// directory never causes target deletions.
    pub fn plan(&self) -> Plan {
        let mut plan = Plan::new();
        let mut pending = vec![PendingDir {
            relative: PathBuf::new(),
            in_target: true,
        }];

        while let Some(dir) = pending.pop() {
            let Some(source_entries) = self.list(Side::Source, &dir.relative, &mut plan) else {
                continue;
            };
            let target_entries = if dir.in_target {
                match self.list(Side::Target, &dir.relative, &mut plan) {
                    Some(entries) => entries,
                    None => continue,
                }
            } else {
                Listing::new()
            };

            let names: BTreeSet<&OsString> =
                source_entries.keys().chain(target_entries.keys()).collect();

            let mut children = Vec::new();
            for name in names {
                let relative = dir.relative.join(name);
                let source = source_entries.get(name).copied();
                let target = target_entries.get(name).copied();
                if let Some(child) = self.classify(relative, source, target, &mut plan) {
                    children.push(child);
                }
            }

            // Reversed so the first child by name is compared next.
            pending.extend(children.into_iter().rev());
        }

        plan
    }

    fn classify(
        &self,
        relative: PathBuf,
        source: Option<EntryKind>,
        target: Option<EntryKind>,
        plan: &mut Plan,
    ) -> Option<PendingDir> {
        match (source, target) {
            (None, None) => None,
            (Some(kind), _) if !kind.is_supported() => {
                self.unsupported(relative, Side::Source, plan);
                None
            }
            (_, Some(kind)) if !kind.is_supported() => {
                self.unsupported(relative, Side::Target, plan);
                None
            }
            (Some(kind), None) => {
                plan.push(PlanItem::new(relative.clone(), kind, Action::Create));
                descend_new(relative, kind)
            }
            (None, Some(kind)) => {
                plan.push(PlanItem::new(relative, kind, Action::Delete));
                None
            }
            (Some(new_kind), Some(old_kind)) if new_kind != old_kind => {
                plan.push(PlanItem::new(relative.clone(), old_kind, Action::Delete));
                plan.push(PlanItem::new(relative.clone(), new_kind, Action::Create));
                descend_new(relative, new_kind)
            }
            (Some(EntryKind::Directory), Some(_)) => {
                plan.push(PlanItem::new(
                    relative.clone(),
                    EntryKind::Directory,
                    Action::Skip(SkipReason::Unchanged),
                ));
                Some(PendingDir {
                    relative,
                    in_target: true,
                })
            }
            (Some(EntryKind::File), Some(_)) => {
                self.compare_files(relative, plan);
                None
            }
            (Some(kind), Some(_)) => {
                plan.push(PlanItem::new(
                    relative,
                    kind,
                    Action::Skip(SkipReason::Unchanged),
                ));
                None
            }
        }
    }

    /// Size or modification time differing marks a file for update.
    /// Content is not compared here.
    fn compare_files(&self, relative: PathBuf, plan: &mut Plan) {
        let roots = self.ctx.roots();
        let source = match fs::symlink_metadata(roots.source_path(&relative)) {
            Ok(meta) => meta,
            Err(e) => return self.scan_failed(relative, Side::Source, &e, plan),
        };
        let target = match fs::symlink_metadata(roots.target_path(&relative)) {
            Ok(meta) => meta,
            Err(e) => return self.scan_failed(relative, Side::Target, &e, plan),
        };

        let changed = source.len() != target.len()
            || modification_time(&source) != modification_time(&target);
        let action = if changed {
            Action::Update
        } else {
            Action::Skip(SkipReason::Unchanged)
        };
        plan.push(PlanItem::new(relative, EntryKind::File, action));
    }

    fn unsupported(&self, relative: PathBuf, side: Side, plan: &mut Plan) {
        self.ctx.emit(SyncEvent::SkippedUnsupported {
            path: relative.clone(),
            side,
        });
        plan.push(PlanItem::new(
            relative,
            EntryKind::Other,
            Action::Skip(SkipReason::Unsupported),
        ));
    }

    fn list(&self, side: Side, relative: &Path, plan: &mut Plan) -> Option<Listing> {
        let roots = self.ctx.roots();
        let path = match side {
            Side::Source => roots.source_path(relative),
            Side::Target => roots.target_path(relative),
        };
        match read_listing(&path) {
            Ok(entries) => Some(entries),
            Err(e) => {
                self.scan_failed(relative.to_path_buf(), side, &e, plan);
                None
            }
        }
    }

    fn scan_failed(&self, relative: PathBuf, side: Side, error: &io::Error, plan: &mut Plan) {
        self.ctx.emit(SyncEvent::ScanFailed {
            path: relative,
            side,
            error: error.to_string(),
        });
        plan.record_scan_failure();
    }
}

/// New directories have nothing in the target to compare against.
fn descend_new(relative: PathBuf, kind: EntryKind) -> Option<PendingDir> {
    (kind == EntryKind::Directory).then_some(PendingDir {
        relative,
        in_target: false,
    })
}

fn read_listing(path: &Path) -> io::Result<Listing> {
    let mut entries = Listing::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let kind = EntryKind::from_file_type(entry.file_type()?);
        entries.insert(entry.file_name(), kind);
    }
    Ok(entries)
}
