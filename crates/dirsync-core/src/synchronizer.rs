//! Plan execution
//!
//! Applies a [`Plan`] to the target tree item by item. Execution is
//! best-effort: a failing item is reported and counted, and the pass moves
//! on to the next one.
//!
//! Permission bits and timestamps of created directories are applied only
//! after every item has run, deepest directory first, so a read-only
//! directory can still be populated and keeps the source's mtime.
//! Existing target directories that are read-only are made owner-writable
//! for the duration of a single item and then get their bits back.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use dirsync_fs::{
    EntryKind, Error, copy_permissions, copy_times, create_named_pipe, ensure_owner_writable,
    permission_bits, relative_path, remove_tree,
};

use crate::context::SyncContext;
use crate::events::SyncEvent;
use crate::plan::{Action, Plan, PlanItem, SkipReason};
use crate::report::PassReport;
use crate::verify::{Verification, Verifier};

/// A created directory whose attributes are still to be set.
struct DeferredDir {
    relative: PathBuf,
    target: PathBuf,
    metadata: Metadata,
}

/// Executes plans against the target root of a context.
pub struct Synchronizer<'a> {
    ctx: &'a SyncContext,
}

impl<'a> Synchronizer<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self { ctx }
    }

    /// Run every item of `plan` in order and summarize the outcome.
    ///
    /// The cancellation flag is checked before each item; once it is set the
    /// remaining items are left alone and the report is marked interrupted.
    pub fn apply(&self, plan: &Plan) -> PassReport {
        let mut report = PassReport::default();
        let mut deferred = Vec::new();
        let items = plan.items();

        for (index, item) in items.iter().enumerate() {
            if self.ctx.is_cancelled() {
                self.ctx.emit(SyncEvent::Interrupted {
                    remaining: items.len() - index,
                });
                report.interrupted = true;
                break;
            }

            match item.action {
                Action::Skip(SkipReason::Unchanged) => report.unchanged += 1,
                Action::Skip(SkipReason::Unsupported) => report.unsupported += 1,
                action => match self.perform(item, &mut deferred) {
                    Ok(()) => self.record_success(item, action, &mut report),
                    Err(e) => {
                        report.failed += 1;
                        self.ctx.emit(SyncEvent::EntryFailed {
                            path: item.path.clone(),
                            kind: item.kind,
                            action,
                            error: e.to_string(),
                        });
                    }
                },
            }
        }

        self.apply_directory_attributes(deferred, &mut report);
        report
    }

    fn record_success(&self, item: &PlanItem, action: Action, report: &mut PassReport) {
        let path = item.path.clone();
        let kind = item.kind;
        match action {
            Action::Create => {
                report.created += 1;
                self.ctx.emit(SyncEvent::Created { path, kind });
            }
            Action::Update => {
                report.updated += 1;
                self.ctx.emit(SyncEvent::Updated { path, kind });
            }
            Action::Delete => {
                report.deleted += 1;
                self.ctx.emit(SyncEvent::Deleted { path, kind });
                return;
            }
            Action::Skip(_) => return,
        }

        if kind == EntryKind::File {
            match Verifier::new(self.ctx).verify(&item.path) {
                Verification::Match { .. } => {}
                Verification::Mismatch { .. } => report.mismatches += 1,
                Verification::Unverifiable { .. } => report.unverified += 1,
            }
        }
    }

    fn perform(&self, item: &PlanItem, deferred: &mut Vec<DeferredDir>) -> dirsync_fs::Result<()> {
        let roots = self.ctx.roots();
        let source = roots.source_path(&item.path);
        let target = roots.target_path(&item.path);

        with_writable_parent(&target, || match (item.action, item.kind) {
            (Action::Delete, EntryKind::Directory) => self.remove_directory(&target),
            (Action::Delete, _) => fs::remove_file(&target).map_err(|e| Error::io(&target, e)),
            (_, EntryKind::Directory) => {
                let metadata = fs::metadata(&source).map_err(|e| Error::io(&source, e))?;
                create_directory(&target)?;
                deferred.push(DeferredDir {
                    relative: item.path.clone(),
                    target: target.clone(),
                    metadata,
                });
                Ok(())
            }
            (action, EntryKind::File) => self.copy_file(action, &source, &target),
            (_, EntryKind::NamedPipe) => {
                let metadata = fs::symlink_metadata(&source).map_err(|e| Error::io(&source, e))?;
                create_named_pipe(&target, permission_bits(&metadata))?;
                copy_permissions(&metadata, &target)?;
                copy_times(&metadata, &target)
            }
            (_, EntryKind::Other) => Err(Error::io(
                &source,
                io::Error::new(io::ErrorKind::Unsupported, "unsupported entry type"),
            )),
        })
    }

    fn copy_file(&self, action: Action, source: &Path, target: &Path) -> dirsync_fs::Result<()> {
        // Taken before copying so the target receives the source's times
        // even if the source is touched meanwhile.
        let metadata = fs::metadata(source).map_err(|e| Error::io(source, e))?;

        if action == Action::Update {
            ensure_owner_writable(target)?;
        }

        self.ctx.copier().copy(source, target)?;
        copy_permissions(&metadata, target)?;
        copy_times(&metadata, target)
    }

    /// Remove a target directory subtree, reporting each descendant.
    fn remove_directory(&self, target: &Path) -> dirsync_fs::Result<()> {
        let target_root = self.ctx.roots().target();
        remove_tree(target, |removed, kind| {
            if removed == target {
                return;
            }
            if let Some(path) = relative_path(target_root, removed) {
                self.ctx.emit(SyncEvent::Removed { path, kind });
            }
        })
    }

    fn apply_directory_attributes(&self, deferred: Vec<DeferredDir>, report: &mut PassReport) {
        for dir in deferred.into_iter().rev() {
            let applied = copy_permissions(&dir.metadata, &dir.target)
                .and_then(|()| copy_times(&dir.metadata, &dir.target));
            if let Err(e) = applied {
                report.failed += 1;
                self.ctx.emit(SyncEvent::EntryFailed {
                    path: dir.relative,
                    kind: EntryKind::Directory,
                    action: Action::Create,
                    error: e.to_string(),
                });
            }
        }
    }
}

/// Run `op` with the parent directory of `target` writable by its owner.
///
/// Permission bits the parent had before are put back afterwards, whether
/// `op` succeeded or not. An error from `op` takes precedence.
fn with_writable_parent(
    target: &Path,
    op: impl FnOnce() -> dirsync_fs::Result<()>,
) -> dirsync_fs::Result<()> {
    let Some(parent) = target.parent() else {
        return op();
    };
    let original = fs::metadata(parent).map_err(|e| Error::io(parent, e))?;
    if !ensure_owner_writable(parent)? {
        return op();
    }

    let result = op();
    let restored = copy_permissions(&original, parent);
    result.and(restored)
}

/// Create a single directory; one that already exists is accepted.
fn create_directory(path: &Path) -> dirsync_fs::Result<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}
