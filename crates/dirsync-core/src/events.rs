//! Pass events and the sinks that receive them
//!
//! Every observable step of a pass is described by a [`SyncEvent`]. The
//! differencer, synchronizer and verifier hand events to the [`EventSink`]
//! carried by the context; [`TracingSink`] turns them into log lines and
//! [`MemorySink`] keeps them for inspection.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use dirsync_fs::EntryKind;

use crate::plan::Action;
use crate::report::PassReport;

/// Severity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Which tree an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Target => "target",
        })
    }
}

/// Something that happened during a pass.
///
/// Paths are relative to the root named by the event, or to the target root
/// for actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    PassStarted {
        source_root: PathBuf,
        target_root: PathBuf,
    },
    PassFinished {
        report: PassReport,
    },
    TargetRootCreated {
        path: PathBuf,
    },
    Created {
        path: PathBuf,
        kind: EntryKind,
    },
    Updated {
        path: PathBuf,
        kind: EntryKind,
    },
    Deleted {
        path: PathBuf,
        kind: EntryKind,
    },
    /// A descendant removed while deleting a directory
    Removed {
        path: PathBuf,
        kind: EntryKind,
    },
    SkippedUnsupported {
        path: PathBuf,
        side: Side,
    },
    EntryFailed {
        path: PathBuf,
        kind: EntryKind,
        action: Action,
        error: String,
    },
    ScanFailed {
        path: PathBuf,
        side: Side,
        error: String,
    },
    Verified {
        path: PathBuf,
        hash: String,
    },
    HashMismatch {
        path: PathBuf,
        source_hash: String,
        target_hash: String,
    },
    VerifyFailed {
        path: PathBuf,
        error: String,
    },
    Interrupted {
        remaining: usize,
    },
}

impl SyncEvent {
    pub fn level(&self) -> Level {
        match self {
            Self::Removed { .. } | Self::Verified { .. } => Level::Debug,
            Self::PassStarted { .. }
            | Self::PassFinished { .. }
            | Self::TargetRootCreated { .. }
            | Self::Created { .. }
            | Self::Updated { .. }
            | Self::Deleted { .. }
            | Self::Interrupted { .. } => Level::Info,
            Self::SkippedUnsupported { .. }
            | Self::HashMismatch { .. }
            | Self::VerifyFailed { .. } => Level::Warn,
            Self::EntryFailed { .. } | Self::ScanFailed { .. } => Level::Error,
        }
    }
}

/// Receiver of pass events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SyncEvent);
}

/// Forwards events to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: SyncEvent) {
        match event {
            SyncEvent::PassStarted {
                source_root,
                target_root,
            } => tracing::info!(
                source = %source_root.display(),
                target = %target_root.display(),
                "Synchronization pass started"
            ),
            SyncEvent::PassFinished { report } => tracing::info!(
                created = report.created,
                updated = report.updated,
                deleted = report.deleted,
                unchanged = report.unchanged,
                unsupported = report.unsupported,
                failed = report.failed,
                mismatches = report.mismatches,
                interrupted = report.interrupted,
                "Synchronization pass finished"
            ),
            SyncEvent::TargetRootCreated { path } => {
                tracing::info!(path = %path.display(), "Recreated missing target root")
            }
            SyncEvent::Created { path, kind } => {
                tracing::info!(path = %path.display(), %kind, "Created {}", kind)
            }
            SyncEvent::Updated { path, kind } => {
                tracing::info!(path = %path.display(), %kind, "Updated {}", kind)
            }
            SyncEvent::Deleted { path, kind } => {
                tracing::info!(path = %path.display(), %kind, "Deleted {}", kind)
            }
            SyncEvent::Removed { path, kind } => {
                tracing::debug!(path = %path.display(), %kind, "Removed {}", kind)
            }
            SyncEvent::SkippedUnsupported { path, side } => tracing::warn!(
                path = %path.display(),
                %side,
                "Skipping unsupported entry"
            ),
            SyncEvent::EntryFailed {
                path,
                kind,
                action,
                error,
            } => tracing::error!(
                path = %path.display(),
                %kind,
                %action,
                "Cannot {} {}: {}",
                action,
                kind,
                error
            ),
            SyncEvent::ScanFailed { path, side, error } => tracing::error!(
                path = %path.display(),
                %side,
                "Cannot scan {} entry: {}",
                side,
                error
            ),
            SyncEvent::Verified { path, hash } => {
                tracing::debug!(path = %path.display(), %hash, "Checksum verified")
            }
            SyncEvent::HashMismatch {
                path,
                source_hash,
                target_hash,
            } => tracing::warn!(
                path = %path.display(),
                %source_hash,
                %target_hash,
                "Checksum mismatch after copy"
            ),
            SyncEvent::VerifyFailed { path, error } => tracing::warn!(
                path = %path.display(),
                "Cannot verify copy: {}",
                error
            ),
            SyncEvent::Interrupted { remaining } => {
                tracing::info!(remaining, "Pass interrupted")
            }
        }
    }
}

/// Records events in memory.
///
/// Clones share the same buffer, so a handle kept by the caller sees the
/// events emitted through the clone given to the context.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<SyncEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&SyncEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| predicate(event))
            .count()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: SyncEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
