//! Explicit per-engine context

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::events::{EventSink, SyncEvent, TracingSink};
use crate::roots::RootPair;

/// Writes file content from source to target.
///
/// The synchronizer copies through this seam so alternative strategies (or
/// faulty ones, in tests) can be plugged in. Attributes are applied by the
/// synchronizer afterwards.
pub trait ContentCopier: Send + Sync {
    fn copy(&self, source: &Path, target: &Path) -> dirsync_fs::Result<u64>;
}

/// Plain streaming copy with overwrite semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdCopier;

impl ContentCopier for StdCopier {
    fn copy(&self, source: &Path, target: &Path) -> dirsync_fs::Result<u64> {
        dirsync_fs::copy_contents(source, target)
    }
}

/// Everything a pass needs: roots, event sink, copier and cancellation flag.
///
/// Threaded explicitly through the differencer, synchronizer and verifier.
pub struct SyncContext {
    roots: RootPair,
    sink: Box<dyn EventSink>,
    copier: Box<dyn ContentCopier>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SyncContext {
    /// Context logging through `tracing` and copying with [`StdCopier`].
    pub fn new(roots: RootPair) -> Self {
        Self {
            roots,
            sink: Box::new(TracingSink),
            copier: Box::new(StdCopier),
            cancel: None,
        }
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_copier(mut self, copier: impl ContentCopier + 'static) -> Self {
        self.copier = Box::new(copier);
        self
    }

    /// Stop passes at the next item boundary once `flag` becomes true.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn roots(&self) -> &RootPair {
        &self.roots
    }

    pub fn copier(&self) -> &dyn ContentCopier {
        self.copier.as_ref()
    }

    pub fn emit(&self, event: SyncEvent) {
        self.sink.emit(event);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl std::fmt::Debug for SyncContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncContext")
            .field("roots", &self.roots)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}
