//! SyncEngine implementation

use std::path::Path;

use crate::context::SyncContext;
use crate::differ::Differencer;
use crate::events::{Side, SyncEvent};
use crate::plan::Plan;
use crate::report::PassReport;
use crate::roots::RootPair;
use crate::synchronizer::Synchronizer;
use crate::Result;

/// Runs complete synchronization passes for one pair of roots.
///
/// A pass compares the trees, applies the resulting plan and verifies
/// copies. Passes are independent; nothing is carried over between them.
#[derive(Debug)]
pub struct SyncEngine {
    ctx: SyncContext,
}

impl SyncEngine {
    pub fn new(ctx: SyncContext) -> Self {
        Self { ctx }
    }

    /// Validate the roots and build an engine with the default context.
    pub fn from_roots(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(SyncContext::new(RootPair::new(source, target)?)))
    }

    pub fn context(&self) -> &SyncContext {
        &self.ctx
    }

    /// Compare both trees without touching the target.
    pub fn plan(&self) -> Plan {
        Differencer::new(&self.ctx).plan()
    }

    /// Execute one full pass.
    ///
    /// Never fails as a whole: per-entry problems are counted in the report
    /// and emitted as events. A target root that vanished since the previous
    /// pass is recreated first.
    pub fn run_pass(&self) -> PassReport {
        let roots = self.ctx.roots();
        self.ctx.emit(SyncEvent::PassStarted {
            source_root: roots.source().to_path_buf(),
            target_root: roots.target().to_path_buf(),
        });

        let report = match roots.ensure_target() {
            Ok(created) => {
                if created {
                    self.ctx.emit(SyncEvent::TargetRootCreated {
                        path: roots.target().to_path_buf(),
                    });
                }
                let plan = self.plan();
                let mut report = Synchronizer::new(&self.ctx).apply(&plan);
                report.failed += plan.scan_failures();
                report
            }
            Err(e) => {
                self.ctx.emit(SyncEvent::ScanFailed {
                    path: roots.target().to_path_buf(),
                    side: Side::Target,
                    error: e.to_string(),
                });
                PassReport {
                    failed: 1,
                    ..Default::default()
                }
            }
        };

        self.ctx.emit(SyncEvent::PassFinished {
            report: report.clone(),
        });
        report
    }
}
