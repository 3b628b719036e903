//! Per-pass summary counters

/// Outcome of one synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Entries created in the target
    pub created: usize,
    /// Files overwritten in the target
    pub updated: usize,
    /// Target-only entries removed (a directory counts once)
    pub deleted: usize,
    /// Entries present on both sides with nothing to do
    pub unchanged: usize,
    /// Entries skipped because their type is not mirrored
    pub unsupported: usize,
    /// Operations or scans that failed
    pub failed: usize,
    /// Copied files whose checksum differed from the source
    pub mismatches: usize,
    /// Copied files whose checksum could not be computed
    pub unverified: usize,
    /// Whether the pass stopped early on request
    pub interrupted: bool,
}

impl PassReport {
    /// Number of create, update and delete actions performed.
    pub fn actions(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    /// True when nothing failed, every copy verified and the pass ran to the end.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.mismatches == 0 && self.unverified == 0 && !self.interrupted
    }
}
