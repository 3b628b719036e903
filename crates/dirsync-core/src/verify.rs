//! Post-copy content verification

use std::path::Path;

use dirsync_fs::compute_file_checksum;

use crate::context::SyncContext;
use crate::events::SyncEvent;

/// Result of comparing a copied file against its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Match {
        hash: String,
    },
    Mismatch {
        source_hash: String,
        target_hash: String,
    },
    /// One of the two checksums could not be computed
    Unverifiable {
        error: String,
    },
}

/// Compares MD5 checksums of a source file and its target copy.
///
/// A mismatch is reported but not retried; the next pass picks the file up
/// again only if size or modification time differ.
pub struct Verifier<'a> {
    ctx: &'a SyncContext,
}

impl<'a> Verifier<'a> {
    pub fn new(ctx: &'a SyncContext) -> Self {
        Self { ctx }
    }

    /// Verify the file at root-relative path `relative` and emit the outcome.
    pub fn verify(&self, relative: &Path) -> Verification {
        let roots = self.ctx.roots();
        let hashes = compute_file_checksum(&roots.source_path(relative)).and_then(|source_hash| {
            compute_file_checksum(&roots.target_path(relative))
                .map(|target_hash| (source_hash, target_hash))
        });

        let outcome = match hashes {
            Ok((source_hash, target_hash)) if source_hash == target_hash => {
                Verification::Match { hash: source_hash }
            }
            Ok((source_hash, target_hash)) => Verification::Mismatch {
                source_hash,
                target_hash,
            },
            Err(e) => Verification::Unverifiable {
                error: e.to_string(),
            },
        };

        let path = relative.to_path_buf();
        self.ctx.emit(match &outcome {
            Verification::Match { hash } => SyncEvent::Verified {
                path,
                hash: hash.clone(),
            },
            Verification::Mismatch {
                source_hash,
                target_hash,
            } => SyncEvent::HashMismatch {
                path,
                source_hash: source_hash.clone(),
                target_hash: target_hash.clone(),
            },
            Verification::Unverifiable { error } => SyncEvent::VerifyFailed {
                path,
                error: error.clone(),
            },
        });

        outcome
    }
}
