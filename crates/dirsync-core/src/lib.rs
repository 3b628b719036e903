//! One-way directory mirroring for dirsync
//!
//! This crate keeps a target directory tree identical to a source tree:
//!
//! - **Roots**: validation of the source and target roots ([`RootPair`])
//! - **Differencer**: side-by-side comparison producing an ordered [`Plan`]
//! - **Synchronizer**: best-effort execution of a plan against the target
//! - **Verifier**: MD5 comparison of every copied file with its source
//! - **SyncEngine**: one full pass of the above, summarized in a [`PassReport`]
//!
//! Everything a pass needs travels in an explicit [`SyncContext`]; progress
//! is reported as [`SyncEvent`]s through the context's [`EventSink`].
//!
//! # Architecture
//!
//! ```text
//!                dirsync-cli
//!                     |
//!                dirsync-core
//!                     |
//!                 dirsync-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dirsync_core::{Result, SyncEngine};
//!
//! fn example() -> Result<()> {
//!     let engine = SyncEngine::from_roots("/data/source", "/backup/target")?;
//!     let report = engine.run_pass();
//!     println!("{} changes", report.actions());
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod differ;
pub mod engine;
pub mod error;
pub mod events;
pub mod plan;
pub mod report;
pub mod roots;
pub mod synchronizer;
pub mod verify;

pub use context::{ContentCopier, StdCopier, SyncContext};
pub use differ::Differencer;
pub use engine::SyncEngine;
pub use error::{Error, Result};
pub use events::{EventSink, Level, MemorySink, Side, SyncEvent, TracingSink};
pub use plan::{Action, Plan, PlanItem, SkipReason};
pub use report::PassReport;
pub use roots::RootPair;
pub use synchronizer::Synchronizer;
pub use verify::{Verification, Verifier};
