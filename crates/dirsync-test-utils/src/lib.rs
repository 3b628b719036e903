//! Shared test utilities for the dirsync workspace.
//!
//! This crate provides standardised tree fixtures so crate test suites do not
//! each grow their own. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder and the [`TreePair`] source/target fixture
//! - [`snapshot`](mod@snapshot): comparable snapshots of whole trees

pub mod snapshot;
pub mod tree;

pub use snapshot::{EntrySnapshot, TreeSnapshot, assert_mirrored, snapshot};
pub use tree::{TestTree, TreePair};
