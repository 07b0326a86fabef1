//! Organizer: the per-run pipeline.
//!
//! Files are walked, read, classified, placed and reconciled one at a time
//! in walk order:
//!
//! ```text
//! walk ─► empty? ─► read tags ─► classify ─► build destination ─► reconcile
//!           │           │            │
//!         Empty    Unreadable /   Unclassified
//!                  Untagged
//! ```
//!
//! A bad file never stops the run. Filesystem errors while reconciling are
//! recorded in the [`RunSummary`] unless fail-fast is enabled.

mod error;
mod runner;
mod types;

pub use error::OrganizeError;
pub use runner::Organizer;
pub use types::{FileFailure, FileOutcome, RunSummary, UnreadableReason};
