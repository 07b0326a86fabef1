//! Reconciler module for bringing a file to its computed destination.
//!
//! This module provides the `Reconciler` trait and a filesystem
//! implementation that decides, per file, between moving, copying, replacing
//! or skipping, and reports what it did (or would do under dry-run).
//!
//! # Decision table
//!
//! | destination          | move mode                         | copy mode        |
//! |----------------------|-----------------------------------|------------------|
//! | none (unclassified)  | `Skipped(Unclassified)`           | same             |
//! | exists, same length  | `Skipped(SameLength)`             | same             |
//! | missing              | `Moved`                           | `Copied`         |
//! | exists, other length | `ReplacedByMove` (`Moved` in-place) | `ReplacedByCopy` |
//!
//! Under dry-run the `Would*` variants are returned and nothing on disk
//! changes, not even directory creation.
//!
//! # Example
//!
//! ```ignore
//! use shelver_core::reconciler::{FsReconciler, Reconciler, ReconcileOptions};
//!
//! let reconciler = FsReconciler::with_defaults();
//! let options = ReconcileOptions { move_files: true, in_place: false, dry_run: false };
//!
//! let action = reconciler.reconcile(&source, Some(&destination), &options).await?;
//! println!("{}: {}", source.display(), action);
//! ```

mod config;
mod error;
mod fs_reconciler;
mod traits;
mod types;

pub use config::ReconcilerConfig;
pub use error::ReconcileError;
pub use fs_reconciler::FsReconciler;
pub use traits::Reconciler;
pub use types::{Action, ReconcileOptions, SkipReason};
