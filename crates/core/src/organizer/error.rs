//! Error types for the organizer module.

use std::path::PathBuf;
use thiserror::Error;

use crate::reconciler::ReconcileError;

/// Errors that stop a whole run.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The source directory does not exist.
    #[error("Source directory not found: {path}")]
    SourceMissing { path: PathBuf },

    /// The source exists but is not a directory.
    #[error("Source is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Reconciling a file failed and the run is fail-fast.
    #[error("Failed to reconcile {path}")]
    Reconcile {
        path: PathBuf,
        #[source]
        source: ReconcileError,
    },

    /// I/O error while inspecting the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
