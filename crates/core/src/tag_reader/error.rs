//! Error types for the tag reader module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading tags.
#[derive(Debug, Error)]
pub enum TagReadError {
    /// The file is not a container this reader understands.
    #[error("Unsupported container: {path}")]
    UnsupportedContainer { path: PathBuf },

    /// The container was recognised but could not be parsed.
    #[error("Corrupt container {path}: {reason}")]
    CorruptContainer { path: PathBuf, reason: String },

    /// The file could not be opened or read.
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TagReadError {
    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::UnsupportedContainer { path }
            | Self::CorruptContainer { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}
