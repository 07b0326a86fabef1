//! Source tree enumeration.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// A regular file found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    path: PathBuf,
    len: u64,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>, len: u64) -> Self {
        Self {
            path: path.into(),
            len,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes at the time of the walk.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> String {
        file_extension(&self.path)
    }
}

/// Extension of `path` with its leading dot, empty when there is none.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Lazily enumerates the regular files under `root`.
///
/// Only the top level is visited unless `recursive` is set. Hidden entries
/// (dot files and dot directories) are skipped, as are entries that cannot
/// be read; neither stops the walk.
pub fn walk(root: &Path, recursive: bool) -> impl Iterator<Item = CandidateFile> {
    let mut walker = WalkDir::new(root).min_depth(1).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "Skipping inaccessible entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| match entry.metadata() {
            Ok(metadata) => Some(CandidateFile::new(entry.into_path(), metadata.len())),
            Err(e) => {
                debug!(error = %e, "Skipping file without readable metadata");
                None
            }
        })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && is_hidden_name(entry.file_name())
}

/// Whether `name` looks like a hidden entry.
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.to_str().map(|n| n.starts_with('.')).unwrap_or(false)
}
