//! Types for the placement module.

use std::path::{Path, PathBuf};

/// Text rendered for a movie without a year.
pub const DEFAULT_MISSING_YEAR: &str = "0";

/// Per-run placement settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOptions {
    /// Root under which `Movies/` is created.
    pub movies_root: PathBuf,
    /// Root under which `TV Shows/` is created.
    pub tv_root: PathBuf,
    /// Keep files in their current directory, only renaming them.
    pub in_place: bool,
    /// Descend into subdirectories of the source.
    pub recursive: bool,
    /// Move files instead of copying them.
    pub move_files: bool,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
    /// Text used in place of a missing movie year.
    pub missing_year: String,
}

impl PlacementOptions {
    /// Creates options with both roots set and every flag off.
    pub fn new(movies_root: impl Into<PathBuf>, tv_root: impl Into<PathBuf>) -> Self {
        Self {
            movies_root: movies_root.into(),
            tv_root: tv_root.into(),
            in_place: false,
            recursive: false,
            move_files: false,
            dry_run: false,
            missing_year: DEFAULT_MISSING_YEAR.to_string(),
        }
    }

    /// Resolves optional roots: a missing root falls back to the other one,
    /// and `fallback` is used when both are missing.
    pub fn from_roots(
        movies_root: Option<PathBuf>,
        tv_root: Option<PathBuf>,
        fallback: impl Into<PathBuf>,
    ) -> Self {
        let (movies, tv) = match (movies_root, tv_root) {
            (Some(movies), Some(tv)) => (movies, tv),
            (Some(root), None) | (None, Some(root)) => (root.clone(), root),
            (None, None) => {
                let root = fallback.into();
                (root.clone(), root)
            }
        };
        Self::new(movies, tv)
    }

    pub fn with_in_place(mut self, enabled: bool) -> Self {
        self.in_place = enabled;
        self
    }

    pub fn with_recursive(mut self, enabled: bool) -> Self {
        self.recursive = enabled;
        self
    }

    pub fn with_move(mut self, enabled: bool) -> Self {
        self.move_files = enabled;
        self
    }

    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Sets the text rendered for a missing movie year.
    pub fn with_missing_year(mut self, text: impl Into<String>) -> Self {
        self.missing_year = text.into();
        self
    }
}

/// A computed, not yet verified, target location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    directory: PathBuf,
    file_name: String,
}

impl Destination {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The full destination path.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path().display())
    }
}
