use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::placement::{PlacementOptions, DEFAULT_MISSING_YEAR};
use crate::reconciler::ReconcilerConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Resolves the per-run placement options for `source`.
    ///
    /// A missing root falls back to the other one; with neither set the
    /// source directory is used (only meaningful in in-place mode).
    pub fn placement_options(&self, source: &Path) -> PlacementOptions {
        let placement = &self.placement;
        PlacementOptions::from_roots(placement.movies.clone(), placement.tv.clone(), source)
            .with_in_place(placement.in_place)
            .with_recursive(placement.recursive)
            .with_move(placement.move_files)
            .with_dry_run(placement.dry_run)
            .with_missing_year(placement.missing_year.clone())
    }
}

/// Placement configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlacementConfig {
    /// Root for `Movies/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<PathBuf>,
    /// Root for `TV Shows/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv: Option<PathBuf>,
    #[serde(default)]
    pub in_place: bool,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default, rename = "move")]
    pub move_files: bool,
    #[serde(default)]
    pub dry_run: bool,
    /// Text rendered for a movie without a year
    #[serde(default = "default_missing_year")]
    pub missing_year: String,
    /// Abort the whole run on the first filesystem error
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            movies: None,
            tv: None,
            in_place: false,
            recursive: false,
            move_files: false,
            dry_run: false,
            missing_year: default_missing_year(),
            fail_fast: false,
        }
    }
}

fn default_missing_year() -> String {
    DEFAULT_MISSING_YEAR.to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.placement.missing_year, "0");
        assert!(!config.placement.move_files);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_placement_options_single_root() {
        let mut config = Config::default();
        config.placement.tv = Some(PathBuf::from("/library"));
        config.placement.move_files = true;

        let options = config.placement_options(Path::new("/downloads"));
        assert_eq!(options.movies_root, PathBuf::from("/library"));
        assert_eq!(options.tv_root, PathBuf::from("/library"));
        assert!(options.move_files);
    }

    #[test]
    fn test_placement_options_in_place_without_roots() {
        let mut config = Config::default();
        config.placement.in_place = true;

        let options = config.placement_options(Path::new("/downloads"));
        assert!(options.in_place);
        assert_eq!(options.movies_root, PathBuf::from("/downloads"));
    }
}
