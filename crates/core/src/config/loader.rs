use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "SHELVER_CONFIG";

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "shelver.toml";

const ENV_PREFIX: &str = "SHELVER_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    extract(figment(path))
}

/// Load configuration from an optional file.
///
/// Defaults are overlaid by the file (an explicit `path` must exist, the
/// implicit `shelver.toml` may be absent) and then by `SHELVER_*` variables,
/// nested with `__` (`SHELVER_PLACEMENT__DRY_RUN=true`).
pub fn load_layered(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => extract(figment(Path::new(DEFAULT_CONFIG_FILE))),
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn figment(path: &Path) -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[placement]
movies = "/media/library"
move = true
missing_year = ""

[logging]
format = "json"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.placement.movies, Some(PathBuf::from("/media/library")));
        assert!(config.placement.move_files);
        assert_eq!(config.placement.missing_year, "");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let toml = r#"
[placement]
dry_run = "sometimes"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/shelver.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_layered_explicit_missing_file() {
        let result = load_layered(Some(Path::new("/nonexistent/shelver.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[placement]
tv = "/srv/tv"
recursive = true

[reconciler]
buffer_size = 65536
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.placement.tv, Some(PathBuf::from("/srv/tv")));
        assert!(config.placement.recursive);
        assert_eq!(config.reconciler.buffer_size, 65536);
        assert_eq!(config.reconciler.directory_mode, 0o755);
    }
}
