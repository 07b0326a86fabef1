//! Configuration for the reconciler module.

use serde::{Deserialize, Serialize};

/// Configuration for the filesystem reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Buffer size for file copies in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Permissions for created directories (Unix only, octal).
    #[serde(default = "default_dir_mode")]
    pub directory_mode: u32,
}

fn default_buffer_size() -> usize {
    8 * 1024 * 1024 // 8 MB
}

fn default_dir_mode() -> u32 {
    0o755
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            directory_mode: default_dir_mode(),
        }
    }
}

impl ReconcilerConfig {
    /// Sets the buffer size for copies.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the mode of created directories.
    pub fn with_directory_mode(mut self, mode: u32) -> Self {
        self.directory_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.buffer_size, 8 * 1024 * 1024);
        assert_eq!(config.directory_mode, 0o755);
    }

    #[test]
    fn test_config_builder() {
        let config = ReconcilerConfig::default()
            .with_buffer_size(1024)
            .with_directory_mode(0o700);

        assert_eq!(config.buffer_size, 1024);
        assert_eq!(config.directory_mode, 0o700);
    }
}
