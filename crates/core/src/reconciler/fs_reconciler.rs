//! File system reconciler implementation.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, DirBuilder, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info, warn};

use crate::placement::Destination;

use super::config::ReconcilerConfig;
use super::error::ReconcileError;
use super::traits::Reconciler;
use super::types::{Action, ReconcileOptions, SkipReason};

/// File system based reconciler implementation.
#[derive(Debug, Clone, Default)]
pub struct FsReconciler {
    config: ReconcilerConfig,
}

impl FsReconciler {
    /// Creates a new file system reconciler with the given configuration.
    pub fn new(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    /// Creates a reconciler with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ReconcilerConfig::default())
    }

    /// Length of the file at `path`, or `None` if it does not exist.
    async fn existing_len(path: &Path) -> Result<Option<u64>, ReconcileError> {
        match fs::metadata(path).await {
            Ok(meta) => Ok(Some(meta.len())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReconcileError::Io(e)),
        }
    }

    /// Attempts to move a file atomically (rename).
    ///
    /// Returns `Ok(false)` when source and destination live on different
    /// filesystems.
    async fn try_atomic_move(source: &Path, destination: &Path) -> Result<bool, std::io::Error> {
        match fs::rename(source, destination).await {
            Ok(()) => Ok(true),
            Err(e) => {
                // EXDEV is 18 on Linux
                if e.kind() == ErrorKind::CrossesDevices || e.raw_os_error() == Some(18) {
                    Ok(false)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Moves a file, falling back to copy and delete across filesystems.
    async fn move_file(&self, source: &Path, destination: &Path) -> Result<(), ReconcileError> {
        let moved = Self::try_atomic_move(source, destination)
            .await
            .map_err(|e| {
                ReconcileError::move_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

        if !moved {
            debug!(
                source = %source.display(),
                destination = %destination.display(),
                "Rename crosses filesystems, copying instead"
            );
            self.copy_file(source, destination).await?;
            self.remove_source(source).await?;
        }
        Ok(())
    }

    /// Copies a file, overwriting the destination. Returns the bytes written.
    ///
    /// The bytes go to a hidden staging file next to the destination, which
    /// is renamed over it once the copy is flushed. A failed copy leaves any
    /// existing destination untouched.
    async fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64, ReconcileError> {
        let staging = staging_path(destination);

        let result = match self.write_staging(source, destination, &staging).await {
            Ok(total_bytes) => fs::rename(&staging, destination)
                .await
                .map(|()| total_bytes)
                .map_err(|e| {
                    ReconcileError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
                }),
            Err(e) => Err(e),
        };

        if result.is_err() {
            if let Err(e) = fs::remove_file(&staging).await {
                if e.kind() != ErrorKind::NotFound {
                    warn!(
                        staging = %staging.display(),
                        error = %e,
                        "Failed to remove staging file"
                    );
                }
            }
        }
        result
    }

    /// Streams `source` into `staging`.
    async fn write_staging(
        &self,
        source: &Path,
        destination: &Path,
        staging: &Path,
    ) -> Result<u64, ReconcileError> {
        let source_file = File::open(source).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ReconcileError::SourceNotFound {
                    path: source.to_path_buf(),
                }
            } else {
                ReconcileError::Io(e)
            }
        })?;

        let staging_file = File::create(staging).await.map_err(|e| {
            ReconcileError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        let buffer_size = self.config.buffer_size.max(1);
        let mut reader = BufReader::with_capacity(buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(buffer_size, staging_file);

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; buffer_size];

        loop {
            let bytes_read = reader.read(&mut buffer).await.map_err(|e| {
                ReconcileError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            if bytes_read == 0 {
                break;
            }

            writer.write_all(&buffer[..bytes_read]).await.map_err(|e| {
                ReconcileError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            total_bytes += bytes_read as u64;
        }

        writer.flush().await.map_err(|e| {
            ReconcileError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        Ok(total_bytes)
    }

    /// Deletes the source after it has been copied, if it is still there.
    async fn remove_source(&self, source: &Path) -> Result<(), ReconcileError> {
        match fs::remove_file(source).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(source = %source.display(), "Source disappeared before it could be removed");
                Ok(())
            }
            Err(e) => Err(ReconcileError::CleanupFailed {
                path: source.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Creates the parent directories of `path`. Existing directories are fine.
    async fn ensure_parent_dir(&self, path: &Path) -> Result<(), ReconcileError> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(self.config.directory_mode);

        builder
            .create(parent)
            .await
            .map_err(|e| ReconcileError::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })
    }
}

/// Hidden sibling of `destination` that a copy is written to first.
fn staging_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{}.part", name))
}

#[async_trait]
impl Reconciler for FsReconciler {
    fn name(&self) -> &str {
        "fs"
    }

    async fn reconcile(
        &self,
        source: &Path,
        destination: Option<&Destination>,
        options: &ReconcileOptions,
    ) -> Result<Action, ReconcileError> {
        let Some(destination) = destination else {
            return Ok(Action::Skipped(SkipReason::Unclassified));
        };
        let target = destination.path();

        let source_len = Self::existing_len(source)
            .await?
            .ok_or_else(|| ReconcileError::SourceNotFound {
                path: source.to_path_buf(),
            })?;
        let target_len = Self::existing_len(&target).await?;

        if target_len == Some(source_len) {
            debug!(
                source = %source.display(),
                destination = %target.display(),
                "Source has the same length as destination"
            );
            return Ok(Action::Skipped(SkipReason::SameLength));
        }
        let target_exists = target_len.is_some();

        if options.move_files {
            info!(
                source = %source.display(),
                destination = %target.display(),
                dry_run = options.dry_run,
                "Moving"
            );
            let direct = !target_exists || options.in_place;

            if options.dry_run {
                return Ok(if direct {
                    Action::WouldMove
                } else {
                    Action::WouldReplaceByMove
                });
            }

            self.ensure_parent_dir(&target).await?;
            if direct {
                self.move_file(source, &target).await?;
                Ok(Action::Moved)
            } else {
                // The destination is only overwritten once the copy completes.
                self.copy_file(source, &target).await?;
                self.remove_source(source).await?;
                Ok(Action::ReplacedByMove)
            }
        } else {
            info!(
                source = %source.display(),
                destination = %target.display(),
                dry_run = options.dry_run,
                "Copying"
            );

            if options.dry_run {
                return Ok(if target_exists {
                    Action::WouldReplaceByCopy
                } else {
                    Action::WouldCopy
                });
            }

            self.ensure_parent_dir(&target).await?;
            self.copy_file(source, &target).await?;
            Ok(if target_exists {
                Action::ReplacedByCopy
            } else {
                Action::Copied
            })
        }
    }
}
