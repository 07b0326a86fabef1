//! Organizer implementation.

use std::io::ErrorKind;
use std::path::Path;

use tracing::instrument::WithSubscriber;
use tracing::{debug, error, info, info_span, Dispatch, Instrument};

use crate::metadata::MetadataRecord;
use crate::placement::{build_destination, PlacementOptions};
use crate::reconciler::{ReconcileError, ReconcileOptions, Reconciler};
use crate::tag_reader::{TagReadError, TagReader};
use crate::walker::{walk, CandidateFile};

use super::error::OrganizeError;
use super::types::{FileOutcome, RunSummary, UnreadableReason};

/// Sorts one source tree into the library layout.
pub struct Organizer<R: TagReader, C: Reconciler> {
    reader: R,
    reconciler: C,
    options: PlacementOptions,
    fail_fast: bool,
    dispatch: Option<Dispatch>,
}

impl<R: TagReader, C: Reconciler> Organizer<R, C> {
    /// Creates a new organizer.
    pub fn new(reader: R, reconciler: C, options: PlacementOptions) -> Self {
        Self {
            reader,
            reconciler,
            options,
            fail_fast: false,
            dispatch: None,
        }
    }

    /// Abort the run on the first reconcile error instead of recording it.
    pub fn with_fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Sends every event of a run to `dispatch` instead of the default
    /// subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn options(&self) -> &PlacementOptions {
        &self.options
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn reconciler(&self) -> &C {
        &self.reconciler
    }

    /// Processes every file under `source`.
    pub async fn run(&self, source: &Path) -> Result<RunSummary, OrganizeError> {
        match &self.dispatch {
            Some(dispatch) => self.run_walk(source).with_subscriber(dispatch.clone()).await,
            None => self.run_walk(source).await,
        }
    }

    async fn run_walk(&self, source: &Path) -> Result<RunSummary, OrganizeError> {
        match tokio::fs::metadata(source).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(OrganizeError::NotADirectory {
                    path: source.to_path_buf(),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(OrganizeError::SourceMissing {
                    path: source.to_path_buf(),
                })
            }
            Err(e) => return Err(OrganizeError::Io(e)),
        }

        let span = info_span!(
            "organize",
            source = %source.display(),
            dry_run = self.options.dry_run,
            recursive = self.options.recursive,
        );

        async {
            let mut summary = RunSummary::default();

            for file in walk(source, self.options.recursive) {
                summary.scanned += 1;
                match self.process_file(&file).await {
                    Ok(outcome) => summary.record(&outcome),
                    Err(e) if self.fail_fast => {
                        return Err(OrganizeError::Reconcile {
                            path: file.path().to_path_buf(),
                            source: e,
                        });
                    }
                    Err(e) => {
                        error!(file = %file.path().display(), error = %e, "Failed to reconcile");
                        summary.record_failure(file.path().to_path_buf(), &e);
                    }
                }
            }

            info!(%summary, "Finished");
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    /// Takes one file from scanned to a terminal state.
    pub async fn process_file(&self, file: &CandidateFile) -> Result<FileOutcome, ReconcileError> {
        if file.is_empty() {
            debug!(file = %file.name(), "Skipping empty file");
            return Ok(FileOutcome::Empty);
        }

        let record = match self.read_record(file.path()).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(file = %file.name(), "Found non-Apple tag format");
                return Ok(FileOutcome::Untagged);
            }
            Err(e) => {
                match &e {
                    TagReadError::UnsupportedContainer { .. } => {
                        debug!(
                            file = %file.name(),
                            extension = %file.extension(),
                            "Unsupported file"
                        )
                    }
                    TagReadError::CorruptContainer { reason, .. } => {
                        debug!(file = %file.name(), %reason, "Corrupt file")
                    }
                    TagReadError::Io { source, .. } => {
                        debug!(file = %file.name(), error = %source, "Unreadable file")
                    }
                }
                return Ok(FileOutcome::Unreadable(UnreadableReason::from(&e)));
            }
        };

        let kind = record.kind();
        let destination = build_destination(&record, file.path(), &self.options);
        if destination.is_none() {
            info!(file = %file.name(), "Failed to match file to either movie or TV show");
        }

        let action = self
            .reconciler
            .reconcile(
                file.path(),
                destination.as_ref(),
                &ReconcileOptions::from(&self.options),
            )
            .await?;

        Ok(FileOutcome::Reconciled {
            kind,
            destination,
            action,
        })
    }

    /// Reads and validates the tags of `path`. The reader has released the
    /// file by the time this returns.
    async fn read_record(&self, path: &Path) -> Result<Option<MetadataRecord>, TagReadError> {
        Ok(self.reader.read(path).await?.map(MetadataRecord::from_apple))
    }
}
