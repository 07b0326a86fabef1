//! Mock reconciler for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::placement::Destination;
use crate::reconciler::{Action, ReconcileError, ReconcileOptions, Reconciler, SkipReason};

/// A recorded reconcile call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The source file.
    pub source: PathBuf,
    /// The computed destination, if any.
    pub destination: Option<Destination>,
    /// The options the call was made with.
    pub options: ReconcileOptions,
    /// Whether the call succeeded.
    pub success: bool,
}

/// Mock implementation of the Reconciler trait.
///
/// Never touches the filesystem. Reports the action a fresh destination
/// would get (`Moved`, `Copied` or their dry-run variants) unless a failure
/// was configured for the source path.
#[derive(Debug, Clone, Default)]
pub struct MockReconciler {
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    failing_sources: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MockReconciler {
    /// Create a new mock reconciler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of calls performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Make every call for `source` fail with an I/O error.
    pub async fn fail_for(&self, source: impl Into<PathBuf>) {
        self.failing_sources.write().await.insert(source.into());
    }

    fn planned_action(destination: Option<&Destination>, options: &ReconcileOptions) -> Action {
        if destination.is_none() {
            return Action::Skipped(SkipReason::Unclassified);
        }
        match (options.move_files, options.dry_run) {
            (true, true) => Action::WouldMove,
            (true, false) => Action::Moved,
            (false, true) => Action::WouldCopy,
            (false, false) => Action::Copied,
        }
    }
}

#[async_trait]
impl Reconciler for MockReconciler {
    fn name(&self) -> &str {
        "mock"
    }

    async fn reconcile(
        &self,
        source: &Path,
        destination: Option<&Destination>,
        options: &ReconcileOptions,
    ) -> Result<Action, ReconcileError> {
        let fails = self.failing_sources.read().await.contains(source);

        self.calls.write().await.push(RecordedCall {
            source: source.to_path_buf(),
            destination: destination.cloned(),
            options: *options,
            success: !fails,
        });

        if fails {
            return Err(ReconcileError::Io(std::io::Error::other(
                "mock reconcile failure",
            )));
        }
        Ok(Self::planned_action(destination, options))
    }
}
