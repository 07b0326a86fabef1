//! Types for the organizer module.

use serde::Serialize;
use std::path::PathBuf;

use crate::metadata::MediaKind;
use crate::placement::Destination;
use crate::reconciler::{Action, SkipReason};
use crate::tag_reader::TagReadError;

/// Why a file's tags could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadableReason {
    UnsupportedContainer,
    CorruptContainer,
    Io,
}

impl From<&TagReadError> for UnreadableReason {
    fn from(error: &TagReadError) -> Self {
        match error {
            TagReadError::UnsupportedContainer { .. } => Self::UnsupportedContainer,
            TagReadError::CorruptContainer { .. } => Self::CorruptContainer,
            TagReadError::Io { .. } => Self::Io,
        }
    }
}

/// Terminal state of one scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Zero-length file, skipped before any read.
    Empty,
    /// The container could not be read.
    Unreadable(UnreadableReason),
    /// The container has no Apple tag.
    Untagged,
    /// The file went through the reconciler.
    Reconciled {
        kind: MediaKind,
        destination: Option<Destination>,
        action: Action,
    },
}

impl FileOutcome {
    /// The reconciler's action, if the file got that far.
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Reconciled { action, .. } => Some(*action),
            _ => None,
        }
    }
}

/// A file whose reconciliation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub scanned: usize,
    pub empty: usize,
    pub unreadable: usize,
    pub untagged: usize,
    pub unclassified: usize,
    pub same_length: usize,
    pub moved: usize,
    pub copied: usize,
    pub replaced_by_move: usize,
    pub replaced_by_copy: usize,
    pub would_move: usize,
    pub would_copy: usize,
    pub would_replace_by_move: usize,
    pub would_replace_by_copy: usize,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    /// Counts an outcome. `scanned` is tracked separately by the caller.
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Empty => self.empty += 1,
            FileOutcome::Unreadable(_) => self.unreadable += 1,
            FileOutcome::Untagged => self.untagged += 1,
            FileOutcome::Reconciled { action, .. } => match action {
                Action::Skipped(SkipReason::Unclassified) => self.unclassified += 1,
                Action::Skipped(SkipReason::SameLength) => self.same_length += 1,
                Action::Moved => self.moved += 1,
                Action::Copied => self.copied += 1,
                Action::ReplacedByMove => self.replaced_by_move += 1,
                Action::ReplacedByCopy => self.replaced_by_copy += 1,
                Action::WouldMove => self.would_move += 1,
                Action::WouldCopy => self.would_copy += 1,
                Action::WouldReplaceByMove => self.would_replace_by_move += 1,
                Action::WouldReplaceByCopy => self.would_replace_by_copy += 1,
            },
        }
    }

    pub fn record_failure(&mut self, path: PathBuf, error: impl std::fmt::Display) {
        self.failures.push(FileFailure {
            path,
            error: error.to_string(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Files skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.empty + self.unreadable + self.untagged + self.unclassified + self.same_length
    }

    /// Files actually written.
    pub fn placed(&self) -> usize {
        self.moved + self.copied + self.replaced_by_move + self.replaced_by_copy
    }

    /// Files that would have been written under dry-run.
    pub fn planned(&self) -> usize {
        self.would_move + self.would_copy + self.would_replace_by_move + self.would_replace_by_copy
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} scanned, {} placed, {} planned, {} skipped, {} failed",
            self.scanned,
            self.placed(),
            self.planned(),
            self.skipped(),
            self.failures.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconciled(action: Action) -> FileOutcome {
        FileOutcome::Reconciled {
            kind: MediaKind::Movie,
            destination: None,
            action,
        }
    }

    #[test]
    fn test_record_outcomes() {
        let mut summary = RunSummary::default();
        summary.record(&FileOutcome::Empty);
        summary.record(&FileOutcome::Unreadable(UnreadableReason::CorruptContainer));
        summary.record(&FileOutcome::Untagged);
        summary.record(&reconciled(Action::Skipped(SkipReason::Unclassified)));
        summary.record(&reconciled(Action::Skipped(SkipReason::SameLength)));
        summary.record(&reconciled(Action::Moved));
        summary.record(&reconciled(Action::ReplacedByCopy));
        summary.record(&reconciled(Action::WouldCopy));

        assert_eq!(summary.skipped(), 5);
        assert_eq!(summary.placed(), 2);
        assert_eq!(summary.planned(), 1);
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_display() {
        let mut summary = RunSummary {
            scanned: 3,
            ..Default::default()
        };
        summary.record(&reconciled(Action::Copied));
        summary.record_failure(PathBuf::from("/a.mp4"), "disk full");
        assert_eq!(
            summary.to_string(),
            "3 scanned, 1 placed, 0 planned, 0 skipped, 1 failed"
        );
    }

    #[test]
    fn test_unreadable_reason_from_error() {
        let error = TagReadError::UnsupportedContainer {
            path: PathBuf::from("/a.txt"),
        };
        assert_eq!(
            UnreadableReason::from(&error),
            UnreadableReason::UnsupportedContainer
        );
    }
}
