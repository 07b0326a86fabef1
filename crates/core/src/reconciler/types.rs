//! Types for the reconciler module.

use crate::placement::PlacementOptions;

/// The subset of placement options the reconciler acts on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Move instead of copy.
    pub move_files: bool,
    /// Files are renamed within their own directory.
    pub in_place: bool,
    /// Report only, never touch the filesystem.
    pub dry_run: bool,
}

impl From<&PlacementOptions> for ReconcileOptions {
    fn from(options: &PlacementOptions) -> Self {
        Self {
            move_files: options.move_files,
            in_place: options.in_place,
            dry_run: options.dry_run,
        }
    }
}

/// Why a file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No destination could be computed.
    Unclassified,
    /// The destination exists with the same byte length.
    SameLength,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unclassified => write!(f, "unclassified"),
            Self::SameLength => write!(f, "same length"),
        }
    }
}

/// Outcome of reconciling one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Skipped(SkipReason),
    /// Renamed (or moved across filesystems) to a free destination.
    Moved,
    /// Copied to a free destination.
    Copied,
    /// Copied over a conflicting destination, then the source was removed.
    ReplacedByMove,
    /// Copied over a conflicting destination.
    ReplacedByCopy,
    WouldMove,
    WouldCopy,
    WouldReplaceByMove,
    WouldReplaceByCopy,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
            Self::Moved => write!(f, "moved"),
            Self::Copied => write!(f, "copied"),
            Self::ReplacedByMove => write!(f, "replaced by move"),
            Self::ReplacedByCopy => write!(f, "replaced by copy"),
            Self::WouldMove => write!(f, "would move"),
            Self::WouldCopy => write!(f, "would copy"),
            Self::WouldReplaceByMove => write!(f, "would replace by move"),
            Self::WouldReplaceByCopy => write!(f, "would replace by copy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_placement() {
        let placement = PlacementOptions::new("/m", "/t")
            .with_move(true)
            .with_dry_run(true);
        let options = ReconcileOptions::from(&placement);
        assert!(options.move_files);
        assert!(options.dry_run);
        assert!(!options.in_place);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(
            Action::Skipped(SkipReason::SameLength).to_string(),
            "skipped (same length)"
        );
        assert_eq!(Action::WouldMove.to_string(), "would move");
    }
}
