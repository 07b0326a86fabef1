//! Placement: turning a metadata record into a destination path.
//!
//! Movies land in `<movies>/Movies/Title (Year).ext`, TV episodes in
//! `<tv>/TV Shows/Show/Season NN/Show - sNNeNN - Title.ext`. In in-place mode
//! the source file's own directory is kept and only the name is rewritten.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use shelver_core::metadata::MetadataRecord;
//! use shelver_core::placement::{build_destination, PlacementOptions};
//!
//! let options = PlacementOptions::new("/m", "/t");
//! let record = MetadataRecord::movie("Alpha", Some(2001));
//! let destination = build_destination(&record, Path::new("/in/alpha.mp4"), &options).unwrap();
//! assert_eq!(destination.path(), Path::new("/m/Movies/Alpha (2001).mp4"));
//! ```

mod movie;
mod tv;
mod types;

use std::path::Path;

use crate::classifier::classify;
use crate::metadata::{MediaKind, MetadataRecord};

pub use movie::movie_destination;
pub use tv::tv_destination;
pub use types::{Destination, PlacementOptions, DEFAULT_MISSING_YEAR};

/// Computes where `source` should live, or `None` when the record is
/// unclassified.
pub fn build_destination(
    record: &MetadataRecord,
    source: &Path,
    options: &PlacementOptions,
) -> Option<Destination> {
    match classify(record) {
        MediaKind::Movie => Some(movie_destination(record, source, options)),
        MediaKind::TvShow => Some(tv_destination(record, source, options)),
        MediaKind::Unclassified => None,
    }
}

/// The directory holding `source`.
fn source_directory(source: &Path) -> &Path {
    source.parent().unwrap_or_else(|| Path::new(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::AppleMetadata;

    #[test]
    fn test_unclassified_has_no_destination() {
        let record = MetadataRecord::from_apple(AppleMetadata::default());
        let options = PlacementOptions::new("/m", "/t");
        assert!(build_destination(&record, Path::new("/in/a.mp4"), &options).is_none());
    }

    #[test]
    fn test_dispatch_by_kind() {
        let options = PlacementOptions::new("/m", "/t");
        let movie = MetadataRecord::movie("Alpha", Some(2001));
        let episode = MetadataRecord::episode(&["Beta"], 1, 3, "Pilot");

        let movie_dest = build_destination(&movie, Path::new("/in/a.mp4"), &options).unwrap();
        let tv_dest = build_destination(&episode, Path::new("/in/b.mp4"), &options).unwrap();

        assert!(movie_dest.path().starts_with("/m/Movies"));
        assert!(tv_dest.path().starts_with("/t/TV Shows"));
    }

    #[test]
    fn test_deterministic() {
        let options = PlacementOptions::new("/m", "/t");
        let record = MetadataRecord::episode(&["Beta"], 2, 10, "Finale").with_work("Extended");
        let first = build_destination(&record, Path::new("/in/x.m4v"), &options);
        let second = build_destination(&record, Path::new("/in/x.m4v"), &options);
        assert_eq!(first, second);
    }
}
