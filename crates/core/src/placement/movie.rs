//! Movie placement.

use std::path::Path;

use crate::metadata::MetadataRecord;
use crate::sanitize::{sanitize_file_name, sanitize_path, sanitize_text};
use crate::walker::file_extension;

use super::source_directory;
use super::types::{Destination, PlacementOptions};

/// Builds the destination for a movie.
///
/// A work annotation nests the file in a per-title folder (outside in-place
/// mode) and is appended to the name as ` - {work}`.
pub fn movie_destination(
    record: &MetadataRecord,
    source: &Path,
    options: &PlacementOptions,
) -> Destination {
    let mut directory = if options.in_place {
        source_directory(source).to_path_buf()
    } else {
        options.movies_root.join("Movies")
    };

    let year = record
        .year()
        .map(|year| year.to_string())
        .unwrap_or_else(|| options.missing_year.clone());
    let mut stem = format!("{} ({})", sanitize_text(record.title()), year);

    if let Some(work) = record.work() {
        if !options.in_place {
            directory.push(&stem);
        }
        stem.push_str(" - ");
        stem.push_str(&sanitize_text(work));
    }

    let file_name = sanitize_file_name(&format!("{}{}", stem, file_extension(source)));
    Destination::new(sanitize_path(&directory), file_name)
}
