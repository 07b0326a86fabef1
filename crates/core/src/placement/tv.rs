//! TV episode placement.

use std::path::Path;

use crate::metadata::MetadataRecord;
use crate::sanitize::{sanitize_file_name, sanitize_path, sanitize_text};
use crate::walker::file_extension;

use super::source_directory;
use super::types::{Destination, PlacementOptions};

/// Builds the destination for a TV episode.
///
/// A non-zero content part replaces the episode title with ` - partN`.
pub fn tv_destination(
    record: &MetadataRecord,
    source: &Path,
    options: &PlacementOptions,
) -> Destination {
    let show_name = sanitize_text(record.show_name());
    let season = record.season_number();
    let episode = record.episode_number();

    let directory = if options.in_place {
        source_directory(source).to_path_buf()
    } else {
        options
            .tv_root
            .join("TV Shows")
            .join(&show_name)
            .join(format!("Season {:02}", season))
    };

    let mut stem = format!("{} - s{:02}e{:02}", show_name, season, episode);
    match record.content_part() {
        Some(part) => stem.push_str(&format!(" - part{}", part)),
        None => {
            stem.push_str(" - ");
            stem.push_str(&sanitize_text(record.title()));
        }
    }
    if let Some(work) = record.work() {
        stem.push_str(" - ");
        stem.push_str(&sanitize_text(work));
    }

    let file_name = sanitize_file_name(&format!("{}{}", stem, file_extension(source)));
    Destination::new(sanitize_path(&directory), file_name)
}
