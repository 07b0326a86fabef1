//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the collaborator traits,
//! allowing the organizer to be exercised without real media files.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelver_core::testing::{MockReconciler, MockTagReader};
//!
//! let reader = MockTagReader::new();
//! reader.set_metadata("/in/alpha.mp4", fixtures::movie("Alpha", 2001));
//!
//! let organizer = Organizer::new(reader, MockReconciler::new(), options);
//! let summary = organizer.run(Path::new("/in")).await?;
//! ```

mod mock_reconciler;
mod mock_tag_reader;

pub use mock_reconciler::{MockReconciler, RecordedCall};
pub use mock_tag_reader::MockTagReader;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::metadata::{AppleMetadata, MEDIA_KIND_MOVIE, MEDIA_KIND_TV_SHOW};

    /// Raw tags of a movie.
    pub fn movie(title: &str, year: u32) -> AppleMetadata {
        AppleMetadata {
            media_kind: Some(MEDIA_KIND_MOVIE),
            title: Some(title.to_string()),
            year: Some(year),
            ..Default::default()
        }
    }

    /// Raw tags of a TV episode.
    pub fn episode(show: &str, season: u32, episode: u32, title: &str) -> AppleMetadata {
        AppleMetadata {
            media_kind: Some(MEDIA_KIND_TV_SHOW),
            title: Some(title.to_string()),
            show_names: vec![show.to_string()],
            season_number: season,
            episode_number: episode,
            ..Default::default()
        }
    }

    /// A minimal MP4 container, `ftyp` plus `moov.udta.meta.ilst`, carrying
    /// `tags` as iTunes atoms.
    pub fn tagged_mp4(tags: &AppleMetadata) -> Vec<u8> {
        let mut items = Vec::new();
        if let Some(kind) = tags.media_kind {
            items.push(ilst_item(b"stik", BE_SIGNED, &[&[kind]]));
        }
        if let Some(title) = &tags.title {
            items.push(ilst_item(b"\xa9nam", UTF8, &[title.as_bytes()]));
        }
        if let Some(year) = tags.year {
            items.push(ilst_item(b"\xa9day", UTF8, &[year.to_string().as_bytes()]));
        }
        if !tags.show_names.is_empty() {
            let names: Vec<&[u8]> = tags.show_names.iter().map(|name| name.as_bytes()).collect();
            items.push(ilst_item(b"tvsh", UTF8, &names));
        }
        if tags.season_number != 0 {
            items.push(ilst_item(b"tvsn", BE_SIGNED, &[&tags.season_number.to_be_bytes()]));
        }
        if tags.episode_number != 0 {
            items.push(ilst_item(b"tves", BE_SIGNED, &[&tags.episode_number.to_be_bytes()]));
        }
        if let Some(work) = &tags.work {
            items.push(ilst_item(b"\xa9wrk", UTF8, &[work.as_bytes()]));
        }
        if let Some(part) = tags.content_part {
            items.push(ilst_item(b"cnID", BE_SIGNED, &[&part.to_be_bytes()]));
        }

        let mut meta = vec![0; 4];
        meta.extend_from_slice(&mp4_box(b"ilst", &items.concat()));
        let moov = mp4_box(b"moov", &mp4_box(b"udta", &mp4_box(b"meta", &meta)));

        let mut file = ftyp();
        file.extend_from_slice(&moov);
        file
    }

    /// An MP4 container whose `moov` has no metadata.
    pub fn untagged_mp4() -> Vec<u8> {
        let mut file = ftyp();
        file.extend_from_slice(&mp4_box(b"moov", &mp4_box(b"free", &[])));
        file
    }

    const UTF8: u32 = 1;
    const BE_SIGNED: u32 = 21;

    fn ftyp() -> Vec<u8> {
        mp4_box(b"ftyp", b"M4V \0\0\0\0M4V isom")
    }

    fn mp4_box(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut bytes = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(name);
        bytes.extend_from_slice(payload);
        bytes
    }

    /// An `ilst` item with one `data` box per value.
    fn ilst_item(name: &[u8; 4], type_code: u32, values: &[&[u8]]) -> Vec<u8> {
        let mut payload = Vec::new();
        for value in values {
            let mut data = type_code.to_be_bytes().to_vec();
            data.extend_from_slice(&[0; 4]);
            data.extend_from_slice(value);
            payload.extend_from_slice(&mp4_box(b"data", &data));
        }
        mp4_box(name, &payload)
    }
}
