//! Media metadata as read from a file's tags.
//!
//! [`AppleMetadata`] is the raw view a [`TagReader`](crate::tag_reader::TagReader)
//! produces. [`MetadataRecord`] is the validated, immutable record that
//! placement works from, with the media kind resolved into a single enum.

mod types;

pub use types::{AppleMetadata, MediaKind, MetadataRecord, MEDIA_KIND_MOVIE, MEDIA_KIND_TV_SHOW};
