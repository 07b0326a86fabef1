//! Movie / TV show classification.

use crate::metadata::{AppleMetadata, MediaKind, MetadataRecord};

/// Classifies raw tag data from its movie and TV show signals.
pub fn classify_tags(tags: &AppleMetadata) -> MediaKind {
    MediaKind::from_signals(tags.is_movie(), tags.is_tv_show())
}

/// Classifies a validated record.
pub fn classify(record: &MetadataRecord) -> MediaKind {
    record.kind()
}
