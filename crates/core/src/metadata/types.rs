//! Types for the metadata module.

/// `stik` value for a movie.
pub const MEDIA_KIND_MOVIE: u8 = 9;

/// `stik` value for a TV show episode.
pub const MEDIA_KIND_TV_SHOW: u8 = 10;

/// What a tagged file represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A feature film.
    Movie,
    /// A single TV episode (or a part of one).
    TvShow,
    /// Neither or both signals were present.
    Unclassified,
}

impl MediaKind {
    /// Resolves the two independent tag signals into a kind.
    ///
    /// Exactly one signal must be set; anything else is `Unclassified`.
    pub fn from_signals(is_movie: bool, is_tv_show: bool) -> Self {
        match (is_movie, is_tv_show) {
            (true, false) => Self::Movie,
            (false, true) => Self::TvShow,
            _ => Self::Unclassified,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::TvShow => write!(f, "tv show"),
            Self::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Raw iTunes-style metadata extracted from a container.
///
/// Nothing here is validated; absent numeric atoms are already defaulted to 0
/// where the placement rules expect it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppleMetadata {
    /// The `stik` media kind byte, if present.
    pub media_kind: Option<u8>,
    /// Movie or episode title.
    pub title: Option<String>,
    /// Release year.
    pub year: Option<u32>,
    /// Every value of the show name atom.
    pub show_names: Vec<String>,
    /// Season number, 0 when absent.
    pub season_number: u32,
    /// Episode number, 0 when absent.
    pub episode_number: u32,
    /// Free-text work annotation.
    pub work: Option<String>,
    /// Content id, used as the part index of a multi-part episode.
    pub content_part: Option<u32>,
}

impl AppleMetadata {
    /// Whether the media kind marks a movie.
    pub fn is_movie(&self) -> bool {
        self.media_kind == Some(MEDIA_KIND_MOVIE)
    }

    /// Whether the media kind marks a TV show.
    pub fn is_tv_show(&self) -> bool {
        self.media_kind == Some(MEDIA_KIND_TV_SHOW)
    }
}

/// Normalised metadata for one file.
///
/// Built once per scanned file and consumed by placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    kind: MediaKind,
    title: String,
    year: Option<u32>,
    show_name: String,
    season_number: u32,
    episode_number: u32,
    content_part: Option<u32>,
    work: Option<String>,
}

impl MetadataRecord {
    /// Validates raw tag data into a record.
    pub fn from_apple(raw: AppleMetadata) -> Self {
        let kind = MediaKind::from_signals(raw.is_movie(), raw.is_tv_show());
        let work = raw
            .work
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty());

        Self {
            kind,
            title: raw.title.unwrap_or_default(),
            year: raw.year,
            show_name: raw.show_names.join("; "),
            season_number: raw.season_number,
            episode_number: raw.episode_number,
            content_part: raw.content_part,
            work,
        }
    }

    /// Starts a movie record, mostly useful for tests and callers that do
    /// not read tags from a container.
    pub fn movie(title: impl Into<String>, year: Option<u32>) -> Self {
        Self {
            kind: MediaKind::Movie,
            title: title.into(),
            year,
            show_name: String::new(),
            season_number: 0,
            episode_number: 0,
            content_part: None,
            work: None,
        }
    }

    /// Starts a TV episode record.
    pub fn episode(
        show_names: &[&str],
        season_number: u32,
        episode_number: u32,
        title: impl Into<String>,
    ) -> Self {
        Self {
            kind: MediaKind::TvShow,
            title: title.into(),
            year: None,
            show_name: show_names.join("; "),
            season_number,
            episode_number,
            content_part: None,
            work: None,
        }
    }

    /// Returns a copy carrying the given work annotation (trimmed, dropped when blank).
    pub fn with_work(mut self, work: impl AsRef<str>) -> Self {
        let trimmed = work.as_ref().trim();
        self.work = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Returns a copy marked as the given part of a multi-part episode.
    pub fn with_content_part(mut self, part: u32) -> Self {
        self.content_part = Some(part);
        self
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> Option<u32> {
        self.year
    }

    /// Show names joined with `"; "`.
    pub fn show_name(&self) -> &str {
        &self.show_name
    }

    pub fn season_number(&self) -> u32 {
        self.season_number
    }

    pub fn episode_number(&self) -> u32 {
        self.episode_number
    }

    /// The part index, only when present and non-zero.
    pub fn content_part(&self) -> Option<u32> {
        self.content_part.filter(|part| *part != 0)
    }

    /// The trimmed work annotation, never empty.
    pub fn work(&self) -> Option<&str> {
        self.work.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: Option<u8>) -> AppleMetadata {
        AppleMetadata {
            media_kind: kind,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_signals() {
        assert_eq!(MediaKind::from_signals(true, false), MediaKind::Movie);
        assert_eq!(MediaKind::from_signals(false, true), MediaKind::TvShow);
        assert_eq!(MediaKind::from_signals(true, true), MediaKind::Unclassified);
        assert_eq!(MediaKind::from_signals(false, false), MediaKind::Unclassified);
    }

    #[test]
    fn test_media_kind_byte() {
        assert!(raw(Some(9)).is_movie());
        assert!(raw(Some(10)).is_tv_show());
        assert!(!raw(Some(1)).is_movie());
        assert!(!raw(None).is_tv_show());
    }

    #[test]
    fn test_record_kind_from_byte() {
        assert_eq!(MetadataRecord::from_apple(raw(Some(9))).kind(), MediaKind::Movie);
        assert_eq!(MetadataRecord::from_apple(raw(Some(10))).kind(), MediaKind::TvShow);
        assert_eq!(
            MetadataRecord::from_apple(raw(Some(6))).kind(),
            MediaKind::Unclassified
        );
        assert_eq!(MetadataRecord::from_apple(raw(None)).kind(), MediaKind::Unclassified);
    }

    #[test]
    fn test_record_joins_show_names() {
        let record = MetadataRecord::from_apple(AppleMetadata {
            media_kind: Some(10),
            show_names: vec!["Beta".to_string(), "Gamma".to_string()],
            ..Default::default()
        });
        assert_eq!(record.show_name(), "Beta; Gamma");
    }

    #[test]
    fn test_record_trims_work() {
        let record = MetadataRecord::from_apple(AppleMetadata {
            media_kind: Some(9),
            work: Some("  Director's Cut \n".to_string()),
            ..Default::default()
        });
        assert_eq!(record.work(), Some("Director's Cut"));

        let blank = MetadataRecord::from_apple(AppleMetadata {
            media_kind: Some(9),
            work: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(blank.work(), None);
    }

    #[test]
    fn test_zero_content_part_is_absent() {
        let record = MetadataRecord::episode(&["Beta"], 1, 1, "Pilot").with_content_part(0);
        assert_eq!(record.content_part(), None);
        let record = record.with_content_part(2);
        assert_eq!(record.content_part(), Some(2));
    }

    #[test]
    fn test_missing_title_is_empty() {
        let record = MetadataRecord::from_apple(raw(Some(9)));
        assert_eq!(record.title(), "");
        assert_eq!(record.year(), None);
    }
}
