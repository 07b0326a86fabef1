//! MP4 (`ilst`) tag reader backed by lofty.

use async_trait::async_trait;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lofty::config::ParseOptions;
use lofty::file::{AudioFile, FileType};
use lofty::mp4::{AtomData, AtomIdent, Ilst, Mp4File};
use lofty::probe::Probe;

use crate::metadata::AppleMetadata;

use super::error::TagReadError;
use super::traits::TagReader;

const MEDIA_KIND: [u8; 4] = *b"stik";
const TITLE: [u8; 4] = *b"\xa9nam";
const RELEASE_DATE: [u8; 4] = *b"\xa9day";
const SHOW_NAME: [u8; 4] = *b"tvsh";
const SEASON_NUMBER: [u8; 4] = *b"tvsn";
const EPISODE_NUMBER: [u8; 4] = *b"tves";
const WORK: [u8; 4] = *b"\xa9wrk";
const CONTENT_ID: [u8; 4] = *b"cnID";

/// Reads iTunes-style metadata from MP4 family containers (`.mp4`, `.m4v`, ...).
#[derive(Debug, Clone, Default)]
pub struct Mp4TagReader;

impl Mp4TagReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TagReader for Mp4TagReader {
    fn name(&self) -> &str {
        "mp4"
    }

    async fn read(&self, path: &Path) -> Result<Option<AppleMetadata>, TagReadError> {
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || read_mp4(&owned))
            .await
            .map_err(|e| TagReadError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?
    }
}

/// Blocking read of one container. The file handle is dropped on return.
fn read_mp4(path: &Path) -> Result<Option<AppleMetadata>, TagReadError> {
    let io_error = |source| TagReadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let probe = Probe::new(BufReader::new(file))
        .guess_file_type()
        .map_err(io_error)?;

    if probe.file_type() != Some(FileType::Mp4) {
        return Err(TagReadError::UnsupportedContainer {
            path: path.to_path_buf(),
        });
    }

    let mut reader = probe.into_inner();
    let mp4 = Mp4File::read_from(&mut reader, ParseOptions::new().read_properties(false))
        .map_err(|e| TagReadError::CorruptContainer {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(mp4.ilst().map(metadata_from_ilst))
}

/// Collects the atoms placement cares about.
pub(crate) fn metadata_from_ilst(ilst: &Ilst) -> AppleMetadata {
    let release_date = texts(ilst, RELEASE_DATE);
    AppleMetadata {
        media_kind: integer(ilst, MEDIA_KIND).and_then(|kind| u8::try_from(kind).ok()),
        title: texts(ilst, TITLE).into_iter().next(),
        year: release_date.first().map(String::as_str).and_then(parse_year),
        show_names: texts(ilst, SHOW_NAME),
        season_number: integer(ilst, SEASON_NUMBER).unwrap_or(0),
        episode_number: integer(ilst, EPISODE_NUMBER).unwrap_or(0),
        work: texts(ilst, WORK).into_iter().next(),
        content_part: integer(ilst, CONTENT_ID),
    }
}

fn texts(ilst: &Ilst, fourcc: [u8; 4]) -> Vec<String> {
    let Some(atom) = ilst.get(&AtomIdent::Fourcc(fourcc)) else {
        return Vec::new();
    };
    atom.data()
        .filter_map(|data| match data {
            AtomData::UTF8(text) | AtomData::UTF16(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn integer(ilst: &Ilst, fourcc: [u8; 4]) -> Option<u32> {
    ilst.get(&AtomIdent::Fourcc(fourcc))?
        .data()
        .find_map(integer_value)
}

fn integer_value(data: &AtomData) -> Option<u32> {
    match data {
        AtomData::SignedInteger(value) => u32::try_from(*value).ok(),
        AtomData::UnsignedInteger(value) => Some(*value),
        AtomData::Unknown { data, .. } => big_endian(data),
        _ => None,
    }
}

/// Decodes a 1 to 4 byte big-endian payload.
fn big_endian(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 4 {
        return None;
    }
    Some(
        bytes
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)),
    )
}

/// Takes the leading digits of a release date (`2001`, `2001-05-04T07:00:00Z`).
fn parse_year(date: &str) -> Option<u32> {
    let digits: String = date
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use lofty::mp4::Atom;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn atom(fourcc: [u8; 4], data: AtomData) -> Atom<'static> {
        Atom::new(AtomIdent::Fourcc(fourcc), data)
    }

    #[test]
    fn test_metadata_from_movie_ilst() {
        let mut ilst = Ilst::default();
        ilst.insert(atom(MEDIA_KIND, AtomData::SignedInteger(9)));
        ilst.insert(atom(TITLE, AtomData::UTF8("Alpha".to_string())));
        ilst.insert(atom(RELEASE_DATE, AtomData::UTF8("2001-05-04T07:00:00Z".to_string())));
        ilst.insert(atom(WORK, AtomData::UTF8("Director's Cut".to_string())));

        let metadata = metadata_from_ilst(&ilst);
        assert!(metadata.is_movie());
        assert_eq!(metadata.title.as_deref(), Some("Alpha"));
        assert_eq!(metadata.year, Some(2001));
        assert_eq!(metadata.work.as_deref(), Some("Director's Cut"));
        assert_eq!(metadata.season_number, 0);
        assert_eq!(metadata.content_part, None);
    }

    #[test]
    fn test_metadata_from_episode_ilst() {
        let mut ilst = Ilst::default();
        ilst.insert(atom(MEDIA_KIND, AtomData::SignedInteger(10)));
        ilst.insert(atom(SHOW_NAME, AtomData::UTF8("Beta".to_string())));
        ilst.insert(atom(SEASON_NUMBER, AtomData::SignedInteger(1)));
        ilst.insert(atom(EPISODE_NUMBER, AtomData::UnsignedInteger(3)));
        ilst.insert(atom(TITLE, AtomData::UTF8("Pilot".to_string())));

        let metadata = metadata_from_ilst(&ilst);
        assert!(metadata.is_tv_show());
        assert_eq!(metadata.show_names, vec!["Beta".to_string()]);
        assert_eq!(metadata.season_number, 1);
        assert_eq!(metadata.episode_number, 3);
    }

    #[test]
    fn test_empty_ilst() {
        let metadata = metadata_from_ilst(&Ilst::default());
        assert_eq!(metadata, AppleMetadata::default());
    }

    #[test]
    fn test_integer_value() {
        assert_eq!(integer_value(&AtomData::SignedInteger(-1)), None);
        assert_eq!(integer_value(&AtomData::UnsignedInteger(7)), Some(7));
        assert_eq!(integer_value(&AtomData::UTF8("7".to_string())), None);
    }

    #[test]
    fn test_big_endian() {
        assert_eq!(big_endian(&[9]), Some(9));
        assert_eq!(big_endian(&[0, 0, 0, 10]), Some(10));
        assert_eq!(big_endian(&[1, 0]), Some(256));
        assert_eq!(big_endian(&[]), None);
        assert_eq!(big_endian(&[0, 0, 0, 0, 1]), None);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2001"), Some(2001));
        assert_eq!(parse_year(" 1999-12-31 "), Some(1999));
        assert_eq!(parse_year("unknown"), None);
        assert_eq!(parse_year(""), None);
    }

    #[tokio::test]
    async fn test_read_tagged_episode() {
        let tags = AppleMetadata {
            content_part: Some(2),
            ..fixtures::episode("Beta", 1, 3, "Pilot")
        };
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&fixtures::tagged_mp4(&tags)).unwrap();
        file.flush().unwrap();

        let metadata = Mp4TagReader::new().read(file.path()).await.unwrap().unwrap();

        assert_eq!(
            metadata,
            AppleMetadata {
                media_kind: Some(10),
                title: Some("Pilot".to_string()),
                year: None,
                show_names: vec!["Beta".to_string()],
                season_number: 1,
                episode_number: 3,
                work: None,
                content_part: Some(2),
            }
        );

        // The reader has let go of the file.
        let renamed = file.path().with_extension("m4v");
        std::fs::rename(file.path(), &renamed).unwrap();
        std::fs::remove_file(&renamed).unwrap();
    }

    #[tokio::test]
    async fn test_read_tagged_movie() {
        let tags = AppleMetadata {
            work: Some("Director's Cut".to_string()),
            ..fixtures::movie("Alpha", 2001)
        };
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&fixtures::tagged_mp4(&tags)).unwrap();
        file.flush().unwrap();

        let metadata = Mp4TagReader::new().read(file.path()).await.unwrap().unwrap();
        assert_eq!(metadata, tags);
    }

    #[tokio::test]
    async fn test_read_untagged_mp4() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&fixtures::untagged_mp4()).unwrap();
        file.flush().unwrap();

        let result = Mp4TagReader::new().read(file.path()).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_read_unsupported_container() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "just some text, not a video").unwrap();

        let result = Mp4TagReader::new().read(file.path()).await;
        assert!(matches!(result, Err(TagReadError::UnsupportedContainer { .. })));
    }

    #[tokio::test]
    async fn test_read_truncated_mp4_is_corrupt() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0, 0, 0, 0x18]).unwrap();
        file.write_all(b"ftypmp42").unwrap();
        file.write_all(&[0, 0, 0, 0]).unwrap();
        file.write_all(b"mp42isom").unwrap();
        file.flush().unwrap();

        let result = Mp4TagReader::new().read(file.path()).await;
        assert!(matches!(result, Err(TagReadError::CorruptContainer { .. })));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = Mp4TagReader::new()
            .read(Path::new("/nonexistent/video.mp4"))
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, TagReadError::Io { .. }));
        assert_eq!(err.path(), Path::new("/nonexistent/video.mp4"));
    }
}
