//! Mock tag reader for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::metadata::AppleMetadata;
use crate::tag_reader::{TagReadError, TagReader};

#[derive(Debug, Clone)]
enum MockTag {
    Metadata(AppleMetadata),
    Untagged,
    Unsupported,
    Corrupt,
}

/// Mock implementation of the TagReader trait.
///
/// Responses are keyed by path. Paths without a configured response are
/// reported as unsupported containers.
#[derive(Debug, Clone, Default)]
pub struct MockTagReader {
    responses: Arc<RwLock<HashMap<PathBuf, MockTag>>>,
    reads: Arc<AtomicUsize>,
}

impl MockTagReader {
    /// Create a new mock tag reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `metadata` for `path`.
    pub fn set_metadata(&self, path: impl Into<PathBuf>, metadata: AppleMetadata) {
        self.set(path, MockTag::Metadata(metadata));
    }

    /// Report `path` as a container without an Apple tag.
    pub fn set_untagged(&self, path: impl Into<PathBuf>) {
        self.set(path, MockTag::Untagged);
    }

    /// Report `path` as an unsupported container.
    pub fn set_unsupported(&self, path: impl Into<PathBuf>) {
        self.set(path, MockTag::Unsupported);
    }

    /// Report `path` as a corrupt container.
    pub fn set_corrupt(&self, path: impl Into<PathBuf>) {
        self.set(path, MockTag::Corrupt);
    }

    /// Number of `read` calls so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn set(&self, path: impl Into<PathBuf>, tag: MockTag) {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(path.into(), tag);
        }
    }
}

#[async_trait]
impl TagReader for MockTagReader {
    fn name(&self) -> &str {
        "mock"
    }

    async fn read(&self, path: &Path) -> Result<Option<AppleMetadata>, TagReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        let response = self
            .responses
            .read()
            .ok()
            .and_then(|responses| responses.get(path).cloned());

        match response {
            Some(MockTag::Metadata(metadata)) => Ok(Some(metadata)),
            Some(MockTag::Untagged) => Ok(None),
            Some(MockTag::Corrupt) => Err(TagReadError::CorruptContainer {
                path: path.to_path_buf(),
                reason: "mock corrupt container".to_string(),
            }),
            Some(MockTag::Unsupported) | None => Err(TagReadError::UnsupportedContainer {
                path: path.to_path_buf(),
            }),
        }
    }
}
