//! Trait definitions for the tag reader module.

use async_trait::async_trait;
use std::path::Path;

use crate::metadata::AppleMetadata;

use super::error::TagReadError;

/// Something that can pull Apple-style metadata out of a file.
#[async_trait]
pub trait TagReader: Send + Sync {
    /// Returns the name of this reader implementation.
    fn name(&self) -> &str;

    /// Reads the metadata of `path`.
    ///
    /// `Ok(None)` means the container was parsed but carries no Apple tag.
    /// Implementations must release the file before returning.
    async fn read(&self, path: &Path) -> Result<Option<AppleMetadata>, TagReadError>;
}
