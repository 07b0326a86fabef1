//! Tag reading: extracting [`AppleMetadata`](crate::metadata::AppleMetadata)
//! from media containers.
//!
//! The reader owns the file handle for the duration of a single `read` call,
//! so nothing is left open by the time the file is moved or deleted.

mod error;
mod mp4;
mod traits;

pub use error::TagReadError;
pub use mp4::Mp4TagReader;
pub use traits::TagReader;
