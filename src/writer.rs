use crate::error::AppError;
use crate::metadata::KeywordUpdate;
use std::path::Path;

/// Writes one keyword (plus the shared scalar fields) into an image file.
///
/// Implementations must replace rather than append the keyword, so applying
/// the same update twice leaves a single copy behind.
pub trait MetadataWriter {
    fn apply(&self, path: &Path, update: &KeywordUpdate<'_>) -> Result<(), AppError>;
}
