//! Blob values and composite keys.

use crate::error::{StorageError, StorageResult};
use bytes::Bytes;
use std::fmt;

/// Content type recorded when the uploader does not supply one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A stored binary object.
///
/// Size and content type survive an upload/download round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    content: Bytes,
    content_type: String,
}

impl Blob {
    /// Creates a blob from raw content and a MIME type.
    pub fn new(content: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Creates a blob with the default content type.
    pub fn from_bytes(content: impl Into<Bytes>) -> Self {
        Self::new(content, DEFAULT_CONTENT_TYPE)
    }

    /// The zero-length placeholder returned for missing objects.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Returns true for zero-length blobs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Default for Blob {
    fn default() -> Self {
        Self::empty()
    }
}

/// Composite `(bucket, path)` key, rendered as `bucket:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobKey {
    bucket: String,
    path: String,
}

impl BlobKey {
    /// Creates a validated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket is empty or contains `:`, or if the
    /// path is empty after stripping leading slashes.
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> StorageResult<Self> {
        let bucket = bucket.into();
        if bucket.is_empty() || bucket.contains(':') {
            return Err(StorageError::InvalidBucket(bucket));
        }

        let path = path.into();
        let trimmed = path.trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(StorageError::InvalidPath { bucket, path });
        }

        Ok(Self {
            path: trimmed.to_string(),
            bucket,
        })
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the object path within the bucket.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bucket, self.path)
    }
}
