//! Error types for blob storage operations.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The bucket name is empty or contains the key separator.
    #[error("invalid bucket name: {0:?}")]
    InvalidBucket(String),

    /// The object path is empty.
    #[error("invalid object path in bucket {bucket}: {path:?}")]
    InvalidPath {
        /// The bucket the path was addressed to.
        bucket: String,
        /// The rejected path.
        path: String,
    },
}
