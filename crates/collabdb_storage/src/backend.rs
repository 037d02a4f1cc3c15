//! Blob backend trait definition.

use crate::blob::{Blob, BlobKey};
use crate::error::StorageResult;

/// A low-level blob backend for collabdb.
///
/// Backends are **opaque object stores**. Latency simulation and the response
/// envelope live in `collabdb_core`; a backend only stores and returns blobs.
///
/// # Invariants
///
/// - `put` overwrites any blob already stored under the key
/// - `get` returns exactly the blob last `put` under that key
/// - Backends must be `Send + Sync` for shared access
pub trait BlobBackend: Send + Sync {
    /// Stores `blob` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot store the blob.
    fn put(&self, key: &BlobKey, blob: Blob) -> StorageResult<()>;

    /// Returns the blob stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &BlobKey) -> StorageResult<Option<Blob>>;

    /// Removes the blob stored under `key`.
    ///
    /// Returns whether a blob was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &BlobKey) -> StorageResult<bool>;

    /// Lists the paths in `bucket` starting with `prefix`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<String>>;
}
