//! In-memory blob backend.

use crate::backend::BlobBackend;
use crate::blob::{Blob, BlobKey};
use crate::error::StorageResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory blob backend.
///
/// Blobs live for the lifetime of the backend; nothing is persisted.
///
/// # Thread Safety
///
/// This backend is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use collabdb_storage::{Blob, BlobBackend, BlobKey, InMemoryBlobBackend};
///
/// let backend = InMemoryBlobBackend::new();
/// let key = BlobKey::new("docs", "a.txt").unwrap();
/// assert!(backend.get(&key).unwrap().is_none());
/// backend.put(&key, Blob::new("hi", "text/plain")).unwrap();
/// assert_eq!(backend.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBlobBackend {
    blobs: RwLock<BTreeMap<BlobKey, Blob>>,
}

impl InMemoryBlobBackend {
    /// Creates a new empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored blobs across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Returns true if no blobs are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    /// Returns the total stored bytes.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.blobs.read().values().map(Blob::size).sum()
    }

    /// Removes every blob.
    pub fn clear(&self) {
        self.blobs.write().clear();
    }
}

impl BlobBackend for InMemoryBlobBackend {
    fn put(&self, key: &BlobKey, blob: Blob) -> StorageResult<()> {
        self.blobs.write().insert(key.clone(), blob);
        Ok(())
    }

    fn get(&self, key: &BlobKey) -> StorageResult<Option<Blob>> {
        Ok(self.blobs.read().get(key).cloned())
    }

    fn remove(&self, key: &BlobKey) -> StorageResult<bool> {
        Ok(self.blobs.write().remove(key).is_some())
    }

    fn list(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<String>> {
        // BTreeMap order keeps the listing sorted by path within a bucket.
        Ok(self
            .blobs
            .read()
            .keys()
            .filter(|key| key.bucket() == bucket && key.path().starts_with(prefix))
            .map(|key| key.path().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(bucket: &str, path: &str) -> BlobKey {
        BlobKey::new(bucket, path).unwrap()
    }

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBlobBackend::new();
        assert!(backend.is_empty());
        assert_eq!(backend.total_size(), 0);
    }

    #[test]
    fn memory_get_missing_returns_none() {
        let backend = InMemoryBlobBackend::new();
        assert!(backend.get(&key("docs", "nope.pdf")).unwrap().is_none());
    }

    #[test]
    fn memory_put_preserves_size_and_type() {
        let backend = InMemoryBlobBackend::new();
        let k = key("docs", "a/b.pdf");
        backend
            .put(&k, Blob::new(vec![7u8; 1234], "application/pdf"))
            .unwrap();

        let blob = backend.get(&k).unwrap().unwrap();
        assert_eq!(blob.size(), 1234);
        assert_eq!(blob.content_type(), "application/pdf");
    }

    #[test]
    fn memory_put_overwrites() {
        let backend = InMemoryBlobBackend::new();
        let k = key("docs", "a.txt");
        backend.put(&k, Blob::new("first", "text/plain")).unwrap();
        backend.put(&k, Blob::new("second!", "text/plain")).unwrap();

        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get(&k).unwrap().unwrap().size(), 7);
    }

    #[test]
    fn memory_buckets_are_isolated() {
        let backend = InMemoryBlobBackend::new();
        backend.put(&key("docs", "a.txt"), Blob::from_bytes("x")).unwrap();
        assert!(backend.get(&key("avatars", "a.txt")).unwrap().is_none());
    }

    #[test]
    fn memory_remove() {
        let backend = InMemoryBlobBackend::new();
        let k = key("docs", "a.txt");
        backend.put(&k, Blob::from_bytes("x")).unwrap();

        assert!(backend.remove(&k).unwrap());
        assert!(!backend.remove(&k).unwrap());
        assert!(backend.is_empty());
    }

    #[test]
    fn memory_list_filters_bucket_and_prefix() {
        let backend = InMemoryBlobBackend::new();
        backend.put(&key("docs", "nda/2.pdf"), Blob::from_bytes("x")).unwrap();
        backend.put(&key("docs", "nda/1.pdf"), Blob::from_bytes("x")).unwrap();
        backend.put(&key("docs", "sow/1.pdf"), Blob::from_bytes("x")).unwrap();
        backend.put(&key("other", "nda/3.pdf"), Blob::from_bytes("x")).unwrap();

        let paths = backend.list("docs", "nda/").unwrap();
        assert_eq!(paths, vec!["nda/1.pdf", "nda/2.pdf"]);
    }

    #[test]
    fn memory_clear() {
        let backend = InMemoryBlobBackend::new();
        backend.put(&key("docs", "a"), Blob::from_bytes("abc")).unwrap();
        backend.clear();
        assert!(backend.is_empty());
    }

    proptest! {
        #[test]
        fn memory_roundtrip_any_content(content in prop::collection::vec(any::<u8>(), 0..512)) {
            let backend = InMemoryBlobBackend::new();
            let k = key("docs", "blob.bin");
            backend.put(&k, Blob::from_bytes(content.clone())).unwrap();
            let blob = backend.get(&k).unwrap().unwrap();
            prop_assert_eq!(blob.content().as_ref(), content.as_slice());
        }
    }
}
