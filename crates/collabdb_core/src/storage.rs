//! Async bucket facade over the blob backend.

use crate::error::{CoreError, CoreResult};
use crate::query::QueryError;
use collabdb_storage::{Blob, BlobBackend, BlobKey};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Entry point for blob operations, obtained from [`crate::Database::storage`].
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn BlobBackend>,
    latency: Duration,
}

impl Storage {
    pub(crate) fn new(backend: Arc<dyn BlobBackend>, latency: Duration) -> Self {
        Self { backend, latency }
    }

    /// Returns a handle to one bucket.
    ///
    /// The name is validated when an operation runs, not here.
    #[must_use]
    pub fn from(&self, bucket: &str) -> Bucket {
        Bucket {
            backend: Arc::clone(&self.backend),
            latency: self.latency,
            name: bucket.to_string(),
        }
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

/// Data returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadData {
    /// Path the blob was stored under, without leading slashes.
    pub path: String,
}

/// `{data, error}` envelope for blob operations.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageResponse<T> {
    /// Result value.
    pub data: Option<T>,
    /// Failure, if any.
    pub error: Option<QueryError>,
}

impl<T> StorageResponse<T> {
    /// Returns true if the operation succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts the envelope into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the envelope's error.
    pub fn into_result(self) -> Result<Option<T>, QueryError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }
}

impl<T> From<CoreResult<T>> for StorageResponse<T> {
    fn from(result: CoreResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
            },
            Err(err) => Self {
                data: None,
                error: Some(QueryError::from(&err)),
            },
        }
    }
}

/// Handle to a single bucket.
#[derive(Clone)]
pub struct Bucket {
    backend: Arc<dyn BlobBackend>,
    latency: Duration,
    name: String,
}

impl Bucket {
    /// Returns the bucket name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores `blob` at `path`, overwriting any existing blob.
    pub async fn upload(&self, path: &str, blob: Blob) -> StorageResponse<UploadData> {
        let key = BlobKey::new(self.name.as_str(), path);
        self.run("upload", move |backend| {
            let key = key?;
            let size = blob.size();
            backend.put(&key, blob)?;
            debug!(key = %key, size, "blob uploaded");
            Ok(UploadData {
                path: key.path().to_string(),
            })
        })
        .await
    }

    /// Returns the blob at `path`.
    ///
    /// A path that was never uploaded yields [`Blob::empty`], not an error.
    pub async fn download(&self, path: &str) -> StorageResponse<Blob> {
        let key = BlobKey::new(self.name.as_str(), path);
        self.run("download", move |backend| {
            let key = key?;
            let blob = backend.get(&key)?;
            if blob.is_none() {
                trace!(key = %key, "blob missing, returning placeholder");
            }
            Ok(blob.unwrap_or_else(Blob::empty))
        })
        .await
    }

    /// Removes the blobs at `paths`; returns the paths that existed.
    pub async fn remove(&self, paths: &[&str]) -> StorageResponse<Vec<String>> {
        let keys: Vec<_> = paths
            .iter()
            .map(|path| BlobKey::new(self.name.as_str(), *path))
            .collect();
        self.run("remove", move |backend| {
            let mut removed = Vec::new();
            for key in keys {
                let key = key?;
                if backend.remove(&key)? {
                    removed.push(key.path().to_string());
                }
            }
            Ok(removed)
        })
        .await
    }

    /// Lists the sorted paths starting with `prefix`.
    pub async fn list(&self, prefix: &str) -> StorageResponse<Vec<String>> {
        let bucket = self.name.clone();
        let prefix = prefix.trim_start_matches('/').to_string();
        self.run("list", move |backend| Ok(backend.list(&bucket, &prefix)?))
            .await
    }

    async fn run<T, F>(&self, op: &'static str, f: F) -> StorageResponse<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn BlobBackend) -> CoreResult<T> + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let latency = self.latency;

        let task = tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            f(backend.as_ref())
        });

        let result = match task.await {
            Ok(result) => result,
            Err(err) => Err(CoreError::execution(err.to_string())),
        };
        if let Err(err) = &result {
            warn!(bucket = %self.name, op, error = %err, "storage operation failed");
        }
        result.into()
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.name)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabdb_storage::InMemoryBlobBackend;

    fn storage() -> Storage {
        Storage::new(Arc::new(InMemoryBlobBackend::new()), Duration::from_millis(1))
    }

    #[tokio::test]
    async fn upload_then_download() {
        let docs = storage().from("docs");
        let uploaded = docs
            .upload("a/b.pdf", Blob::new(vec![1u8; 2048], "application/pdf"))
            .await;
        assert_eq!(uploaded.data.unwrap().path, "a/b.pdf");

        let downloaded = docs.download("a/b.pdf").await.data.unwrap();
        assert_eq!(downloaded.size(), 2048);
        assert_eq!(downloaded.content_type(), "application/pdf");
    }

    #[tokio::test]
    async fn missing_blob_is_empty() {
        let response = storage().from("docs").download("never/uploaded.pdf").await;
        assert!(response.is_ok());
        assert!(response.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn buckets_are_separate() {
        let storage = storage();
        let _ = storage.from("docs").upload("x", Blob::from_bytes("abc")).await;
        let other = storage.from("images").download("x").await;
        assert!(other.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_overwrites() {
        let docs = storage().from("docs");
        let _ = docs.upload("x", Blob::from_bytes("first")).await;
        let _ = docs.upload("x", Blob::from_bytes("second!")).await;
        assert_eq!(docs.download("x").await.data.unwrap().size(), 7);
    }

    #[tokio::test]
    async fn invalid_key_is_an_error_envelope() {
        let response = storage().from("docs").upload("/", Blob::empty()).await;
        assert!(!response.is_ok());
        assert!(response.data.is_none());

        let response = storage().from("").download("x").await;
        assert!(response.into_result().is_err());
    }

    #[tokio::test]
    async fn remove_and_list() {
        let docs = storage().from("docs");
        for path in ["a/1", "a/2", "b/1"] {
            let _ = docs.upload(path, Blob::from_bytes("x")).await;
        }

        let listed = docs.list("a/").await.data.unwrap();
        assert_eq!(listed, vec!["a/1", "a/2"]);

        let removed = docs.remove(&["a/1", "missing"]).await.data.unwrap();
        assert_eq!(removed, vec!["a/1"]);
        assert_eq!(docs.list("").await.data.unwrap(), vec!["a/2", "b/1"]);
    }
}
