//! # collabdb Storage
//!
//! Blob storage for collabdb, standing in for a hosted object store.
//!
//! Backends are **opaque blob stores** keyed by `(bucket, path)`. They do not
//! interpret content, and they know nothing about tables, rows or latency;
//! the async bucket API in `collabdb_core` is layered on top.
//!
//! ## Available Backends
//!
//! - [`InMemoryBlobBackend`] - Process-lifetime storage behind a lock
//!
//! ## Example
//!
//! ```rust
//! use collabdb_storage::{Blob, BlobBackend, BlobKey, InMemoryBlobBackend};
//!
//! let backend = InMemoryBlobBackend::new();
//! let key = BlobKey::new("documents", "nda/draft.pdf").unwrap();
//! backend.put(&key, Blob::new(b"%PDF-1.7".to_vec(), "application/pdf")).unwrap();
//! assert_eq!(backend.get(&key).unwrap().unwrap().size(), 8);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod blob;
mod error;
mod memory;

pub use backend::BlobBackend;
pub use blob::{Blob, BlobKey, DEFAULT_CONTENT_TYPE};
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryBlobBackend;
