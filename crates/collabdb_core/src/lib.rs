//! # collabdb Core
//!
//! In-memory relational data emulation for the research collaboration
//! platform.
//!
//! This crate provides:
//! - A table store of named row sequences with per-table id allocation
//! - A relation attacher that synthesizes foreign-key embeds
//! - A deferred query builder with filters, ordering and mutations
//! - An async bucket API over the blob store
//! - A deterministic seed generator
//!
//! Every query resolves to a [`QueryResponse`] envelope; failures are
//! reported in its `error` field and never escape as `Err` or panics.
//!
//! ```rust,ignore
//! use collabdb_core::{Config, Database, OrderOptions, Table};
//!
//! let db = Database::open(Config::default());
//! let response = db
//!     .from(Table::ResearchProjects)
//!     .select("*")
//!     .gte("trl_level", 4)
//!     .order("created_at", OrderOptions::descending())
//!     .limit(5)
//!     .execute()
//!     .await;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
pub mod query;
pub mod relation;
pub mod scoring;
pub mod seed;
mod storage;
pub mod table;
mod types;
pub mod value;

pub use config::{Config, MIN_LATENCY};
pub use database::Database;
pub use error::{CoreError, CoreResult};
pub use query::{
    Count, OrderOptions, QueryBuilder, QueryError, QueryResponse, SelectOptions, UpsertOptions,
};
pub use relation::RelationAttacher;
pub use seed::SeedReport;
pub use storage::{Bucket, Storage, StorageResponse, UploadData};
pub use table::{TableStore, Tables};
pub use types::{now_timestamp, row_id, Row, Table};

pub use collabdb_storage::{Blob, BlobBackend, BlobKey, InMemoryBlobBackend};
