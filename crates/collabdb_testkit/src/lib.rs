//! # collabdb Testkit
//!
//! Test utilities for collabdb.
//!
//! This crate provides:
//! - Test fixtures and database helpers
//! - Property-based test generators using proptest
//!
//! Cross-module scenarios live in this crate's `tests/` directory.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use collabdb_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn reads_colleges() {
//!     let db = TestDatabase::seeded();
//!     let response = db.from(Table::Colleges).execute().await;
//!     assert!(response.is_ok());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use collabdb_core::{
        Blob, Config, Database, OrderOptions, QueryResponse, Row, SelectOptions, Table,
        UpsertOptions,
    };
}

pub use fixtures::*;
pub use generators::*;
