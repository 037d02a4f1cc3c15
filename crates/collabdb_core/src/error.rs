//! Error types for collabdb core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in collabdb core operations.
///
/// These never cross the query boundary as `Err`; the builder converts them
/// into the `error` field of a [`crate::QueryResponse`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// Blob storage error.
    #[error("storage error: {0}")]
    Storage(#[from] collabdb_storage::StorageError),

    /// JSON conversion error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The table name is not part of the schema.
    #[error("unknown table: {name}")]
    UnknownTable {
        /// The name that was requested.
        name: String,
    },

    /// `single()` was configured and the result did not hold exactly one row.
    #[error("Expected single row")]
    ExpectedSingleRow {
        /// Number of rows actually produced.
        found: usize,
    },

    /// `maybe_single()` was configured and the result held several rows.
    #[error("Expected at most one row")]
    ExpectedAtMostOneRow {
        /// Number of rows actually produced.
        found: usize,
    },

    /// A mutation payload had the wrong shape.
    #[error("invalid payload: {message}")]
    InvalidPayload {
        /// Description of the problem.
        message: String,
    },

    /// Execution was aborted before producing a result.
    #[error("execution failed: {message}")]
    Execution {
        /// Description of the failure.
        message: String,
    },

    /// A column list passed to `select` could not be parsed.
    #[error("invalid column list {columns:?}: {message}")]
    InvalidColumns {
        /// The rejected column list.
        columns: String,
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates an unknown table error.
    pub fn unknown_table(name: impl Into<String>) -> Self {
        Self::UnknownTable { name: name.into() }
    }

    /// Creates an invalid payload error.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Creates an execution error.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    /// Creates an invalid column list error.
    pub fn invalid_columns(columns: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidColumns {
            columns: columns.into(),
            message: message.into(),
        }
    }

    /// Returns true for `single()`/`maybe_single()` violations.
    #[must_use]
    pub fn is_cardinality(&self) -> bool {
        matches!(
            self,
            Self::ExpectedSingleRow { .. } | Self::ExpectedAtMostOneRow { .. }
        )
    }
}
