//! The `{data, error}` result envelope.

use crate::error::{CoreError, CoreResult};
use crate::types::Row;
use serde::Serialize;
use serde_json::Value;

/// Row count requested alongside a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Count {
    /// Count every filtered row before limits apply.
    Exact,
}

/// Options for [`crate::QueryBuilder::select_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Whether to report a row count.
    pub count: Option<Count>,
    /// Return only the count, with `data` set to `null`.
    pub head: bool,
}

impl SelectOptions {
    /// Requests an exact count alongside the rows.
    #[must_use]
    pub const fn exact_count() -> Self {
        Self {
            count: Some(Count::Exact),
            head: false,
        }
    }

    /// Requests only an exact count.
    #[must_use]
    pub const fn head_count() -> Self {
        Self {
            count: Some(Count::Exact),
            head: true,
        }
    }
}

/// Failure description carried in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryError {
    /// Human readable message.
    pub message: String,
}

impl From<&CoreError> for QueryError {
    fn from(err: &CoreError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Uniform result of executing a query.
///
/// Exactly one of `data`/`error` is meaningful: on failure `data` is `None`.
/// On success `data` is an array of rows, a single row object, or `None`
/// for an empty `maybe_single()` read or a `head` count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    /// Result rows.
    pub data: Option<Value>,
    /// Failure, if any.
    pub error: Option<QueryError>,
    /// Filtered row count, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl QueryResponse {
    pub(crate) fn success(data: Option<Value>, count: Option<usize>) -> Self {
        Self {
            data,
            error: None,
            count,
        }
    }

    pub(crate) fn failure(err: &CoreError) -> Self {
        Self {
            data: None,
            error: Some(err.into()),
            count: None,
        }
    }

    /// Returns true when no error was reported.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|err| err.message.as_str())
    }

    /// Returns the data as rows.
    ///
    /// An array yields its object elements, a single object yields one row,
    /// and `null` or an error yields none.
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        match &self.data {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect(),
            Some(Value::Object(row)) => vec![row.clone()],
            _ => Vec::new(),
        }
    }

    /// Returns the single row of a `single()`/`maybe_single()` read.
    #[must_use]
    pub fn row(&self) -> Option<Row> {
        self.data.as_ref().and_then(Value::as_object).cloned()
    }

    /// Converts the envelope into a `Result` over the raw data.
    ///
    /// # Errors
    ///
    /// Returns the reported error.
    pub fn into_result(self) -> Result<Option<Value>, QueryError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }
}

impl From<CoreResult<(Option<Value>, Option<usize>)>> for QueryResponse {
    fn from(result: CoreResult<(Option<Value>, Option<usize>)>) -> Self {
        match result {
            Ok((data, count)) => Self::success(data, count),
            Err(err) => Self::failure(&err),
        }
    }
}
