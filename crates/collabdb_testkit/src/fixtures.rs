//! Test fixtures and database helpers.
//!
//! Provides convenience functions for setting up test databases
//! and common test scenarios.

use collabdb_core::{Config, Database, Row, Table, Tables};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Latency used by test databases; the smallest allowed.
pub const TEST_LATENCY: Duration = Duration::from_millis(1);

/// Returns a configuration suited to tests.
#[must_use]
pub fn test_config() -> Config {
    Config::default().latency(TEST_LATENCY)
}

/// A test database with minimal simulated latency.
pub struct TestDatabase {
    /// The database instance.
    pub db: Database,
}

impl TestDatabase {
    /// Creates a database with every table empty.
    pub fn empty() -> Self {
        Self {
            db: Database::open_empty(test_config()),
        }
    }

    /// Creates a database populated by the seed generator.
    pub fn seeded() -> Self {
        Self {
            db: Database::open(test_config()),
        }
    }

    /// Creates a database whose tables hold exactly the given rows.
    ///
    /// # Panics
    ///
    /// Panics if any row is not a JSON object.
    pub fn with_rows(tables: impl IntoIterator<Item = (Table, Vec<Value>)>) -> Self {
        let mut contents = Tables::new();
        for (table, rows) in tables {
            contents.set(table, rows.into_iter().map(row).collect());
        }
        Self {
            db: Database::with_tables(test_config(), contents),
        }
    }

    /// Returns the committed rows of a table.
    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.db.store().get_table(table)
    }
}

impl std::ops::Deref for TestDatabase {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

/// Converts a JSON object literal into a row.
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Runs a future to completion on a fresh current-thread runtime.
///
/// For property tests, whose bodies are synchronous.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("Failed to build test runtime")
        .block_on(future)
}

/// Runs a test with a temporary empty database.
///
/// # Example
///
/// ```rust,ignore
/// use collabdb_testkit::with_temp_db;
///
/// #[test]
/// fn my_test() {
///     with_temp_db(|db| async move {
///         let response = db.from(Table::Colleges).execute().await;
///         assert!(response.is_ok());
///     });
/// }
/// ```
pub fn with_temp_db<F, Fut>(f: F) -> Fut::Output
where
    F: FnOnce(Database) -> Fut,
    Fut: Future,
{
    let test_db = TestDatabase::empty();
    block_on(f(test_db.db.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_database_has_no_rows() {
        let db = TestDatabase::empty();
        for table in Table::ALL {
            assert!(db.rows(*table).is_empty());
        }
        assert_eq!(db.config().latency, TEST_LATENCY);
    }

    #[test]
    fn with_rows_installs_tables() {
        let db = TestDatabase::with_rows([(Table::Colleges, vec![json!({"id": 1, "name": "A"})])]);
        assert_eq!(db.rows(Table::Colleges), vec![row(json!({"id": 1, "name": "A"}))]);
    }

    #[test]
    fn with_temp_db_runs_queries() {
        let count = with_temp_db(|db| async move {
            db.from(Table::ActivityLogs)
                .insert(json!({"action": "login"}))
                .execute()
                .await
                .rows()
                .len()
        });
        assert_eq!(count, 1);
    }

    #[test]
    #[should_panic(expected = "expected a JSON object")]
    fn row_rejects_arrays() {
        let _ = row(json!([1, 2]));
    }
}
