//! Database facade.

use crate::config::Config;
use crate::query::QueryBuilder;
use crate::seed::seed;
use crate::storage::Storage;
use crate::table::{TableStore, Tables};
use crate::types::Table;
use collabdb_storage::{BlobBackend, InMemoryBlobBackend};
use std::sync::Arc;

/// The main database handle.
///
/// `Database` owns the table store and the blob backend and hands out query
/// builders and bucket handles bound to them. Cloning is cheap; clones share
/// the same state.
///
/// # Opening a Database
///
/// ```rust,ignore
/// use collabdb_core::{Config, Database, Table};
///
/// // Seeded with synthetic data, 120ms simulated latency
/// let db = Database::open(Config::default());
///
/// let response = db.from(Table::Colleges).select("name").execute().await;
/// ```
///
/// For tests, `Database::open_empty()` skips seeding.
#[derive(Clone)]
pub struct Database {
    /// Configuration.
    config: Config,
    /// Rows of every table.
    store: Arc<TableStore>,
    /// Blob storage shared by every bucket handle.
    blobs: Arc<dyn BlobBackend>,
}

impl Database {
    /// Opens a database populated by the seed generator.
    #[must_use]
    pub fn open(config: Config) -> Self {
        let mut tables = Tables::new();
        seed(&mut tables, config.seed);
        Self::with_tables(config, tables)
    }

    /// Opens a database with every table empty.
    #[must_use]
    pub fn open_empty(config: Config) -> Self {
        Self::with_tables(config, Tables::new())
    }

    /// Opens a database over existing table contents.
    #[must_use]
    pub fn with_tables(config: Config, tables: Tables) -> Self {
        Self::with_backend(config, tables, Arc::new(InMemoryBlobBackend::new()))
    }

    /// Opens a database over existing table contents and a blob backend.
    #[must_use]
    pub fn with_backend(config: Config, tables: Tables, blobs: Arc<dyn BlobBackend>) -> Self {
        Self {
            config,
            store: Arc::new(TableStore::with_tables(tables)),
            blobs,
        }
    }

    /// Starts a query against `table`.
    pub fn from(&self, table: Table) -> QueryBuilder {
        QueryBuilder::new(Arc::clone(&self.store), self.config.latency, Ok(table))
    }

    /// Starts a query against a table by name.
    ///
    /// An unknown name is reported in the response envelope when the query
    /// executes.
    pub fn from_name(&self, name: &str) -> QueryBuilder {
        let table = name.parse::<Table>().map_err(|_| name.to_string());
        QueryBuilder::new(Arc::clone(&self.store), self.config.latency, table)
    }

    /// Returns the blob storage facade.
    #[must_use]
    pub fn storage(&self) -> Storage {
        Storage::new(Arc::clone(&self.blobs), self.config.latency)
    }

    /// Returns the underlying table store.
    #[must_use]
    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("config", &self.config)
            .field("rows", &self.store.read(Tables::total_rows))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::OrderOptions;
    use std::time::Duration;

    fn fast() -> Config {
        Config::default().latency(Duration::from_millis(1))
    }

    #[test]
    fn open_seeds_and_open_empty_does_not() {
        assert!(Database::open(fast()).store().read(Tables::total_rows) > 0);
        assert_eq!(Database::open_empty(fast()).store().read(Tables::total_rows), 0);
    }

    #[test]
    fn clones_share_state() {
        let db = Database::open_empty(fast());
        let clone = db.clone();
        clone.store().write(|tables| tables.push(Table::Colleges, Default::default()));
        assert_eq!(db.store().get_table(Table::Colleges).len(), 1);
    }

    #[tokio::test]
    async fn from_reads_seeded_rows() {
        let db = Database::open(fast());
        let response = db
            .from(Table::Colleges)
            .select("id,name")
            .order("id", OrderOptions::ascending())
            .execute()
            .await;

        let rows = response.rows();
        assert_eq!(rows.len(), db.store().get_table(Table::Colleges).len());
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[tokio::test]
    async fn from_name_resolves_and_rejects() {
        let db = Database::open(fast());
        let known = db.from_name("research_projects").limit(1).execute().await;
        assert!(known.is_ok());

        let unknown = db.from_name("profiles").execute().await;
        assert!(unknown.data.is_none());
        assert_eq!(unknown.error_message(), Some("unknown table: profiles"));
    }

    #[test]
    fn debug_hides_rows() {
        let rendered = format!("{:?}", Database::open_empty(fast()));
        assert!(rendered.starts_with("Database"));
        assert!(rendered.contains("rows: 0"));
    }
}
