//! Table set and the shared store around it.

use crate::types::{row_id, Row, Table};
use crate::value::{is_nullish, strict_eq};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Computes the next id for a row sequence: `max(existing ids, 0) + 1`.
///
/// Rows without an integer id are ignored. Deleting the current maximum
/// lowers the next id; there is no separate high-water mark.
#[must_use]
pub fn next_id(rows: &[Row]) -> i64 {
    rows.iter().filter_map(row_id).fold(0, i64::max) + 1
}

/// The contents of every table.
///
/// All tables in [`Table::ALL`] are always present, possibly empty.
#[derive(Debug, Clone)]
pub struct Tables {
    rows: HashMap<Table, Vec<Row>>,
}

impl Tables {
    /// Creates a table set with every table empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Table::ALL.iter().map(|table| (*table, Vec::new())).collect(),
        }
    }

    /// Returns the current rows of a table.
    #[must_use]
    pub fn get(&self, table: Table) -> &[Row] {
        self.rows.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the rows of a table.
    pub fn set(&mut self, table: Table, rows: Vec<Row>) {
        self.rows.insert(table, rows);
    }

    /// Appends a row without assigning any fields.
    pub fn push(&mut self, table: Table, row: Row) {
        self.rows.entry(table).or_default().push(row);
    }

    /// Returns the id the next insert into `table` would receive.
    #[must_use]
    pub fn next_id(&self, table: Table) -> i64 {
        next_id(self.get(table))
    }

    /// Finds a row by integer id.
    #[must_use]
    pub fn find_by_id(&self, table: Table, id: i64) -> Option<&Row> {
        self.get(table).iter().find(|row| row_id(row) == Some(id))
    }

    /// Finds the row a foreign key points at.
    ///
    /// The key matches `id` by strict equality, so `1.0` finds id `1`. A
    /// nullish key references nothing.
    #[must_use]
    pub fn find_referenced(&self, table: Table, key: Option<&Value>) -> Option<&Row> {
        if is_nullish(key) {
            return None;
        }
        let key = key?;
        self.get(table)
            .iter()
            .find(|row| strict_eq(row.get("id"), key))
    }

    /// Returns the number of rows in a table.
    #[must_use]
    pub fn len(&self, table: Table) -> usize {
        self.get(table).len()
    }

    /// Returns the number of rows across all tables.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared, lock-protected table set.
///
/// Every mutation is a read-modify-write performed inside one [`write`]
/// call, so no reader observes a partially applied change.
///
/// [`write`]: TableStore::write
#[derive(Debug, Default)]
pub struct TableStore {
    tables: RwLock<Tables>,
}

impl TableStore {
    /// Creates a store with every table empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over an existing table set.
    #[must_use]
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Returns a copy of the latest committed rows of a table.
    #[must_use]
    pub fn get_table(&self, table: Table) -> Vec<Row> {
        self.tables.read().get(table).to_vec()
    }

    /// Atomically replaces a table's rows.
    pub fn set_table(&self, table: Table, rows: Vec<Row>) {
        self.tables.write().set(table, rows);
    }

    /// Returns the id the next insert into `table` would receive.
    #[must_use]
    pub fn new_id(&self, table: Table) -> i64 {
        self.tables.read().next_id(table)
    }

    /// Runs `f` against the committed table set.
    pub fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&self.tables.read())
    }

    /// Runs `f` with exclusive access to the table set.
    pub fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        f(&mut self.tables.write())
    }

    /// Returns a copy of every table.
    #[must_use]
    pub fn snapshot(&self) -> Tables {
        self.tables.read().clone()
    }
}
