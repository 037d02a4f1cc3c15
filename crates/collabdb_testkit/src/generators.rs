//! Property-based test generators using proptest.
//!
//! Provides strategies for generating tables, field values and rows
//! that the query builder accepts.

use collabdb_core::relation::relations;
use collabdb_core::{Row, Table};
use proptest::prelude::*;
use serde_json::Value;

/// Fields the builder assigns or stamps; generated payloads never carry them.
pub const MANAGED_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// Strategy for any table.
pub fn table_strategy() -> impl Strategy<Value = Table> {
    prop::sample::select(Table::ALL.to_vec())
}

/// Strategy for tables without relation rules, whose reads return rows as stored.
pub fn plain_table_strategy() -> impl Strategy<Value = Table> {
    let plain: Vec<Table> = Table::ALL
        .iter()
        .copied()
        .filter(|table| relations(*table).is_empty())
        .collect();
    prop::sample::select(plain)
}

/// Strategy for field names that never collide with managed fields.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z_]{0,11}")
        .expect("Invalid regex")
        .prop_filter("Field name must not be managed", |name| {
            !MANAGED_FIELDS.contains(&name.as_str())
        })
}

/// Strategy for scalar field values.
pub fn field_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(Value::Null),
        1 => any::<bool>().prop_map(Value::Bool),
        3 => (-1_000i64..1_000).prop_map(Value::from),
        3 => prop::string::string_regex("[A-Za-z0-9 ]{0,16}")
            .expect("Invalid regex")
            .prop_map(Value::String),
    ]
}

/// Strategy for insert payloads: 1 to 6 user fields, no managed fields.
pub fn payload_strategy() -> impl Strategy<Value = Row> {
    prop::collection::btree_map(field_name_strategy(), field_value_strategy(), 1..6)
        .prop_map(|fields| fields.into_iter().collect())
}

/// Strategy for rows tagged with a small integer `group` column, for filters.
pub fn grouped_rows_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0i64..4, payload_strategy()), 0..max_rows).prop_map(|rows| {
        rows.into_iter()
            .map(|(group, mut row)| {
                row.insert("group".to_string(), Value::from(group));
                row
            })
            .collect()
    })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
