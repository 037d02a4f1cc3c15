//! Stable multi-key ordering.

use crate::types::Row;
use crate::value::{compare, is_nullish};
use std::cmp::Ordering;

/// Options for [`crate::QueryBuilder::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderOptions {
    /// Sort direction; defaults to ascending.
    pub ascending: bool,
}

impl OrderOptions {
    /// Ascending order.
    #[must_use]
    pub const fn ascending() -> Self {
        Self { ascending: true }
    }

    /// Descending order.
    #[must_use]
    pub const fn descending() -> Self {
        Self { ascending: false }
    }
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self::ascending()
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column name.
    pub column: String,
    /// Sort direction.
    pub ascending: bool,
}

impl OrderBy {
    /// Compares two rows on this key.
    ///
    /// Nullish values sort last ascending and first descending.
    #[must_use]
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let (x, y) = (a.get(&self.column), b.get(&self.column));
        match (is_nullish(x), is_nullish(y)) {
            (true, true) => Ordering::Equal,
            (true, false) if self.ascending => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, true) if self.ascending => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => match (x, y) {
                (Some(x), Some(y)) if self.ascending => compare(x, y),
                (Some(x), Some(y)) => compare(x, y).reverse(),
                _ => Ordering::Equal,
            },
        }
    }
}

/// Sorts rows by the keys in order; the first key is primary.
///
/// The sort is stable: rows equal on every key keep their relative order.
pub fn sort_rows(rows: &mut [Row], keys: &[OrderBy]) {
    if keys.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        keys.iter()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn key(column: &str, ascending: bool) -> OrderBy {
        OrderBy {
            column: column.into(),
            ascending,
        }
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn numeric_not_lexicographic() {
        let mut rows = vec![
            row(json!({"id": 1, "n": 10})),
            row(json!({"id": 2, "n": 9})),
            row(json!({"id": 3, "n": 100})),
        ];
        sort_rows(&mut rows, &[key("n", true)]);
        assert_eq!(ids(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn nulls_last_ascending_first_descending() {
        let mut rows = vec![
            row(json!({"id": 1, "n": null})),
            row(json!({"id": 2, "n": 5})),
            row(json!({"id": 3})),
            row(json!({"id": 4, "n": 1})),
        ];
        sort_rows(&mut rows, &[key("n", true)]);
        assert_eq!(ids(&rows), vec![4, 2, 1, 3]);

        sort_rows(&mut rows, &[key("n", false)]);
        assert_eq!(ids(&rows), vec![1, 3, 2, 4]);
    }

    #[test]
    fn strings_compare_as_text() {
        let mut rows = vec![
            row(json!({"id": 1, "created_at": "2024-03-01T00:00:00.000Z"})),
            row(json!({"id": 2, "created_at": "2023-12-31T00:00:00.000Z"})),
        ];
        sort_rows(&mut rows, &[key("created_at", false)]);
        assert_eq!(ids(&rows), vec![1, 2]);
    }

    #[test]
    fn secondary_key_breaks_ties() {
        let mut rows = vec![
            row(json!({"id": 1, "status": "b", "n": 2})),
            row(json!({"id": 2, "status": "a", "n": 1})),
            row(json!({"id": 3, "status": "b", "n": 1})),
        ];
        sort_rows(&mut rows, &[key("status", true), key("n", true)]);
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    proptest! {
        #[test]
        fn sort_is_stable(keys in prop::collection::vec(0i64..4, 0..50), ascending in any::<bool>()) {
            let mut rows: Vec<Row> = keys
                .iter()
                .enumerate()
                .map(|(i, k)| row(json!({"id": i, "k": k})))
                .collect();
            sort_rows(&mut rows, &[key("k", ascending)]);

            for pair in rows.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if a["k"] == b["k"] {
                    prop_assert!(a["id"].as_i64() < b["id"].as_i64());
                } else if ascending {
                    prop_assert!(a["k"].as_i64() < b["k"].as_i64());
                } else {
                    prop_assert!(a["k"].as_i64() > b["k"].as_i64());
                }
            }
        }

        #[test]
        fn mixed_numbers_and_text_sort(
            budgets in prop::collection::vec((0i64..20, any::<bool>()), 0..64),
            ascending in any::<bool>(),
        ) {
            let mut rows: Vec<Row> = budgets
                .iter()
                .enumerate()
                .map(|(i, (n, as_text))| {
                    let budget = if *as_text { json!(n.to_string()) } else { json!(n) };
                    row(json!({"id": i, "budget": budget}))
                })
                .collect();
            let order = key("budget", ascending);
            sort_rows(&mut rows, std::slice::from_ref(&order));

            prop_assert_eq!(rows.len(), budgets.len());
            for pair in rows.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                match order.compare(a, b) {
                    Ordering::Less => {}
                    Ordering::Equal => prop_assert!(a["id"].as_i64() < b["id"].as_i64()),
                    Ordering::Greater => prop_assert!(false, "out of order: {:?} {:?}", a, b),
                }
                if ascending {
                    prop_assert!(!(a["budget"].is_string() && b["budget"].is_number()));
                }
            }
        }
    }
}
