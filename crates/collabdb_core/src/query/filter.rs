//! Row predicates.

use crate::types::Row;
use crate::value::{is_nullish, strict_eq, to_number, to_text};
use serde_json::Value;

/// A single predicate; a query passes rows satisfying all of its filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `row[column]` strictly equals the value.
    Eq {
        /// Column name.
        column: String,
        /// Expected value.
        value: Value,
    },
    /// `row[column]` does not strictly equal the value.
    Neq {
        /// Column name.
        column: String,
        /// Rejected value.
        value: Value,
    },
    /// `row[column]` strictly equals one of the values.
    In {
        /// Column name.
        column: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// Case-insensitive substring match.
    ///
    /// Leading and trailing `%` are stripped; the remainder may appear
    /// anywhere in the field.
    ILike {
        /// Column name.
        column: String,
        /// Pattern, optionally wrapped in `%`.
        pattern: String,
    },
    /// Numeric comparison after coercion (non-numeric values become `0`).
    Range {
        /// Column name.
        column: String,
        /// Comparison operator.
        op: RangeOp,
        /// Right-hand side before coercion.
        value: Value,
    },
    /// `row[column]` is missing or `null`.
    IsNull {
        /// Column name.
        column: String,
    },
}

/// Numeric comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    /// `>=`
    Gte,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `<`
    Lt,
}

impl Filter {
    /// Returns true if `row` satisfies this predicate.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Filter::Eq { column, value } => strict_eq(row.get(column), value),
            Filter::Neq { column, value } => !strict_eq(row.get(column), value),
            Filter::In { column, values } => {
                let field = row.get(column);
                values.iter().any(|value| strict_eq(field, value))
            }
            Filter::ILike { column, pattern } => {
                let needle = pattern.trim_matches('%').to_lowercase();
                to_text(row.get(column)).to_lowercase().contains(&needle)
            }
            Filter::Range { column, op, value } => {
                let lhs = to_number(row.get(column));
                let rhs = to_number(Some(value));
                match op {
                    RangeOp::Gte => lhs >= rhs,
                    RangeOp::Gt => lhs > rhs,
                    RangeOp::Lte => lhs <= rhs,
                    RangeOp::Lt => lhs < rhs,
                }
            }
            Filter::IsNull { column } => is_nullish(row.get(column)),
        }
    }

    /// Returns true if `row` satisfies every filter.
    #[must_use]
    pub fn all(filters: &[Filter], row: &Row) -> bool {
        filters.iter().all(|filter| filter.matches(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn eq(column: &str, value: Value) -> Filter {
        Filter::Eq {
            column: column.into(),
            value,
        }
    }

    #[test]
    fn eq_is_strict() {
        let r = row(json!({"id": 1, "status": "signed"}));
        assert!(eq("id", json!(1)).matches(&r));
        assert!(!eq("id", json!("1")).matches(&r));
        assert!(!eq("missing", json!(null)).matches(&r));
    }

    #[test]
    fn neq_passes_missing_fields() {
        let r = row(json!({"status": "draft"}));
        let filter = Filter::Neq {
            column: "owner".into(),
            value: json!(1),
        };
        assert!(filter.matches(&r));
    }

    #[test]
    fn in_list() {
        let filter = Filter::In {
            column: "status".into(),
            values: vec![json!("signed"), json!("active")],
        };
        assert!(filter.matches(&row(json!({"status": "active"}))));
        assert!(!filter.matches(&row(json!({"status": "draft"}))));
        assert!(!filter.matches(&row(json!({}))));
    }

    #[test]
    fn ilike_is_substring() {
        let r = row(json!({"title": "Solid-State Battery Cells"}));
        let like = |pattern: &str| Filter::ILike {
            column: "title".into(),
            pattern: pattern.into(),
        };
        assert!(like("%battery%").matches(&r));
        assert!(like("battery").matches(&r));
        assert!(like("%CELLS").matches(&r));
        assert!(like("solid%").matches(&r));
        assert!(!like("%lithium%").matches(&r));
        assert!(like("%%").matches(&r));
    }

    #[test]
    fn ilike_on_numbers_and_missing() {
        let r = row(json!({"year": 2024}));
        let like = |column: &str| Filter::ILike {
            column: column.into(),
            pattern: "%202%".into(),
        };
        assert!(like("year").matches(&r));
        assert!(!like("missing").matches(&r));
    }

    #[test]
    fn gte_coerces_to_zero() {
        let gte = |value: Value| Filter::Range {
            column: "trl_level".into(),
            op: RangeOp::Gte,
            value,
        };
        assert!(gte(json!(4)).matches(&row(json!({"trl_level": 4}))));
        assert!(gte(json!("4")).matches(&row(json!({"trl_level": "7"}))));
        assert!(!gte(json!(1)).matches(&row(json!({"trl_level": "high"}))));
        assert!(gte(json!(0)).matches(&row(json!({}))));
        assert!(gte(json!("abc")).matches(&row(json!({"trl_level": null}))));
    }

    #[test]
    fn is_null() {
        let filter = Filter::IsNull {
            column: "signed_at".into(),
        };
        assert!(filter.matches(&row(json!({"signed_at": null}))));
        assert!(filter.matches(&row(json!({}))));
        assert!(!filter.matches(&row(json!({"signed_at": "2024-01-01"}))));
    }

    proptest! {
        #[test]
        fn eq_matches_exactly_equal_integers(values in prop::collection::vec(0i64..5, 0..40), target in 0i64..5) {
            let rows: Vec<Row> = values.iter().map(|v| row(json!({"project_id": v}))).collect();
            let filter = eq("project_id", json!(target));
            let kept = rows.iter().filter(|r| filter.matches(r)).count();
            prop_assert_eq!(kept, values.iter().filter(|v| **v == target).count());
        }

        #[test]
        fn gte_matches_numeric_comparison(values in prop::collection::vec(-50i64..50, 0..40), bound in -50i64..50) {
            let filter = Filter::Range { column: "n".into(), op: RangeOp::Gte, value: json!(bound) };
            for v in values {
                prop_assert_eq!(filter.matches(&row(json!({"n": v}))), v >= bound);
            }
        }

        #[test]
        fn ilike_ignores_case(word in "[a-zA-Z]{1,8}", prefix in "[a-z ]{0,6}", suffix in "[a-z ]{0,6}") {
            let text = format!("{prefix}{word}{suffix}");
            let filter = Filter::ILike { column: "t".into(), pattern: format!("%{}%", word.to_uppercase()) };
            let r = row(json!({"t": text}));
            prop_assert!(filter.matches(&r));
        }
    }
}
