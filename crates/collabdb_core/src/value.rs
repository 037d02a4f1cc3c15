//! Field value semantics shared by filters, ordering and relation lookups.
//!
//! A missing field and an explicit `null` are both "nullish", but only an
//! explicit `null` is strictly equal to `null`.

use serde_json::Value;
use std::cmp::Ordering;

/// Strict equality between a (possibly missing) field and a value.
///
/// Numbers compare by numeric value, so `1` equals `1.0`. A missing field
/// equals nothing.
#[must_use]
pub fn strict_eq(field: Option<&Value>, value: &Value) -> bool {
    match (field, value) {
        (None, _) => false,
        (Some(Value::Number(a)), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Some(a), b) => a == b,
    }
}

/// Returns true for missing fields and explicit `null`.
#[must_use]
pub fn is_nullish(field: Option<&Value>) -> bool {
    matches!(field, None | Some(Value::Null))
}

/// Numeric coercion used by range filters and scoring.
///
/// Numeric strings parse, booleans map to 0/1, and everything that does not
/// yield a finite number coerces to `0`.
#[must_use]
pub fn to_number(field: Option<&Value>) -> f64 {
    let n = match field {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Text rendering used by `ilike` and string ordering.
///
/// Nullish fields render as the empty string; whole floats drop their
/// fractional part.
#[must_use]
pub fn to_text(field: Option<&Value>) -> String {
    match field {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Orders two values by kind first, then within the kind.
///
/// Kinds rank booleans, numbers, strings, arrays, objects, then `null`, so a
/// column mixing `10` and `"10"` still sorts consistently. Numbers compare
/// numerically and strings compare as text. Arrays and objects compare by
/// their JSON rendering.
#[must_use]
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_eq_numbers_by_value() {
        assert!(strict_eq(Some(&json!(1)), &json!(1.0)));
        assert!(!strict_eq(Some(&json!(1)), &json!("1")));
        assert!(!strict_eq(None, &json!(null)));
        assert!(strict_eq(Some(&json!(null)), &json!(null)));
    }

    #[test]
    fn to_number_coercion() {
        assert_eq!(to_number(Some(&json!(7))), 7.0);
        assert_eq!(to_number(Some(&json!(" 2.5 "))), 2.5);
        assert_eq!(to_number(Some(&json!("abc"))), 0.0);
        assert_eq!(to_number(Some(&json!(""))), 0.0);
        assert_eq!(to_number(Some(&json!(true))), 1.0);
        assert_eq!(to_number(Some(&json!([1]))), 0.0);
        assert_eq!(to_number(None), 0.0);
        assert_eq!(to_number(Some(&json!("NaN"))), 0.0);
    }

    #[test]
    fn to_text_rendering() {
        assert_eq!(to_text(Some(&json!("Hello"))), "Hello");
        assert_eq!(to_text(Some(&json!(3.0))), "3");
        assert_eq!(to_text(Some(&json!(3.5))), "3.5");
        assert_eq!(to_text(Some(&json!(null))), "");
        assert_eq!(to_text(None), "");
    }

    #[test]
    fn compare_within_kind() {
        assert_eq!(compare(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare(&json!(1), &json!(1.0)), Ordering::Equal);
        assert_eq!(compare(&json!("2"), &json!("10")), Ordering::Greater);
        assert_eq!(compare(&json!(false), &json!(true)), Ordering::Less);
    }

    #[test]
    fn compare_ranks_kinds() {
        assert_eq!(compare(&json!(10), &json!("10")), Ordering::Less);
        assert_eq!(compare(&json!("10"), &json!(2)), Ordering::Greater);
        assert_eq!(compare(&json!(true), &json!(0)), Ordering::Less);
        assert_eq!(compare(&json!("z"), &json!([1])), Ordering::Less);
        assert_eq!(compare(&json!({"a": 1}), &json!(null)), Ordering::Less);
    }

    #[test]
    fn compare_is_transitive_across_kinds() {
        let values = [json!(2), json!(10), json!("10"), json!("2"), json!(2.5), json!(false)];
        for a in &values {
            for b in &values {
                assert_eq!(compare(a, b), compare(b, a).reverse());
                for c in &values {
                    if compare(a, b).is_le() && compare(b, c).is_le() {
                        assert!(compare(a, c).is_le(), "{a} <= {b} <= {c}");
                    }
                }
            }
        }
    }
}
