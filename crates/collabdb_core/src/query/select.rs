//! Column list parsing and projection for `select`.

use crate::error::{CoreError, CoreResult};
use crate::types::Row;

/// Parsed `select` column list.
///
/// Accepts the hosted-API syntax: `*`, plain columns, `alias:column`, and
/// embeds such as `colleges(name, location)` or `college:colleges!inner(*)`.
/// Embed sub-selections do not narrow the attached relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    all: bool,
    fields: Vec<(String, String)>,
}

impl Projection {
    /// The projection that keeps every field.
    #[must_use]
    pub fn all() -> Self {
        Self {
            all: true,
            fields: Vec::new(),
        }
    }

    /// Parses a column list. An empty list selects everything.
    ///
    /// # Errors
    ///
    /// Returns an error on unbalanced parentheses or empty names.
    pub fn parse(columns: &str) -> CoreResult<Self> {
        let mut projection = Self {
            all: false,
            fields: Vec::new(),
        };

        for entry in split_top_level(columns)? {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if entry == "*" {
                projection.all = true;
                continue;
            }

            let head = entry.split('(').next().unwrap_or(entry).trim();
            let (alias, source) = match head.split_once(':') {
                Some((alias, source)) => (alias.trim(), source.trim()),
                None => (head, head),
            };
            let source = source.split('!').next().unwrap_or(source).trim();
            if alias.is_empty() || source.is_empty() {
                return Err(CoreError::invalid_columns(columns, "empty column name"));
            }
            projection
                .fields
                .push((alias.to_string(), source.to_string()));
        }

        if projection.fields.is_empty() {
            projection.all = true;
        }
        Ok(projection)
    }

    /// Returns true if every field is kept.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.all && self.fields.iter().all(|(alias, source)| alias == source)
    }

    /// Applies the projection to a decorated row.
    #[must_use]
    pub fn apply(&self, row: Row) -> Row {
        if self.is_all() {
            return row;
        }

        let mut out = if self.all { row.clone() } else { Row::new() };
        for (alias, source) in &self.fields {
            if let Some(value) = row.get(source) {
                out.insert(alias.clone(), value.clone());
            }
        }
        out
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::all()
    }
}

fn split_top_level(columns: &str) -> CoreResult<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in columns.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| CoreError::invalid_columns(columns, "unbalanced ')'"))?;
            }
            ',' if depth == 0 => {
                parts.push(&columns[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(CoreError::invalid_columns(columns, "unclosed '('"));
    }
    parts.push(&columns[start..]);
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn star_and_empty_keep_everything() {
        assert!(Projection::parse("*").unwrap().is_all());
        assert!(Projection::parse("").unwrap().is_all());
        assert!(Projection::parse(" * , colleges(name)").unwrap().is_all());
    }

    #[test]
    fn plain_columns_project() {
        let projection = Projection::parse("id, title").unwrap();
        let out = projection.apply(row(json!({"id": 1, "title": "X", "status": "open"})));
        assert_eq!(Value::Object(out), json!({"id": 1, "title": "X"}));
    }

    #[test]
    fn embeds_keep_relation_key() {
        let projection = Projection::parse("id, colleges(name, location)").unwrap();
        let out = projection.apply(row(json!({
            "id": 1, "title": "X", "colleges": {"name": "N", "location": "L"}
        })));
        assert_eq!(
            Value::Object(out),
            json!({"id": 1, "colleges": {"name": "N", "location": "L"}})
        );
    }

    #[test]
    fn alias_with_star_adds_key() {
        let projection = Projection::parse("*, college:colleges!inner(name)").unwrap();
        assert!(!projection.is_all());
        let out = projection.apply(row(json!({"id": 1, "colleges": {"name": "N"}})));
        assert_eq!(out["college"], json!({"name": "N"}));
        assert_eq!(out["colleges"], json!({"name": "N"}));
    }

    #[test]
    fn unbalanced_parens_fail() {
        assert!(Projection::parse("colleges(name").is_err());
        assert!(Projection::parse("name)").is_err());
        assert!(Projection::parse(":x").is_err());
    }
}
