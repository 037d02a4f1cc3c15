//! Recursive relation attacher.

use crate::error::CoreResult;
use crate::relation::schema::{relations, Embed, Relation};
use crate::table::Tables;
use crate::types::{Row, Table};
use crate::value::strict_eq;
use serde_json::Value;

/// Decorates rows with their embedded relations.
///
/// The attacher only reads the table set it borrows. Output rows are shallow
/// copies, so callers may mutate them freely without touching stored rows.
#[derive(Debug, Clone, Copy)]
pub struct RelationAttacher<'a> {
    tables: &'a Tables,
}

impl<'a> RelationAttacher<'a> {
    /// Creates an attacher over a committed table set.
    #[must_use]
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    /// Returns a copy of `row` enriched with the relations of `table`.
    ///
    /// Tables without rules yield an unchanged copy.
    ///
    /// # Errors
    ///
    /// Returns an error if a computed field cannot be serialized.
    pub fn attach(&self, table: Table, row: &Row) -> CoreResult<Row> {
        let mut path = Vec::new();
        self.attach_on_path(table, row, &mut path)
    }

    /// Attaches every row in order.
    ///
    /// # Errors
    ///
    /// Returns the first attachment error.
    pub fn attach_all<'r>(
        &self,
        table: Table,
        rows: impl IntoIterator<Item = &'r Row>,
    ) -> CoreResult<Vec<Row>> {
        rows.into_iter().map(|row| self.attach(table, row)).collect()
    }

    /// `path` holds the tables currently being decorated; a nested embed of
    /// a table already on the path is copied without further expansion.
    fn attach_on_path(&self, table: Table, row: &Row, path: &mut Vec<Table>) -> CoreResult<Row> {
        let mut out = row.clone();
        path.push(table);

        for relation in relations(table) {
            let value = match relation {
                Relation::BelongsTo {
                    table: target,
                    foreign_key,
                    embed,
                    ..
                } => match self.tables.find_referenced(*target, row.get(*foreign_key)) {
                    Some(related) => self.embed(*target, related, *embed, path)?,
                    None => Value::Null,
                },
                Relation::HasMany {
                    table: source,
                    foreign_key,
                    embed,
                    ..
                } => {
                    let mut items = Vec::new();
                    if let Some(id) = row.get("id").filter(|id| !id.is_null()) {
                        for related in self.tables.get(*source) {
                            if strict_eq(related.get(*foreign_key), id) {
                                items.push(self.embed(*source, related, *embed, path)?);
                            }
                        }
                    }
                    Value::Array(items)
                }
                Relation::Computed { compute, .. } => compute(self.tables, row)?,
            };
            out.insert(relation.key().to_string(), value);
        }

        path.pop();
        Ok(out)
    }

    fn embed(
        &self,
        table: Table,
        related: &Row,
        embed: Embed,
        path: &mut Vec<Table>,
    ) -> CoreResult<Value> {
        Ok(match embed {
            Embed::Fields(fields) => Value::Object(
                fields
                    .iter()
                    .filter_map(|field| {
                        related
                            .get(*field)
                            .map(|value| ((*field).to_string(), value.clone()))
                    })
                    .collect(),
            ),
            Embed::All => Value::Object(related.clone()),
            Embed::Nested if path.contains(&table) => Value::Object(related.clone()),
            Embed::Nested => Value::Object(self.attach_on_path(table, related, path)?),
            Embed::Pluck(field) => related.get(field).cloned().unwrap_or(Value::Null),
        })
    }
}
