//! Query builder and its execution paths.

use crate::error::{CoreError, CoreResult};
use crate::query::filter::{Filter, RangeOp};
use crate::query::order::{sort_rows, OrderBy, OrderOptions};
use crate::query::response::{QueryResponse, SelectOptions};
use crate::query::select::Projection;
use crate::relation::RelationAttacher;
use crate::table::{next_id, TableStore, Tables};
use crate::types::{now_timestamp, Row, Table};
use crate::value::{is_nullish, strict_eq};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Options for [`QueryBuilder::upsert`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertOptions {
    /// Comma-separated conflict columns; `None` matches on `id`.
    pub on_conflict: Option<String>,
}

impl UpsertOptions {
    /// Matches existing rows on the given comma-separated columns.
    pub fn on_conflict(columns: impl Into<String>) -> Self {
        Self {
            on_conflict: Some(columns.into()),
        }
    }

    fn columns(&self) -> Vec<String> {
        self.on_conflict
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|column| !column.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Cardinality {
    #[default]
    Many,
    Single,
    MaybeSingle,
}

#[derive(Debug, Clone)]
enum Mutation {
    Insert(Value),
    Update(Value),
    Upsert {
        payload: Value,
        on_conflict: Vec<String>,
    },
    Delete,
}

type Outcome = (Option<Value>, Option<usize>);

/// A chainable, deferred query against one table.
///
/// Nothing touches the store until [`execute`](Self::execute) is awaited.
/// The last mutation method called (`insert`, `update`, `upsert`, `delete`)
/// selects the execution path; without one the query is a read.
///
/// ```rust,ignore
/// let response = db
///     .from(Table::Agreements)
///     .update(json!({"status": "signed"}))
///     .eq("id", 5)
///     .single()
///     .execute()
///     .await;
/// ```
#[derive(Debug)]
#[must_use = "a query does nothing until executed"]
pub struct QueryBuilder {
    store: Arc<TableStore>,
    latency: Duration,
    table: Result<Table, String>,
    columns: String,
    select_options: SelectOptions,
    filters: Vec<Filter>,
    orders: Vec<OrderBy>,
    range: Option<(usize, usize)>,
    limit: Option<usize>,
    cardinality: Cardinality,
    mutation: Option<Mutation>,
}

impl QueryBuilder {
    /// `table` carries the unknown name when the caller asked for one, so
    /// the failure surfaces in the response envelope.
    pub(crate) fn new(
        store: Arc<TableStore>,
        latency: Duration,
        table: Result<Table, String>,
    ) -> Self {
        Self {
            store,
            latency,
            table,
            columns: "*".to_string(),
            select_options: SelectOptions::default(),
            filters: Vec::new(),
            orders: Vec::new(),
            range: None,
            limit: None,
            cardinality: Cardinality::Many,
            mutation: None,
        }
    }

    /// Sets the column list.
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// Sets the column list and count options.
    pub fn select_with(mut self, columns: &str, options: SelectOptions) -> Self {
        self.columns = columns.to_string();
        self.select_options = options;
        self
    }

    /// Inserts one row (object) or several (array of objects).
    pub fn insert(mut self, rows: impl Into<Value>) -> Self {
        self.mutation = Some(Mutation::Insert(rows.into()));
        self
    }

    /// Merges `patch` into every row matching the filters.
    pub fn update(mut self, patch: impl Into<Value>) -> Self {
        self.mutation = Some(Mutation::Update(patch.into()));
        self
    }

    /// Replaces the conflicting row or inserts a new one.
    pub fn upsert(mut self, rows: impl Into<Value>, options: UpsertOptions) -> Self {
        self.mutation = Some(Mutation::Upsert {
            payload: rows.into(),
            on_conflict: options.columns(),
        });
        self
    }

    /// Deletes every row matching the filters.
    pub fn delete(mut self) -> Self {
        self.mutation = Some(Mutation::Delete);
        self
    }

    /// Keeps rows where `column` strictly equals `value`.
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Keeps rows where `column` does not strictly equal `value`.
    pub fn neq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Neq {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Keeps rows where `column` equals one of `values` (the hosted API's `in`).
    pub fn in_<V: Into<Value>>(mut self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.filters.push(Filter::In {
            column: column.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Keeps rows whose `column` contains `pattern`, ignoring case and `%`.
    pub fn ilike(mut self, column: &str, pattern: &str) -> Self {
        self.filters.push(Filter::ILike {
            column: column.to_string(),
            pattern: pattern.to_string(),
        });
        self
    }

    /// Keeps rows where `column >= value` numerically.
    pub fn gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.range_filter(column, RangeOp::Gte, value.into())
    }

    /// Keeps rows where `column > value` numerically.
    pub fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.range_filter(column, RangeOp::Gt, value.into())
    }

    /// Keeps rows where `column <= value` numerically.
    pub fn lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.range_filter(column, RangeOp::Lte, value.into())
    }

    /// Keeps rows where `column < value` numerically.
    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.range_filter(column, RangeOp::Lt, value.into())
    }

    /// Keeps rows where `column` is missing or `null`.
    pub fn is_null(mut self, column: &str) -> Self {
        self.filters.push(Filter::IsNull {
            column: column.to_string(),
        });
        self
    }

    /// Adds a sort key; earlier keys take precedence.
    pub fn order(mut self, column: &str, options: OrderOptions) -> Self {
        self.orders.push(OrderBy {
            column: column.to_string(),
            ascending: options.ascending,
        });
        self
    }

    /// Keeps at most `count` rows.
    pub fn limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// Keeps rows `from..=to` of the ordered result.
    pub fn range(mut self, from: usize, to: usize) -> Self {
        self.range = Some((from, to));
        self
    }

    /// Requires exactly one result row; `data` becomes that row.
    pub fn single(mut self) -> Self {
        self.cardinality = Cardinality::Single;
        self
    }

    /// Allows zero or one result row; `data` becomes the row or `null`.
    pub fn maybe_single(mut self) -> Self {
        self.cardinality = Cardinality::MaybeSingle;
        self
    }

    /// Returns the target table, if the name was known.
    #[must_use]
    pub fn table(&self) -> Option<Table> {
        self.table.as_ref().ok().copied()
    }

    /// Returns the execution path this query will take.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self.mutation {
            None => "select",
            Some(Mutation::Insert(_)) => "insert",
            Some(Mutation::Update(_)) => "update",
            Some(Mutation::Upsert { .. }) => "upsert",
            Some(Mutation::Delete) => "delete",
        }
    }

    /// Runs the query after the simulated round trip.
    ///
    /// Never fails: errors, including a panic inside execution, are reported
    /// in the envelope. Execution runs on its own task, so once started a
    /// mutation commits even if this future is dropped.
    pub async fn execute(self) -> QueryResponse {
        let table = self.table_name().to_string();
        let mode = self.mode();

        let task = tokio::spawn(async move {
            tokio::time::sleep(self.latency).await;
            trace!(latency_ms = self.latency.as_millis() as u64, "round trip simulated");
            self.run_logged()
        });

        match task.await {
            Ok(response) => response,
            Err(err) => {
                warn!(table = %table, mode, error = %err, "query task aborted");
                QueryResponse::failure(&CoreError::execution(err.to_string()))
            }
        }
    }

    fn run_logged(&self) -> QueryResponse {
        let result = self.run();
        match &result {
            Ok((data, count)) => debug!(
                table = self.table_name(),
                mode = self.mode(),
                rows = data.as_ref().map_or(0, |d| d.as_array().map_or(1, Vec::len)),
                count = ?count,
                "query executed"
            ),
            Err(err) => warn!(
                table = self.table_name(),
                mode = self.mode(),
                error = %err,
                "query failed"
            ),
        }
        result.into()
    }

    fn run(&self) -> CoreResult<Outcome> {
        let table = self.table.clone().map_err(CoreError::unknown_table)?;
        match &self.mutation {
            None => self.run_select(table),
            Some(Mutation::Insert(payload)) => self.run_insert(table, payload),
            Some(Mutation::Update(patch)) => self.run_update(table, patch),
            Some(Mutation::Upsert {
                payload,
                on_conflict,
            }) => self.run_upsert(table, payload, on_conflict),
            Some(Mutation::Delete) => self.run_delete(table),
        }
    }

    fn run_select(&self, table: Table) -> CoreResult<Outcome> {
        let projection = Projection::parse(&self.columns)?;

        self.store.read(|tables| {
            let mut rows: Vec<Row> = tables
                .get(table)
                .iter()
                .filter(|row| Filter::all(&self.filters, row))
                .cloned()
                .collect();

            let count = self.select_options.count.map(|_| rows.len());
            if self.select_options.head {
                return Ok((None, count));
            }

            sort_rows(&mut rows, &self.orders);
            let rows = self.window(rows);

            let attacher = RelationAttacher::new(tables);
            let decorated = rows
                .iter()
                .map(|row| attacher.attach(table, row).map(|row| projection.apply(row)))
                .collect::<CoreResult<Vec<_>>>()?;

            Ok((self.resolve(decorated)?, count))
        })
    }

    fn run_insert(&self, table: Table, payload: &Value) -> CoreResult<Outcome> {
        let incoming = payload_rows(payload)?;
        let now = now_timestamp();

        self.store.write(|tables| {
            let mut rows = tables.get(table).to_vec();
            let first_new = rows.len();
            for mut row in incoming {
                prepare_new_row(&mut row, &rows, &now);
                rows.push(row);
            }
            tables.set(table, rows);

            let inserted = self.decorate(tables, table, first_new..tables.len(table))?;
            Ok((self.resolve(inserted)?, None))
        })
    }

    fn run_update(&self, table: Table, patch: &Value) -> CoreResult<Outcome> {
        let patch = patch
            .as_object()
            .ok_or_else(|| CoreError::invalid_payload("update payload must be an object"))?;
        let now = now_timestamp();

        self.store.write(|tables| {
            let mut matched = Vec::new();
            let rows: Vec<Row> = tables
                .get(table)
                .iter()
                .enumerate()
                .map(|(position, row)| {
                    if !Filter::all(&self.filters, row) {
                        return row.clone();
                    }
                    matched.push(position);

                    let stamp = table.has_lifecycle() || row.contains_key("updated_at");
                    let mut merged = row.clone();
                    merged.extend(patch.clone());
                    if stamp && !patch.contains_key("updated_at") {
                        merged.insert("updated_at".to_string(), Value::String(now.clone()));
                    }
                    merged
                })
                .collect();
            tables.set(table, rows);

            let updated = self.decorate(tables, table, matched)?;
            Ok((self.resolve(updated)?, None))
        })
    }

    fn run_upsert(&self, table: Table, payload: &Value, on_conflict: &[String]) -> CoreResult<Outcome> {
        let incoming = payload_rows(payload)?;
        let now = now_timestamp();

        self.store.write(|tables| {
            let mut rows = tables.get(table).to_vec();
            let mut touched = Vec::with_capacity(incoming.len());

            for mut row in incoming {
                match find_conflict(&rows, &row, on_conflict) {
                    Some(position) => {
                        merge_conflicting(&mut rows[position], row, &now);
                        touched.push(position);
                    }
                    None => {
                        prepare_new_row(&mut row, &rows, &now);
                        rows.push(row);
                        touched.push(rows.len() - 1);
                    }
                }
            }
            tables.set(table, rows);

            let upserted = self.decorate(tables, table, touched)?;
            Ok((self.resolve(upserted)?, None))
        })
    }

    fn run_delete(&self, table: Table) -> CoreResult<Outcome> {
        self.store.write(|tables| {
            let before = tables.len(table);
            let kept: Vec<Row> = tables
                .get(table)
                .iter()
                .filter(|row| !Filter::all(&self.filters, row))
                .cloned()
                .collect();
            let removed = before - kept.len();
            tables.set(table, kept);

            debug!(table = %table, removed, "rows deleted");
            Ok((Some(Value::Array(Vec::new())), None))
        })
    }

    fn decorate(
        &self,
        tables: &Tables,
        table: Table,
        positions: impl IntoIterator<Item = usize>,
    ) -> CoreResult<Vec<Row>> {
        let rows = tables.get(table);
        RelationAttacher::new(tables).attach_all(
            table,
            positions.into_iter().filter_map(|position| rows.get(position)),
        )
    }

    fn window(&self, rows: Vec<Row>) -> Vec<Row> {
        let mut rows = match self.range {
            Some((from, to)) if to < from => Vec::new(),
            Some((from, to)) => rows.into_iter().skip(from).take((to - from).saturating_add(1)).collect(),
            None => rows,
        };
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }

    fn resolve(&self, rows: Vec<Row>) -> CoreResult<Option<Value>> {
        let found = rows.len();
        match self.cardinality {
            Cardinality::Many => Ok(Some(Value::Array(
                rows.into_iter().map(Value::Object).collect(),
            ))),
            Cardinality::Single if found == 1 => Ok(rows.into_iter().next().map(Value::Object)),
            Cardinality::Single => Err(CoreError::ExpectedSingleRow { found }),
            Cardinality::MaybeSingle if found <= 1 => {
                Ok(rows.into_iter().next().map(Value::Object))
            }
            Cardinality::MaybeSingle => Err(CoreError::ExpectedAtMostOneRow { found }),
        }
    }

    fn range_filter(mut self, column: &str, op: RangeOp, value: Value) -> Self {
        self.filters.push(Filter::Range {
            column: column.to_string(),
            op,
            value,
        });
        self
    }

    fn table_name(&self) -> &str {
        match &self.table {
            Ok(table) => table.as_str(),
            Err(name) => name,
        }
    }
}

/// Splits an insert/upsert payload into rows.
fn payload_rows(payload: &Value) -> CoreResult<Vec<Row>> {
    let invalid = || CoreError::invalid_payload("insert payload must be an object or an array of objects");
    match payload {
        Value::Object(row) => Ok(vec![row.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_object().cloned().ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}

/// Assigns `id` and `created_at` when the caller left them out.
fn prepare_new_row(row: &mut Row, existing: &[Row], now: &str) {
    if is_nullish(row.get("id")) {
        row.insert("id".to_string(), Value::from(next_id(existing)));
    }
    if is_nullish(row.get("created_at")) {
        row.insert("created_at".to_string(), Value::String(now.to_string()));
    }
}

/// Merges an upserted row onto the stored row it conflicts with.
///
/// A nullish `id` or `created_at` on the incoming row is treated as absent,
/// so the stored values survive.
fn merge_conflicting(stored: &mut Row, incoming: Row, now: &str) {
    for (field, value) in incoming {
        if matches!(field.as_str(), "id" | "created_at") && value.is_null() {
            continue;
        }
        stored.insert(field, value);
    }
    stored.insert("updated_at".to_string(), Value::String(now.to_string()));
}

/// Finds the row an upsert replaces.
///
/// With conflict columns, every column must be present on the incoming row
/// and strictly equal on the existing one; otherwise rows match on `id`.
fn find_conflict(rows: &[Row], incoming: &Row, on_conflict: &[String]) -> Option<usize> {
    if on_conflict.is_empty() {
        let id = incoming.get("id").filter(|id| !id.is_null())?;
        return rows.iter().position(|row| strict_eq(row.get("id"), id));
    }

    let keys: Vec<(&String, &Value)> = on_conflict
        .iter()
        .map(|column| incoming.get(column).map(|value| (column, value)))
        .collect::<Option<_>>()?;

    rows.iter().position(|row| {
        keys.iter()
            .all(|(column, value)| strict_eq(row.get(*column), value))
    })
}
