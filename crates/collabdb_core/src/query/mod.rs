//! Deferred query builder.
//!
//! A [`QueryBuilder`] accumulates filters, ordering, limits and at most one
//! mutation, then runs against the table store when [`QueryBuilder::execute`]
//! is awaited.

mod builder;
mod filter;
mod order;
mod response;
mod select;

pub use builder::{QueryBuilder, UpsertOptions};
pub use filter::Filter;
pub use order::{sort_rows, OrderBy, OrderOptions};
pub use response::{Count, QueryError, QueryResponse, SelectOptions};
pub use select::Projection;
