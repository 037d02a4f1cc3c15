//! Relation attachment.
//!
//! Decorates rows with embedded related rows, mimicking the foreign-key
//! expansion a hosted relational backend performs for `select` with joins.
//! The rules are declared per table in [`schema`]; [`RelationAttacher`]
//! applies them recursively.

mod attach;
pub mod schema;

pub use attach::RelationAttacher;
pub use schema::{relations, ComputeFn, Embed, Relation};
