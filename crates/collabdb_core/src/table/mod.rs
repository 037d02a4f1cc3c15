//! Table store: named row sequences and id allocation.

mod store;

pub use store::{next_id, TableStore, Tables};
