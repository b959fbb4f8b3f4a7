//! Query planning, SQL rendering, and in-memory evaluation.

mod dialect;
mod eval;
mod plan;
mod sql;

// Re-export all public items
pub use dialect::{Dialect, Postgres, Sqlite};
pub use plan::{ConferenceQuery, DEFAULT_ORDER_FIELD, Sort, SortDir};
pub use sql::{QueryResult, is_valid_sql_identifier};
