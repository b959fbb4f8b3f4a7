//! Filter vocabulary, request parsing, and validation.

mod error;
mod format;
mod parse;
mod types;

// Re-export all public items
pub use error::FilterError;
pub use format::{FormattedFilters, format_filters};
pub use parse::{ParseError, parse_query_forms, parse_query_forms_bytes, query_forms_from_json};
pub use types::{Field, Filter, FilterValue, Operator, RawFilter};
