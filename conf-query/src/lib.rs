// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Property names like maxAttendees in docs
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::must_use_candidate)] // Accessors don't need must_use

//! # conf-query - Conference Query Filters
//!
//! Validates user-supplied conference filters against fixed allow-lists and
//! enforces the datastore rule that inequality comparisons may target only
//! one field. Validated filters become a [`ConferenceQuery`] that can be
//! rendered as SQL or evaluated against in-memory [`Conference`] records.
//!
//! ## Quick Start
//!
//! ```
//! # use conf_query::prelude::*;
//! let raw = parse_query_forms(r#"{"filters": [
//!     {"field": "MAX_ATTENDEES", "operator": "LT", "value": "50"},
//!     {"field": "MONTH", "operator": "EQ", "value": "6"}
//! ]}"#).unwrap();
//!
//! let query = ConferenceQuery::from_raw(&raw).unwrap();
//! assert_eq!(query.inequality_field(), Some(Field::MaxAttendees));
//!
//! let result = query.to_sql(&Postgres, "conferences").unwrap();
//! assert!(result.sql.contains(r#"ORDER BY "maxAttendees" ASC, "name" ASC"#));
//! assert_eq!(result.params, vec![FilterValue::Int(50), FilterValue::Int(6)]);
//! ```
//!
//! ## Vocabulary
//!
//! | Field | Property | | Operator | Symbol |
//! |-------|----------|-|----------|--------|
//! | `CITY` | `city` | | `EQ` | `=` |
//! | `TOPIC` | `topics` | | `GT` | `>` |
//! | `MONTH` | `month` | | `GTEQ` | `>=` |
//! | `MAX_ATTENDEES` | `maxAttendees` | | `LT` | `<` |
//! | | | | `LTEQ` | `<=` |
//! | | | | `NE` | `!=` |
//!
//! Every operator except `EQ` is an inequality. `MONTH` and `MAX_ATTENDEES`
//! values are coerced to integers.

mod conference;
mod filter;
mod query;

pub use conference::{
    Conference, ConferenceError, ConferenceForm, DEFAULT_CITY, DEFAULT_TOPICS,
    NEARLY_SOLD_OUT_SEATS, PropertyValue, featured_speaker_announcement,
    nearly_sold_out_announcement, parse_conferences,
};
pub use filter::{
    Field, Filter, FilterError, FilterValue, FormattedFilters, Operator, ParseError, RawFilter,
    format_filters, parse_query_forms, parse_query_forms_bytes, query_forms_from_json,
};
pub use query::{
    ConferenceQuery, DEFAULT_ORDER_FIELD, Dialect, Postgres, QueryResult, Sort, SortDir, Sqlite,
    is_valid_sql_identifier,
};

/// Re-export miniserde's json module for callers handling request bodies.
pub use miniserde::json;

/// Prelude module for convenient imports.
///
/// ```
/// use conf_query::prelude::*;
/// let query = ConferenceQuery::from_raw(&[RawFilter::new("CITY", "EQ", "Oslo")]).unwrap();
/// assert!(query.inequality_field().is_none());
/// ```
pub mod prelude {
    pub use crate::{
        Conference, ConferenceError, ConferenceForm, ConferenceQuery, Dialect, Field, Filter,
        FilterError, FilterValue, FormattedFilters, Operator, ParseError, Postgres, QueryResult,
        RawFilter, Sort, SortDir, Sqlite, format_filters, json, parse_conferences,
        parse_query_forms, parse_query_forms_bytes,
    };
}
