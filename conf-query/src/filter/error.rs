//! Filter validation errors.

use super::types::Field;
use std::fmt;

/// Errors produced while validating or rendering a conference query.
///
/// Every variant is a client error: callers translate it into a
/// bad-request response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FilterError {
    /// Field or operator symbol is not in its allow-list.
    InvalidFilter {
        /// The field symbol as supplied.
        field: String,
        /// The operator symbol as supplied.
        operator: String,
    },
    /// A second inequality clause targets a different field.
    MultipleInequalityFields {
        /// The field recorded by the first inequality clause.
        first: Field,
        /// The conflicting field.
        second: Field,
    },
    /// Value for an integer field is not an integer.
    InvalidValue {
        /// The integer field.
        field: Field,
        /// The value as supplied.
        value: String,
    },
    /// Table name is not a valid SQL identifier.
    InvalidTable(String),
}

impl FilterError {
    /// All filter errors map to a 400 response.
    #[must_use]
    pub const fn is_bad_request(&self) -> bool {
        true
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilter { field, operator } => write!(
                f,
                "filter contains invalid field or operator (field `{field}`, operator `{operator}`)"
            ),
            Self::MultipleInequalityFields { first, second } => write!(
                f,
                "inequality filter is allowed on only one field (`{first}` already used, got `{second}`)"
            ),
            Self::InvalidValue { field, value } => {
                write!(f, "value `{value}` for field `{field}` is not an integer")
            },
            Self::InvalidTable(table) => write!(f, "invalid table name `{table}`"),
        }
    }
}

impl std::error::Error for FilterError {}
