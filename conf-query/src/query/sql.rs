//! SQL rendering of conference queries with parameterized values.

use super::dialect::Dialect;
use super::plan::{ConferenceQuery, SortDir};
use crate::filter::{Field, Filter, FilterError, FilterValue};

/// Maximum length for SQL identifiers (`PostgreSQL` limit is 63).
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Query result with SQL string and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "QueryResult must be used to execute the query"]
pub struct QueryResult {
    /// SQL text with placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub params: Vec<FilterValue>,
}

/// Validate that a string is a safe SQL identifier.
///
/// Starts with an ASCII letter or underscore, continues with ASCII
/// alphanumerics or underscores, and is 1-63 characters long.
///
/// ```
/// use conf_query::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("conferences"));
/// assert!(!is_valid_sql_identifier("conferences; DROP TABLE x"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Property names are camelCase, so columns are always quoted.
fn quote(property: &str) -> String {
    format!("\"{property}\"")
}

impl ConferenceQuery {
    /// Render the query as parameterized SQL against `table`.
    ///
    /// ```
    /// use conf_query::{ConferenceQuery, Postgres, RawFilter};
    ///
    /// let query = ConferenceQuery::from_raw(&[RawFilter::new("MONTH", "EQ", "6")]).unwrap();
    /// let result = query.to_sql(&Postgres, "conferences").unwrap();
    /// assert_eq!(result.sql, r#"SELECT * FROM conferences WHERE "month" = $1 ORDER BY "name" ASC"#);
    /// ```
    pub fn to_sql<D: Dialect>(&self, dialect: &D, table: &str) -> Result<QueryResult, FilterError> {
        if !is_valid_sql_identifier(table) {
            return Err(FilterError::InvalidTable(table.to_string()));
        }

        let mut sql = format!("SELECT * FROM {table}");
        let mut params = Vec::with_capacity(self.filters().len());

        if !self.filters().is_empty() {
            let conditions: Vec<String> = self
                .filters()
                .iter()
                .enumerate()
                .map(|(i, filter)| build_condition(dialect, filter, i + 1))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
            params.extend(self.filters().iter().map(|f| f.value.clone()));
        }

        let order: Vec<String> = self
            .sorts()
            .iter()
            .map(|s| {
                let dir = match s.dir {
                    SortDir::Asc => "ASC",
                    SortDir::Desc => "DESC",
                };
                format!("{} {dir}", sort_key(dialect, s.property))
            })
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));

        Ok(QueryResult { sql, params })
    }
}

/// Repeated properties sort by their smallest element, as `run` does.
fn sort_key<D: Dialect>(dialect: &D, property: &str) -> String {
    let column = quote(property);
    if Field::ALL
        .into_iter()
        .any(|f| f.is_repeated() && f.property() == property)
    {
        dialect.min_element(&column)
    } else {
        column
    }
}

/// Build a single condition bound to parameter `idx`.
fn build_condition<D: Dialect>(dialect: &D, filter: &Filter, idx: usize) -> String {
    let column = quote(filter.field.property());
    if filter.field.is_repeated() {
        dialect.any_element(&column, filter.op, idx)
    } else {
        format!("{column} {} {}", filter.op, dialect.param(idx))
    }
}
