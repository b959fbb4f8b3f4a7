//! Runtime JSON parsing for conference query requests.
//!
//! Request bodies carry the clauses under a `filters` key:
//!
//! ```json
//! {"filters": [
//!     {"field": "CITY", "operator": "EQ", "value": "London"},
//!     {"field": "MAX_ATTENDEES", "operator": "GT", "value": "10"}
//! ]}
//! ```
//!
//! Parsing only checks the shape of the body. Symbols are resolved later by
//! [`format_filters`](crate::format_filters).

use super::types::RawFilter;
use miniserde::json::{Number, Value as JsonValue};
use std::fmt;

/// Error type for request body parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Invalid JSON syntax or encoding.
    InvalidJson,
    /// Expected an object but got something else.
    ExpectedObject,
    /// Expected an array but got something else.
    ExpectedArray,
    /// A clause is missing a required key.
    MissingKey(&'static str),
    /// A clause key holds something other than a string.
    ExpectedString(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson => write!(f, "Invalid JSON syntax or encoding"),
            Self::ExpectedObject => write!(f, "Expected JSON object"),
            Self::ExpectedArray => write!(f, "Expected JSON array"),
            Self::MissingKey(key) => write!(f, "Filter is missing '{key}'"),
            Self::ExpectedString(key) => write!(f, "Filter '{key}' must be a string"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse the clauses of a query request from a JSON string.
///
/// # Example
///
/// ```
/// use conf_query::parse_query_forms;
///
/// let filters = parse_query_forms(
///     r#"{"filters": [{"field": "CITY", "operator": "EQ", "value": "London"}]}"#,
/// ).unwrap();
/// assert_eq!(filters.len(), 1);
/// assert_eq!(filters[0].value, "London");
/// ```
pub fn parse_query_forms(json_str: &str) -> Result<Vec<RawFilter>, ParseError> {
    let json: JsonValue =
        miniserde::json::from_str(json_str).map_err(|_| ParseError::InvalidJson)?;
    query_forms_from_json(&json)
}

/// Parse the clauses of a query request from raw body bytes.
pub fn parse_query_forms_bytes(bytes: &[u8]) -> Result<Vec<RawFilter>, ParseError> {
    let s = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidJson)?;
    parse_query_forms(s)
}

/// Parse the clauses of a query request from an already parsed JSON value.
///
/// A body without a `filters` key is a query without clauses.
pub fn query_forms_from_json(json: &JsonValue) -> Result<Vec<RawFilter>, ParseError> {
    let JsonValue::Object(obj) = json else {
        return Err(ParseError::ExpectedObject);
    };

    match obj.get("filters") {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::Array(items)) => items.iter().map(raw_filter_from_json).collect(),
        Some(_) => Err(ParseError::ExpectedArray),
    }
}

fn raw_filter_from_json(json: &JsonValue) -> Result<RawFilter, ParseError> {
    let JsonValue::Object(obj) = json else {
        return Err(ParseError::ExpectedObject);
    };

    let string_key = |key: &'static str| -> Result<String, ParseError> {
        match obj.get(key) {
            None | Some(JsonValue::Null) => Err(ParseError::MissingKey(key)),
            Some(JsonValue::String(s)) => Ok(s.clone()),
            // Clients commonly send numbers unquoted for integer fields
            Some(JsonValue::Number(n)) if key == "value" => Ok(number_to_string(n)),
            Some(_) => Err(ParseError::ExpectedString(key)),
        }
    };

    Ok(RawFilter {
        field: string_key("field")?,
        operator: string_key("operator")?,
        value: string_key("value")?,
    })
}

fn number_to_string(n: &Number) -> String {
    match n {
        Number::U64(u) => u.to_string(),
        Number::I64(i) => i.to_string(),
        Number::F64(f) => f.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_clause() {
        let filters = parse_query_forms(
            r#"{"filters": [{"field": "CITY", "operator": "EQ", "value": "London"}]}"#,
        )
        .unwrap();
        assert_eq!(filters, vec![RawFilter::new("CITY", "EQ", "London")]);
    }

    #[test]
    fn test_parse_preserves_order() {
        let filters = parse_query_forms(
            r#"{"filters": [
                {"field": "MAX_ATTENDEES", "operator": "LT", "value": "50"},
                {"field": "MONTH", "operator": "EQ", "value": "6"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].field, "MAX_ATTENDEES");
        assert_eq!(filters[1].field, "MONTH");
    }

    #[test]
    fn test_parse_missing_filters_key() {
        assert!(parse_query_forms("{}").unwrap().is_empty());
        assert!(parse_query_forms(r#"{"filters": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_numeric_value() {
        let filters = parse_query_forms(
            r#"{"filters": [{"field": "MONTH", "operator": "EQ", "value": 6}]}"#,
        )
        .unwrap();
        assert_eq!(filters[0].value, "6");
    }

    #[test]
    fn test_parse_invalid_json() {
        assert_eq!(parse_query_forms("{not json"), Err(ParseError::InvalidJson));
        assert_eq!(parse_query_forms_bytes(&[0xff, 0xfe]), Err(ParseError::InvalidJson));
    }

    #[test]
    fn test_parse_wrong_shapes() {
        assert_eq!(parse_query_forms("[]"), Err(ParseError::ExpectedObject));
        assert_eq!(
            parse_query_forms(r#"{"filters": {"field": "CITY"}}"#),
            Err(ParseError::ExpectedArray)
        );
        assert_eq!(
            parse_query_forms(r#"{"filters": ["CITY"]}"#),
            Err(ParseError::ExpectedObject)
        );
    }

    #[test]
    fn test_parse_missing_and_mistyped_keys() {
        assert_eq!(
            parse_query_forms(r#"{"filters": [{"field": "CITY", "value": "x"}]}"#),
            Err(ParseError::MissingKey("operator"))
        );
        assert_eq!(
            parse_query_forms(r#"{"filters": [{"field": "CITY", "operator": "EQ", "value": null}]}"#),
            Err(ParseError::MissingKey("value"))
        );
        assert_eq!(
            parse_query_forms(r#"{"filters": [{"field": 1, "operator": "EQ", "value": "x"}]}"#),
            Err(ParseError::ExpectedString("field"))
        );
    }

    #[test]
    fn test_parse_error_display() {
        assert_eq!(ParseError::MissingKey("field").to_string(), "Filter is missing 'field'");
        assert_eq!(
            ParseError::ExpectedString("operator").to_string(),
            "Filter 'operator' must be a string"
        );
    }
}
