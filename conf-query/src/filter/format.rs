//! Validation and normalization of user-supplied filter clauses.

use super::error::FilterError;
use super::types::{Field, Filter, FilterValue, Operator, RawFilter};

/// Output of [`format_filters`]: the inequality field and normalized clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedFilters {
    /// The single field carrying inequality comparisons, if any.
    pub inequality_field: Option<Field>,
    /// Normalized clauses in input order.
    pub filters: Vec<Filter>,
}

impl FormattedFilters {
    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether there are no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterate the normalized clauses.
    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }
}

impl<'a> IntoIterator for &'a FormattedFilters {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

/// Validate and normalize user-supplied filter clauses.
///
/// Every clause's field and operator are resolved against the allow-lists
/// and all inequality clauses must target the same field. Only once the
/// whole set passes are integer fields coerced. The first failure aborts
/// the whole pass.
///
/// # Example
///
/// ```
/// use conf_query::{Field, FilterValue, RawFilter, format_filters};
///
/// let formatted = format_filters(&[
///     RawFilter::new("MAX_ATTENDEES", "LT", "50"),
///     RawFilter::new("MONTH", "EQ", "6"),
/// ]).unwrap();
///
/// assert_eq!(formatted.inequality_field, Some(Field::MaxAttendees));
/// assert_eq!(formatted.filters[0].value, FilterValue::Int(50));
/// assert_eq!(formatted.filters[1].value, FilterValue::Int(6));
/// ```
pub fn format_filters(raw: &[RawFilter]) -> Result<FormattedFilters, FilterError> {
    format_all(raw).inspect_err(|err| log::warn!("rejected conference filter: {err}"))
}

fn format_all(raw: &[RawFilter]) -> Result<FormattedFilters, FilterError> {
    let mut inequality_field = None;
    let resolved = raw
        .iter()
        .map(|clause| resolve_clause(clause, &mut inequality_field))
        .collect::<Result<Vec<_>, _>>()?;

    let filters = resolved
        .into_iter()
        .map(|(field, op, value)| {
            Ok(Filter {
                field,
                op,
                value: coerce_value(field, value)?,
            })
        })
        .collect::<Result<Vec<_>, FilterError>>()?;

    Ok(FormattedFilters {
        inequality_field,
        filters,
    })
}

/// Resolve one clause's field and operator, threading the inequality field through.
fn resolve_clause<'a>(
    clause: &'a RawFilter,
    inequality_field: &mut Option<Field>,
) -> Result<(Field, Operator, &'a str), FilterError> {
    let (Some(field), Some(op)) = (
        Field::from_symbol(&clause.field),
        Operator::from_symbol(&clause.operator),
    ) else {
        return Err(FilterError::InvalidFilter {
            field: clause.field.clone(),
            operator: clause.operator.clone(),
        });
    };

    if op.is_inequality() {
        match *inequality_field {
            Some(first) if first != field => {
                return Err(FilterError::MultipleInequalityFields {
                    first,
                    second: field,
                });
            },
            Some(_) => {},
            None => {
                log::debug!("inequality field set to `{field}`");
                *inequality_field = Some(field);
            },
        }
    }

    Ok((field, op, &clause.value))
}

/// Coerce a raw value to the type stored for `field`.
fn coerce_value(field: Field, raw: &str) -> Result<FilterValue, FilterError> {
    if !field.is_integer() {
        return Ok(FilterValue::String(raw.to_string()));
    }

    raw.trim_ascii()
        .parse::<i64>()
        .map(FilterValue::Int)
        .map_err(|_| FilterError::InvalidValue {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(field: &str, op: &str, value: &str) -> RawFilter {
        RawFilter::new(field, op, value)
    }

    #[test]
    fn test_empty_input() {
        let formatted = format_filters(&[]).unwrap();
        assert!(formatted.is_empty());
        assert_eq!(formatted.inequality_field, None);
    }

    #[test]
    fn test_inequality_with_equality_on_other_field() {
        let formatted =
            format_filters(&[raw("MAX_ATTENDEES", "LT", "50"), raw("MONTH", "EQ", "6")]).unwrap();

        assert_eq!(formatted.inequality_field, Some(Field::MaxAttendees));
        assert_eq!(
            formatted.filters,
            vec![
                Filter::new(Field::MaxAttendees, Operator::Lt, FilterValue::Int(50)),
                Filter::new(Field::Month, Operator::Eq, FilterValue::Int(6)),
            ]
        );
    }

    #[test]
    fn test_two_inequality_fields_rejected() {
        let err = format_filters(&[raw("CITY", "GT", "A"), raw("TOPIC", "LT", "Z")]).unwrap_err();
        assert_eq!(
            err,
            FilterError::MultipleInequalityFields {
                first: Field::City,
                second: Field::Topic,
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = format_filters(&[raw("BOGUS", "EQ", "x")]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFilter { ref field, .. } if field == "BOGUS"));
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = format_filters(&[raw("CITY", "LIKE", "x")]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFilter { ref operator, .. } if operator == "LIKE"));
    }

    #[test]
    fn test_first_failure_aborts() {
        // Invalid clause after a conflicting one: the conflict is reported
        let err = format_filters(&[
            raw("CITY", "GT", "A"),
            raw("MONTH", "LT", "3"),
            raw("BOGUS", "EQ", "x"),
        ])
        .unwrap_err();
        assert!(matches!(err, FilterError::MultipleInequalityFields { .. }));
    }

    #[test]
    fn test_same_inequality_field_twice() {
        let formatted =
            format_filters(&[raw("MONTH", "GTEQ", "3"), raw("MONTH", "LTEQ", "9")]).unwrap();
        assert_eq!(formatted.inequality_field, Some(Field::Month));
        assert_eq!(formatted.len(), 2);
    }

    #[test]
    fn test_equality_never_records_field() {
        let formatted = format_filters(&[
            raw("CITY", "EQ", "London"),
            raw("TOPIC", "EQ", "Rust"),
            raw("MONTH", "EQ", "6"),
        ])
        .unwrap();
        assert_eq!(formatted.inequality_field, None);
    }

    #[test]
    fn test_ne_counts_as_inequality() {
        let err = format_filters(&[raw("CITY", "NE", "Paris"), raw("MONTH", "GT", "1")]).unwrap_err();
        assert!(matches!(err, FilterError::MultipleInequalityFields { .. }));
    }

    #[test]
    fn test_string_fields_keep_value() {
        let formatted = format_filters(&[raw("CITY", "EQ", " 42 ")]).unwrap();
        assert_eq!(formatted.filters[0].value, FilterValue::String(" 42 ".into()));
    }

    #[test]
    fn test_integer_coercion_trims_whitespace() {
        let formatted = format_filters(&[raw("MONTH", "EQ", " 12 ")]).unwrap();
        assert_eq!(formatted.filters[0].value, FilterValue::Int(12));

        let formatted = format_filters(&[raw("MAX_ATTENDEES", "GT", "-5")]).unwrap();
        assert_eq!(formatted.filters[0].value, FilterValue::Int(-5));
    }

    #[test]
    fn test_non_numeric_integer_value() {
        let err = format_filters(&[raw("MAX_ATTENDEES", "EQ", "fifty")]).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidValue {
                field: Field::MaxAttendees,
                value: "fifty".into(),
            }
        );

        let err = format_filters(&[raw("MONTH", "EQ", "")]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidValue { field: Field::Month, .. }));
    }

    #[test]
    fn test_integer_coercion_ignores_unicode_whitespace() {
        let err = format_filters(&[raw("MONTH", "EQ", "\u{3000}6")]).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidValue {
                field: Field::Month,
                value: "\u{3000}6".into(),
            }
        );
    }

    #[test]
    fn test_clause_errors_reported_before_coercion() {
        let err = format_filters(&[
            raw("MONTH", "EQ", "x"),
            raw("CITY", "GT", "A"),
            raw("TOPIC", "LT", "Z"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            FilterError::MultipleInequalityFields {
                first: Field::City,
                second: Field::Topic,
            }
        );

        let err = format_filters(&[raw("MONTH", "EQ", "x"), raw("BOGUS", "EQ", "y")]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFilter { .. }));
    }

    #[test]
    fn test_order_preserved() {
        let input = [
            raw("TOPIC", "EQ", "Web"),
            raw("CITY", "EQ", "Oslo"),
            raw("MONTH", "EQ", "4"),
        ];
        let formatted = format_filters(&input).unwrap();
        let fields: Vec<_> = formatted.iter().map(|f| f.field).collect();
        assert_eq!(fields, vec![Field::Topic, Field::City, Field::Month]);
    }
}
