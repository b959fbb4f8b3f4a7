//! Query plan built from validated filters.

use crate::filter::{Field, Filter, FilterError, FormattedFilters, RawFilter, format_filters};

/// Property every conference query is ordered by last.
pub const DEFAULT_ORDER_FIELD: &str = "name";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Sort key over a stored property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// Stored property name.
    pub property: &'static str,
    /// Direction.
    pub dir: SortDir,
}

impl Sort {
    /// Ascending sort on `property`.
    pub const fn asc(property: &'static str) -> Self {
        Self {
            property,
            dir: SortDir::Asc,
        }
    }
}

/// A conference query: sort keys plus filter predicates.
///
/// The datastore requires the inequality property to be the first sort
/// key, so results are ordered by it first and by `name` second.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "ConferenceQuery does nothing until rendered or run"]
pub struct ConferenceQuery {
    inequality_field: Option<Field>,
    sorts: Vec<Sort>,
    filters: Vec<Filter>,
}

impl ConferenceQuery {
    /// Plan a query from already validated filters.
    pub fn from_formatted(formatted: FormattedFilters) -> Self {
        let FormattedFilters {
            inequality_field,
            filters,
        } = formatted;

        let mut sorts = Vec::with_capacity(2);
        if let Some(field) = inequality_field {
            sorts.push(Sort::asc(field.property()));
        }
        sorts.push(Sort::asc(DEFAULT_ORDER_FIELD));

        Self {
            inequality_field,
            sorts,
            filters,
        }
    }

    /// Validate raw clauses and plan the query.
    ///
    /// ```
    /// use conf_query::{ConferenceQuery, RawFilter};
    ///
    /// let query = ConferenceQuery::from_raw(&[RawFilter::new("MONTH", "GT", "6")]).unwrap();
    /// let order: Vec<_> = query.sorts().iter().map(|s| s.property).collect();
    /// assert_eq!(order, ["month", "name"]);
    /// ```
    pub fn from_raw(raw: &[RawFilter]) -> Result<Self, FilterError> {
        format_filters(raw).map(Self::from_formatted)
    }

    /// The field carrying inequality comparisons, if any.
    pub const fn inequality_field(&self) -> Option<Field> {
        self.inequality_field
    }

    /// Sort keys in priority order.
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    /// Filter predicates in input order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}
