//! Filter vocabulary: the field and operator allow-lists plus clause types.

use std::fmt;

/// Queryable conference fields.
///
/// Each variant maps an externally exposed symbol (`CITY`, `MAX_ATTENDEES`)
/// to the stored property name (`city`, `maxAttendees`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// `CITY` -> `city`
    City,
    /// `TOPIC` -> `topics` (repeated property)
    Topic,
    /// `MONTH` -> `month`
    Month,
    /// `MAX_ATTENDEES` -> `maxAttendees`
    MaxAttendees,
}

impl Field {
    /// Every field in the allow-list.
    pub const ALL: [Self; 4] = [Self::City, Self::Topic, Self::Month, Self::MaxAttendees];

    /// Resolve an external symbol. Symbols are case-sensitive.
    ///
    /// ```
    /// use conf_query::Field;
    ///
    /// assert_eq!(Field::from_symbol("MAX_ATTENDEES"), Some(Field::MaxAttendees));
    /// assert_eq!(Field::from_symbol("city"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "CITY" => Some(Self::City),
            "TOPIC" => Some(Self::Topic),
            "MONTH" => Some(Self::Month),
            "MAX_ATTENDEES" => Some(Self::MaxAttendees),
            _ => None,
        }
    }

    /// The external symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::City => "CITY",
            Self::Topic => "TOPIC",
            Self::Month => "MONTH",
            Self::MaxAttendees => "MAX_ATTENDEES",
        }
    }

    /// The stored property name.
    #[must_use]
    pub const fn property(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Topic => "topics",
            Self::Month => "month",
            Self::MaxAttendees => "maxAttendees",
        }
    }

    /// Whether clause values for this field are coerced to integers.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Month | Self::MaxAttendees)
    }

    /// Whether the property holds a list of values.
    #[must_use]
    pub const fn is_repeated(self) -> bool {
        matches!(self, Self::Topic)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property())
    }
}

/// Comparison operators accepted in filter clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal: `=`
    Eq,
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    Gteq,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    Lteq,
    /// Not equal: `!=`
    Ne,
}

impl Operator {
    /// Every operator in the allow-list.
    pub const ALL: [Self; 6] = [
        Self::Eq,
        Self::Gt,
        Self::Gteq,
        Self::Lt,
        Self::Lteq,
        Self::Ne,
    ];

    /// Resolve an external symbol (`EQ`, `GTEQ`, ...). Symbols are case-sensitive.
    ///
    /// ```
    /// use conf_query::Operator;
    ///
    /// assert_eq!(Operator::from_symbol("GTEQ"), Some(Operator::Gteq));
    /// assert_eq!(Operator::from_symbol(">="), None);
    /// ```
    #[must_use]
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "EQ" => Some(Self::Eq),
            "GT" => Some(Self::Gt),
            "GTEQ" => Some(Self::Gteq),
            "LT" => Some(Self::Lt),
            "LTEQ" => Some(Self::Lteq),
            "NE" => Some(Self::Ne),
            _ => None,
        }
    }

    /// The external symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Gt => "GT",
            Self::Gteq => "GTEQ",
            Self::Lt => "LT",
            Self::Lteq => "LTEQ",
            Self::Ne => "NE",
        }
    }

    /// The comparison symbol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gteq => ">=",
            Self::Lt => "<",
            Self::Lteq => "<=",
            Self::Ne => "!=",
        }
    }

    /// Every operator except `=` is an inequality.
    #[must_use]
    pub const fn is_inequality(self) -> bool {
        !matches!(self, Self::Eq)
    }

    /// The operator with its operands swapped (`a < b` <=> `b > a`).
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
            Self::Gt => Self::Lt,
            Self::Gteq => Self::Lteq,
            Self::Lt => Self::Gt,
            Self::Lteq => Self::Gteq,
        }
    }

    /// Apply the comparison to two ordered operands.
    #[must_use]
    pub fn compare<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Gt => lhs > rhs,
            Self::Gteq => lhs >= rhs,
            Self::Lt => lhs < rhs,
            Self::Lteq => lhs <= rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter clause as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFilter {
    /// Field symbol, e.g. `CITY`.
    pub field: String,
    /// Operator symbol, e.g. `GTEQ`.
    pub operator: String,
    /// Value as text; integer fields are coerced during validation.
    pub value: String,
}

impl RawFilter {
    /// Create a raw clause.
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// A normalized clause value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    /// Value of an integer field (`month`, `maxAttendees`).
    Int(i64),
    /// Value of a string field, kept verbatim.
    String(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// A validated, normalized filter clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field the clause applies to.
    pub field: Field,
    /// Comparison operator.
    pub op: Operator,
    /// Coerced comparison value.
    pub value: FilterValue,
}

impl Filter {
    /// Create a normalized clause.
    pub const fn new(field: Field, op: Operator, value: FilterValue) -> Self {
        Self { field, op, value }
    }
}
