//! SQL dialect implementations for Postgres and `SQLite`.
//!
//! Each dialect handles placeholder syntax and how a predicate over a
//! repeated (list) property is expressed.

use crate::filter::Operator;

/// SQL dialect trait for database-specific syntax.
pub trait Dialect: Clone + Copy {
    /// Format a parameter placeholder (e.g., `$1` for Postgres, `?1` for `SQLite`).
    fn param(&self, idx: usize) -> String;

    /// Predicate that holds when any element of the list column satisfies
    /// `element <op> param`.
    fn any_element(&self, column: &str, op: Operator, idx: usize) -> String;

    /// Sort key for a list column: its smallest element.
    fn min_element(&self, column: &str) -> String;
}

/// Postgres dialect. Repeated properties are array columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("${idx}")
    }

    fn any_element(&self, column: &str, op: Operator, idx: usize) -> String {
        // ANY puts the array on the right, so the comparison is mirrored
        format!("${idx} {} ANY({column})", op.mirrored())
    }

    fn min_element(&self, column: &str) -> String {
        format!("(SELECT min(x) FROM unnest({column}) x)")
    }
}

/// `SQLite` dialect. Repeated properties are JSON array columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("?{idx}")
    }

    fn any_element(&self, column: &str, op: Operator, idx: usize) -> String {
        format!("EXISTS (SELECT 1 FROM json_each({column}) WHERE value {op} ?{idx})")
    }

    fn min_element(&self, column: &str) -> String {
        format!("(SELECT min(value) FROM json_each({column}))")
    }
}
