//! Domain error model.

use thiserror::Error;

/// A field violated an invariant at construction time.
///
/// Carries the offending field name and the rejected value rendered as text,
/// so callers can report exactly what was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("validation failed: {field} = {value} ({constraint})")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub constraint: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, value: impl ToString, constraint: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            constraint,
        }
    }

    /// `field` must be `>= 0`.
    pub fn negative(field: &'static str, value: impl ToString) -> Self {
        Self::new(field, value, "must be greater than or equal to zero")
    }

    /// `field` must contain non-whitespace text.
    pub fn empty(field: &'static str) -> Self {
        Self::new(field, "\"\"", "cannot be empty")
    }
}

/// A textual field could not be coerced to the numeric type it requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("conversion failed: {field} = {value:?} is not a valid {expected}{}", row_suffix(.row))]
pub struct ConversionError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
    /// Zero-based position of the source row, when known.
    pub row: Option<usize>,
}

impl ConversionError {
    pub fn new(field: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            field,
            value: value.into(),
            expected,
            row: None,
        }
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" (row {row})"),
        None => String::new(),
    }
}
