//! Table, ambient and interpolation errors.

use gt_core::GtError;
use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while building tables or interpolating them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Query or table is unusable for interpolation (dimensionality, non-numeric
    /// or unsorted axis). Raised before any value is computed.
    #[error("Invalid input on {axis}: {what}")]
    InvalidInput { axis: String, what: String },

    /// Query point lies outside the grid under `Extrapolate::Error`.
    #[error("Value {value} out of bounds on {axis} (grid range {min}..={max})")]
    OutOfBounds {
        axis: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Ambient conditions lack a column a table needs.
    #[error("Missing ambient column '{column}'")]
    MissingColumn { column: String },

    /// A table collection lacks a group an operation needs.
    #[error("Missing table group '{group}'")]
    MissingGroup { group: String },

    /// Table name is not `<family><A|B|C|D|E>`.
    #[error("Malformed table name '{name}': {reason}")]
    MalformedName { name: String, reason: String },

    /// Grid or column lengths disagree.
    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    Shape {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// Group key, table name or column inserted twice.
    #[error("Duplicate {what}: '{key}'")]
    Duplicate { what: &'static str, key: String },

    #[error(transparent)]
    Core(#[from] GtError),
}

impl TableError {
    pub(crate) fn invalid_input(axis: impl Into<String>, what: impl Into<String>) -> Self {
        TableError::InvalidInput {
            axis: axis.into(),
            what: what.into(),
        }
    }
}
