//! Pre-flight validation error types

use crate::model::Value;

/// A submitted row failed validation against the declared column schema.
///
/// Validation runs locally before any request is issued; a row that fails is
/// never sent over the wire.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    /// The row contains a key not declared in the schema.
    #[error("Unknown column '{column}'")]
    UnknownColumn {
        /// The undeclared column name.
        column: String,
    },

    /// The value does not match the column's declared type.
    #[error("Column '{column}' expects a {expected} value, got {}: {value}", .value.type_name())]
    TypeMismatch {
        /// The column that failed.
        column: String,
        /// The declared type name.
        expected: &'static str,
        /// The offending value.
        value: Value,
    },
}

impl ValidationError {
    /// Creates a new unknown-column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    /// Creates a new type-mismatch error.
    pub fn type_mismatch(column: impl Into<String>, expected: &'static str, value: Value) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected,
            value,
        }
    }

    /// Returns the column this error refers to.
    pub fn column(&self) -> &str {
        match self {
            Self::UnknownColumn { column } | Self::TypeMismatch { column, .. } => column,
        }
    }
}
