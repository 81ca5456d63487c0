//! Dynamic table row

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// One record of a remote table, modeled as a mapping from column name to
/// [`Value`].
///
/// Rows carry no identity field of their own; row identifiers are opaque
/// strings returned by or supplied to the remote service.
///
/// # Example
///
/// ```
/// use glide_tables::Row;
///
/// let row = Row::new()
///     .set("name", "Contoso")
///     .set("age", 42);
///
/// assert_eq!(row.get_string("name").unwrap(), Some("Contoso"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub(crate) values: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw access
    // =========================================================================

    /// Returns a reference to the value of `column`, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Returns `true` if the row contains the given column.
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Returns a reference to all values.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Returns a mutable reference to all values.
    pub fn values_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.values
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a column value (builder pattern).
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Inserts a column value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    /// Removes a column and returns its value.
    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.values.remove(column)
    }

    // =========================================================================
    // Normalization
    // =========================================================================

    /// Returns this row with empty-string values replaced by [`Value::Null`].
    ///
    /// Applied before transmission. Idempotent.
    pub fn normalized(mut self) -> Self {
        for value in self.values.values_mut() {
            if value.is_empty_string() {
                *value = Value::Null;
            }
        }
        self
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if the column is missing or has the wrong type.
    // Return Ok(None) only if the column exists and is Value::Null.
    // =========================================================================

    /// Gets a string column value.
    pub fn get_string(&self, column: &str) -> Result<Option<&str>, FieldError> {
        match self.values.get(column) {
            None => Err(FieldError::missing(column)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                column,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a numeric column value.
    pub fn get_number(&self, column: &str) -> Result<Option<f64>, FieldError> {
        match self.values.get(column) {
            None => Err(FieldError::missing(column)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(
                column,
                "number",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean column value.
    pub fn get_bool(&self, column: &str) -> Result<Option<bool>, FieldError> {
        match self.values.get(column) {
            None => Err(FieldError::missing(column)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(
                column,
                "bool",
                other.type_name(),
            )),
        }
    }
}

impl From<HashMap<String, Value>> for Row {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
