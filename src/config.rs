//! Table connection configuration and column schema
//!
//! A [`TableConfig`] is supplied by the embedding application (for example a
//! settings UI that stores it as JSON) and is owned by exactly one
//! [`TableClient`](crate::TableClient) once the client is built.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;
use crate::model::Row;
use crate::model::Value;

/// The declared type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free-form text. Passed through unchecked.
    String,
    /// Numeric value.
    Number,
    /// Boolean value.
    Boolean,
    /// Date value, transmitted as a string. Passed through unchecked.
    Date,
}

impl ColumnType {
    /// Returns the lowercase name of this column type.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
        }
    }

    /// Returns `true` if `value` is acceptable for a column of this type.
    ///
    /// Nulls are always accepted. `String` and `Date` columns accept any
    /// value. `Number` columns additionally accept strings that parse as a
    /// number, since embedding applications often submit form input as text.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            ColumnType::String | ColumnType::Date => true,
            ColumnType::Number => match value {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok(),
                _ => false,
            },
            ColumnType::Boolean => matches!(value, Value::Bool(_)),
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Schema entry declaring one row field's name and expected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// The column name as used in row payloads.
    pub name: String,
    /// The declared value type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    /// Creates a new column declaration.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// The declared column schema of a table, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSchema {
    columns: HashMap<String, Column>,
}

impl TableSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column declaration (builder pattern).
    pub fn column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        let name = name.into();
        self.columns
            .insert(name.clone(), Column::new(name, column_type));
        self
    }

    /// Returns the column declaration for `name`, if declared.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Returns `true` if the schema declares the given column.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Returns the number of declared columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Validates a row against this schema.
    ///
    /// Every key must be a declared column, and each value must be acceptable
    /// for its column's type (see [`ColumnType::accepts`]). Intended to run on
    /// the normalized row, before any request is issued.
    pub fn validate(&self, row: &Row) -> Result<(), ValidationError> {
        for (name, value) in row.values() {
            let column = self
                .columns
                .get(name)
                .ok_or_else(|| ValidationError::unknown_column(name))?;

            if !column.column_type.accepts(value) {
                return Err(ValidationError::type_mismatch(
                    name,
                    column.column_type.name(),
                    value.clone(),
                ));
            }
        }
        Ok(())
    }
}

impl FromIterator<Column> for TableSchema {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|column| (column.name.clone(), column))
                .collect(),
        }
    }
}

/// Connection configuration for one remote table.
///
/// # Example
///
/// ```
/// use glide_tables::{ColumnType, TableConfig, TableSchema};
///
/// let config = TableConfig::new("secret-token", "app-1", "table-1")
///     .schema(
///         TableSchema::new()
///             .column("name", ColumnType::String)
///             .column("age", ColumnType::Number),
///     );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// API token used to authenticate requests.
    pub api_token: String,
    /// The application id of the table resource.
    pub app_id: String,
    /// The table id within the application.
    pub table_id: String,
    /// Declared column schema.
    #[serde(default)]
    pub columns: TableSchema,
}

impl TableConfig {
    /// Creates a new configuration with an empty schema.
    pub fn new(
        api_token: impl Into<String>,
        app_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            app_id: app_id.into(),
            table_id: table_id.into(),
            columns: TableSchema::new(),
        }
    }

    /// Sets the column schema (builder pattern).
    pub fn schema(mut self, columns: TableSchema) -> Self {
        self.columns = columns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::new()
            .column("name", ColumnType::String)
            .column("age", ColumnType::Number)
            .column("active", ColumnType::Boolean)
            .column("joined", ColumnType::Date)
    }

    #[test]
    fn accepts_matching_types() {
        let row = Row::new()
            .set("name", "Ada")
            .set("age", 36)
            .set("active", true)
            .set("joined", "2024-01-01");
        assert!(schema().validate(&row).is_ok());
    }

    #[test]
    fn rejects_unknown_column() {
        let row = Row::new().set("nickname", "Ada");
        let err = schema().validate(&row).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownColumn { ref column } if column == "nickname"
        ));
    }

    #[test]
    fn rejects_non_numeric_value_in_number_column() {
        let row = Row::new().set("age", "not a number");
        let err = schema().validate(&row).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { ref column, .. } if column == "age"
        ));
    }

    #[test]
    fn accepts_numeric_string_in_number_column() {
        let row = Row::new().set("age", "36.5");
        assert!(schema().validate(&row).is_ok());
    }

    #[test]
    fn accepts_null_everywhere() {
        let row = Row::new()
            .set("age", Value::Null)
            .set("active", Value::Null);
        assert!(schema().validate(&row).is_ok());
    }

    #[test]
    fn rejects_string_in_boolean_column() {
        let row = Row::new().set("active", "yes");
        assert!(schema().validate(&row).is_err());
    }

    #[test]
    fn config_deserializes_from_camel_case_json() {
        let json = r#"{
            "apiToken": "tok",
            "appId": "app",
            "tableId": "tbl",
            "columns": {
                "name": { "name": "name", "type": "string" },
                "age": { "name": "age", "type": "number" }
            }
        }"#;
        let config: TableConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_token, "tok");
        assert_eq!(config.columns.len(), 2);
        assert_eq!(
            config.columns.get("age").unwrap().column_type,
            ColumnType::Number
        );
    }
}
