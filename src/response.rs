//! Tolerant parsing of success response bodies

use crate::model::Row;

/// The parsed body of a successful response.
///
/// Bodies are read as raw text and then opportunistically parsed as JSON.
/// A parse failure on a success response yields [`Payload::Text`] rather than
/// an error, to tolerate endpoints that respond with empty or non-JSON
/// bodies.
///
/// # Example
///
/// ```
/// use glide_tables::Payload;
///
/// let payload = Payload::parse(r#"{"rows":[{"name":"Ada"}]}"#);
/// assert_eq!(payload.into_rows().unwrap().len(), 1);
///
/// let payload = Payload::parse("OK");
/// assert_eq!(payload.as_text(), Some("OK"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A list of rows, from a JSON array or a `{"rows": [...]}` wrapper.
    Rows(Vec<Row>),
    /// A single row, from a top-level JSON object.
    Row(Row),
    /// Any other JSON value.
    Json(serde_json::Value),
    /// A body that was not valid JSON, returned verbatim.
    Text(String),
}

impl Payload {
    /// Parses a raw response body.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) => Self::from_json(json),
            Err(_) => Payload::Text(body.to_string()),
        }
    }

    fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Array(_) => match rows_from_array(&json) {
                Some(rows) => Payload::Rows(rows),
                None => Payload::Json(json),
            },
            serde_json::Value::Object(ref map) if map.contains_key("rows") => {
                match rows_from_array(&map["rows"]) {
                    Some(rows) => Payload::Rows(rows),
                    None => Payload::Json(json),
                }
            }
            serde_json::Value::Object(_) => match serde_json::from_value::<Row>(json.clone()) {
                Ok(row) => Payload::Row(row),
                Err(_) => Payload::Json(json),
            },
            other => Payload::Json(other),
        }
    }

    /// Returns the rows if this payload carries any.
    ///
    /// A single-row payload is returned as a one-element slice-equivalent.
    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            Payload::Rows(rows) => Some(rows),
            Payload::Row(row) => Some(vec![row]),
            _ => None,
        }
    }

    /// Returns the single row if this payload is one.
    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Payload::Row(row) => Some(row),
            _ => None,
        }
    }

    /// Returns the raw text if the body was not valid JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` if the body was empty or whitespace.
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Text(text) if text.trim().is_empty())
    }
}

fn rows_from_array(json: &serde_json::Value) -> Option<Vec<Row>> {
    let items = json.as_array()?;
    items
        .iter()
        .map(|item| serde_json::from_value::<Row>(item.clone()).ok())
        .collect()
}
