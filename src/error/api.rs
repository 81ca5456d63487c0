//! API error types

/// Errors produced when the remote service responds with a non-success status.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Best-effort error message extracted from the response body.
        message: String,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Builds an error from a non-success response body.
    ///
    /// The message is extracted with decreasing confidence: a JSON `message`
    /// or `error` field, an XML `<Message>` tag, and finally the raw body
    /// text.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            message: extract_message(body),
        }
    }

    /// Returns the HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
        }
    }

    /// Returns the extracted error message.
    pub fn message(&self) -> &str {
        match self {
            Self::Http { message, .. } => message,
        }
    }
}

/// Extracts the most informative error message achievable from a body.
fn extract_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json_message(&json) {
            return message;
        }
    }

    if let Some(message) = xml_message(body) {
        return message;
    }

    body.trim().to_string()
}

/// Pulls a message out of a JSON error body.
///
/// Recognizes `{"message": "..."}` and `{"error": "..."}`, where `error` may
/// itself be an object carrying a `message` field.
fn json_message(json: &serde_json::Value) -> Option<String> {
    if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }

    match json.get("error") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(inner @ serde_json::Value::Object(_)) => inner
            .get("message")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}

/// Pulls the content of the first `<Message>` tag out of an XML error body.
fn xml_message(body: &str) -> Option<String> {
    let start = body.find("<Message>")? + "<Message>".len();
    let end = body[start..].find("</Message>")? + start;
    let message = body[start..end].trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_message_field() {
        let err = ApiError::from_response(500, r#"{"message":"boom"}"#);
        assert_eq!(err.message(), "boom");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn extracts_json_error_string() {
        let err = ApiError::from_response(400, r#"{"error":"bad request"}"#);
        assert_eq!(err.message(), "bad request");
    }

    #[test]
    fn extracts_nested_json_error_object() {
        let err = ApiError::from_response(403, r#"{"error":{"message":"denied","code":"403"}}"#);
        assert_eq!(err.message(), "denied");
    }

    #[test]
    fn extracts_xml_message_tag() {
        let body = "<Error><Code>AccessDenied</Code><Message>token expired</Message></Error>";
        let err = ApiError::from_response(401, body);
        assert_eq!(err.message(), "token expired");
    }

    #[test]
    fn falls_back_to_raw_text() {
        let err = ApiError::from_response(502, "Bad Gateway\n");
        assert_eq!(err.message(), "Bad Gateway");
    }

    #[test]
    fn json_without_known_fields_falls_back_to_raw_text() {
        let err = ApiError::from_response(500, r#"{"status":"failed"}"#);
        assert_eq!(err.message(), r#"{"status":"failed"}"#);
    }
}
