//! Transport seam between the client and the HTTP stack
//!
//! The client builds [`HttpRequest`] values and hands them to a [`Transport`].
//! Keeping the seam here means the HTTP dialect and validation logic never
//! touch the underlying HTTP library, and tests can substitute a recording
//! mock.

mod reqwest;

pub use self::reqwest::ReqwestTransport;

use async_trait::async_trait;

use crate::error::TransportError;

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Returns the method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound HTTP request, fully shaped by the dialect layer.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL, query string included.
    pub url: String,
    /// Request headers as name/value pairs.
    pub headers: Vec<(String, String)>,
    /// JSON body, if the operation carries one.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a new request without headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header (builder pattern).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body (builder pattern).
    pub fn json_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.header("Content-Type", "application/json")
    }
}

/// One inbound HTTP response, body already read as text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` if the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers an [`HttpRequest`] and reads back the response.
///
/// One request per call; no pooling or ordering guarantees beyond what the
/// implementation provides. Implementations must be shareable across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response with its body read as text.
    ///
    /// A non-success status is not an error at this layer; the client decides
    /// how to interpret it.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
