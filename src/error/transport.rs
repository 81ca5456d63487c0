//! Transport error types

/// Errors raised by the transport layer before a response is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network or connection failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request header could not be constructed.
    #[error("Invalid request header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The request URL is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Creates a new invalid-header error.
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Creates a new invalid-URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl(url.into())
    }
}
