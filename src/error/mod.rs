//! Error types

mod api;
mod field;
mod transport;
mod validation;

pub use api::*;
pub use field::*;
pub use transport::*;
pub use validation::*;

/// Top-level error type for all client operations.
///
/// Errors propagate to the caller unmodified; the client performs no local
/// recovery or retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Pre-flight schema validation failed; no request was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transport failed to deliver the request.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote service responded with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested operation is not available in this configuration.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
