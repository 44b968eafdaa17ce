//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Service answered with a non-success status
    #[error("Service error: {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A newer load superseded this one; the result was discarded
    #[error("Load superseded by a newer request")]
    Superseded,
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
