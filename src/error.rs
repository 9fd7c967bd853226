//! Error types for the booking cache
//!
//! Provides unified error handling using thiserror. The cache itself never
//! surfaces errors to callers; these types describe failures of the storage
//! medium, the network transport and the inspection API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Storage Error ==
/// Failure reported by a storage medium.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Write rejected because the medium is full
    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota} bytes")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Underlying file I/O failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted document could not be (de)serialized
    #[error("Storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    /// Returns true if the medium rejected the write for lack of space.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded { .. })
    }
}

// == Transport Error ==
/// Failure of a network call issued by the request layer.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Server answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection, timeout or other network failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be read
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

// == Request Error ==
/// Error returned by the request layer to its callers.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The network call itself failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response did not match the expected type
    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

// == API Error ==
/// Error type for the inspection HTTP API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for the inspection API.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Result type for storage media.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
