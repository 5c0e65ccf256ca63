//! Error types for the instrumented cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache facade, its backing store and the HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing store could not be reached or is in an unusable state
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Operation against a key holding the wrong kind of value
    #[error("Wrong type: {0}")]
    WrongType(String),

    /// Decoder could not interpret the raw bytes
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Call arguments or results could not be serialized into history
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key not found (raised by the HTTP surface only, the facade returns `Lookup::NotFound`)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::WrongType(_) => StatusCode::CONFLICT,
            CacheError::Decoding(_) => StatusCode::BAD_REQUEST,
            CacheError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
