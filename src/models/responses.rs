//! Response DTOs for the cache HTTP surface
//!
//! Defines the structure of outgoing response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheKey, Replay};

/// Response body for the store operation (PUT /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// The generated key
    pub key: CacheKey,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: CacheKey) -> Self {
        Self { key }
    }
}

/// Response body for the get operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// Decoded value, or the raw bytes as an array when no decoder was asked for
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the call counter endpoint (GET /calls/:name)
#[derive(Debug, Clone, Serialize)]
pub struct CallsResponse {
    /// Qualified operation name
    pub name: String,
    /// Number of recorded calls
    pub calls: i64,
}

/// Response body for the replay endpoint (GET /replay/:name)
#[derive(Debug, Clone, Serialize)]
pub struct ReplayResponse {
    #[serde(flatten)]
    pub replay: Replay,
    /// Rendered trace, one line per recorded call
    pub trace: String,
}

impl From<Replay> for ReplayResponse {
    fn from(replay: Replay) -> Self {
        let trace = replay.to_string();
        Self { replay, trace }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
