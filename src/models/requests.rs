//! Request DTOs for the cache HTTP surface
//!
//! Defines the structure of incoming request bodies and query strings.

use serde::Deserialize;

use crate::cache::StoredValue;

/// Request body for the store operation (PUT /store)
///
/// The value is tagged so the server knows which encoding to apply:
/// `{"type": "int", "value": 42}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StoreRequest {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl StoreRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, max_value_size: usize) -> Option<String> {
        let size = match self {
            StoreRequest::Text(text) => text.len(),
            StoreRequest::Bytes(bytes) => bytes.len(),
            StoreRequest::Int(_) | StoreRequest::Float(_) => 0,
        };
        if size > max_value_size {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                max_value_size
            ));
        }
        if let StoreRequest::Float(x) = self {
            if !x.is_finite() {
                return Some("Float value must be finite".to_string());
            }
        }
        None
    }

    /// Converts the request into the value handed to the cache.
    pub fn into_value(self) -> StoredValue {
        match self {
            StoreRequest::Text(text) => StoredValue::Text(text),
            StoreRequest::Bytes(bytes) => StoredValue::Bytes(bytes),
            StoreRequest::Int(n) => StoredValue::Int(n),
            StoreRequest::Float(x) => StoredValue::Float(x),
        }
    }
}

/// Built-in decoder selected by `GET /get/:key?decode=...`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeAs {
    Int,
    Str,
    Float,
    Bytes,
}

/// Query string for the get operation (GET /get/:key)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    /// Decoder to apply; raw bytes are returned when absent
    #[serde(default)]
    pub decode: Option<DecodeAs>,
}
