//! Stored Value Module
//!
//! Tagged values accepted by the cache, their byte encoding, and the built-in decoders.

use serde::Serialize;

use crate::error::{CacheError, Result};

/// Width in bytes of the fixed-size numeric encodings.
const NUMERIC_WIDTH: usize = 8;

// == Stored Value ==
/// A value the cache can store.
///
/// The backing store only ever sees bytes; the tag survives a round trip only
/// if the reader applies the matching decoder.
///
/// Serializes untagged for call history: text as a JSON string, numbers as
/// JSON numbers, bytes as an array of numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredValue {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl StoredValue {
    // == Encode ==
    /// Encodes the value into the bytes written to the backing store.
    ///
    /// Integers and floats use 8-byte little-endian layouts.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Bytes(bytes) => bytes.clone(),
            StoredValue::Int(n) => n.to_le_bytes().to_vec(),
            StoredValue::Float(x) => x.to_le_bytes().to_vec(),
        }
    }

    /// Name of the variant's tag.
    pub fn kind(&self) -> &'static str {
        match self {
            StoredValue::Text(_) => "text",
            StoredValue::Bytes(_) => "bytes",
            StoredValue::Int(_) => "int",
            StoredValue::Float(_) => "float",
        }
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Int(value)
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

// == Decoders ==
fn fixed_width(raw: &[u8], what: &str) -> Result<[u8; NUMERIC_WIDTH]> {
    raw.try_into().map_err(|_| {
        CacheError::Decoding(format!(
            "{} requires exactly {} bytes, got {}",
            what,
            NUMERIC_WIDTH,
            raw.len()
        ))
    })
}

/// Decodes an 8-byte little-endian integer.
pub fn decode_int(raw: &[u8]) -> Result<i64> {
    fixed_width(raw, "integer").map(i64::from_le_bytes)
}

/// Decodes UTF-8 text.
pub fn decode_str(raw: &[u8]) -> Result<String> {
    String::from_utf8(raw.to_vec())
        .map_err(|e| CacheError::Decoding(format!("invalid UTF-8: {}", e)))
}

/// Decodes an 8-byte little-endian float.
pub fn decode_float(raw: &[u8]) -> Result<f64> {
    fixed_width(raw, "float").map(f64::from_le_bytes)
}

/// Returns the raw bytes unchanged.
pub fn decode_bytes(raw: &[u8]) -> Result<Vec<u8>> {
    Ok(raw.to_vec())
}
