//! Cache Key Module
//!
//! Random keys generated for every stored value.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Cache Key ==
/// A 128-bit random key in its hyphenated textual form.
///
/// Keys are unique within the process with overwhelming probability; no
/// collision check is made against keys already in the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Returns the textual form used as the store key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_keys_are_distinct() {
        let keys: HashSet<CacheKey> = (0..1000).map(|_| CacheKey::generate()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_textual_form() {
        let key = CacheKey::generate();

        assert_eq!(key.as_str().len(), 36);
        assert_eq!(key.to_string(), key.as_str());
        assert!(Uuid::parse_str(key.as_str()).is_ok());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let key = CacheKey::generate();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", key));
    }
}
