//! In-Memory Store Module
//!
//! HashMap-backed keyspace following Redis string/list semantics.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

// == Slot ==
/// What a single key holds.
#[derive(Debug, Clone)]
enum Slot {
    Value(Vec<u8>),
    List(Vec<String>),
}

// == Memory Store ==
/// Thread-safe in-process backing store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Single keyspace shared by values, counters and lists
    slots: RwLock<HashMap<String, Slot>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of keys currently held.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    // == Is Empty ==
    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Slot>>> {
        self.slots
            .read()
            .map_err(|_| CacheError::StoreUnavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Slot>>> {
        self.slots
            .write()
            .map_err(|_| CacheError::StoreUnavailable("store lock poisoned".to_string()))
    }
}

fn wrong_type(key: &str, expected: &str) -> CacheError {
    CacheError::WrongType(format!("key '{}' does not hold a {}", key, expected))
}

impl KeyValueStore for MemoryStore {
    fn set_value(&self, key: &str, value: &[u8]) -> Result<()> {
        self.write()?.insert(key.to_string(), Slot::Value(value.to_vec()));
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.read()?.get(key) {
            Some(Slot::Value(bytes)) => Ok(Some(bytes.clone())),
            Some(Slot::List(_)) => Err(wrong_type(key, "value")),
            None => Ok(None),
        }
    }

    fn increment(&self, name: &str) -> Result<i64> {
        let mut slots = self.write()?;
        let current = match slots.get(name) {
            Some(Slot::Value(bytes)) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| wrong_type(name, "decimal counter"))?,
            Some(Slot::List(_)) => return Err(wrong_type(name, "decimal counter")),
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::WrongType(format!("counter '{}' would overflow", name)))?;
        slots.insert(name.to_string(), Slot::Value(next.to_string().into_bytes()));
        Ok(next)
    }

    fn append_to_list(&self, list: &str, item: &str) -> Result<usize> {
        let mut slots = self.write()?;
        let slot = slots
            .entry(list.to_string())
            .or_insert_with(|| Slot::List(Vec::new()));

        match slot {
            Slot::List(items) => {
                items.push(item.to_string());
                Ok(items.len())
            }
            Slot::Value(_) => Err(wrong_type(list, "list")),
        }
    }

    fn read_list(&self, list: &str) -> Result<Vec<String>> {
        match self.read()?.get(list) {
            Some(Slot::List(items)) => Ok(items.clone()),
            Some(Slot::Value(_)) => Err(wrong_type(list, "list")),
            None => Ok(Vec::new()),
        }
    }

    fn clear_all(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }
}
