//! Cache Facade Module
//!
//! Stores values under generated keys through an instrumented operation and
//! reads them back, optionally decoding.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::instrument::{instrument, read_call_count, Instrumented, Operation};
use crate::cache::replay::{history, replay, History, Replay};
use crate::cache::value::{decode_int, decode_str};
use crate::cache::{CacheKey, Lookup, StoredValue};
use crate::error::Result;
use crate::store::KeyValueStore;

/// Qualified name of the instrumented store operation.
pub const STORE_OPERATION: &str = "Cache.store";

// == Store Value ==
/// Raw store operation: writes one value under a fresh key.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreValue;

impl Operation for StoreValue {
    type Args = (StoredValue,);
    type Output = CacheKey;

    fn name(&self) -> &str {
        STORE_OPERATION
    }

    fn call(&self, store: &dyn KeyValueStore, (value,): (StoredValue,)) -> Result<CacheKey> {
        let key = CacheKey::generate();
        store.set_value(key.as_str(), &value.encode())?;
        Ok(key)
    }
}

// == Cache ==
/// Facade over a backing store handle.
///
/// `store` is counted and history-recorded; reads are not instrumented.
pub struct Cache<S: KeyValueStore> {
    /// Backing store handle
    store: Arc<S>,
    /// Instrumented store operation
    store_op: Instrumented<StoreValue>,
}

impl<S: KeyValueStore> Cache<S> {
    // == Constructor ==
    /// Creates a cache over `store`, wiping everything the store holds.
    ///
    /// Every construction resets keys, counters and history, including those
    /// written through other `Cache` instances sharing the store.
    pub fn new(store: Arc<S>) -> Result<Self> {
        store.clear_all()?;
        info!("Backing store cleared for new cache");

        Ok(Self {
            store,
            store_op: instrument(StoreValue),
        })
    }

    // == Store ==
    /// Stores `value` under a freshly generated key and returns the key.
    pub fn store(&self, value: impl Into<StoredValue>) -> Result<CacheKey> {
        let value = value.into();
        let kind = value.kind();
        let key = self.store_op.call(&*self.store, (value,))?;
        debug!(key = %key, kind, "Stored value");
        Ok(key)
    }

    // == Get ==
    /// Reads the raw bytes under `key`.
    pub fn get(&self, key: impl AsRef<str>) -> Result<Lookup<Vec<u8>>> {
        Ok(self.store.get_value(key.as_ref())?.into())
    }

    // == Get With Decoder ==
    /// Reads the bytes under `key` and decodes them.
    ///
    /// The decoder only runs when the key exists.
    pub fn get_with<T, F>(&self, key: impl AsRef<str>, decoder: F) -> Result<Lookup<T>>
    where
        F: FnOnce(&[u8]) -> Result<T>,
    {
        match self.get(key)? {
            Lookup::Found(raw) => decoder(&raw).map(Lookup::Found),
            Lookup::NotFound => Ok(Lookup::NotFound),
        }
    }

    /// Reads an integer stored as `StoredValue::Int`.
    pub fn get_int(&self, key: impl AsRef<str>) -> Result<Lookup<i64>> {
        self.get_with(key, decode_int)
    }

    /// Reads text stored as `StoredValue::Text`.
    pub fn get_str(&self, key: impl AsRef<str>) -> Result<Lookup<String>> {
        self.get_with(key, decode_str)
    }

    // == Diagnostics ==
    /// Returns how many times the operation `name` was called.
    pub fn call_count(&self, name: &str) -> Result<i64> {
        read_call_count(&*self.store, name)
    }

    /// Returns the raw inputs and outputs history lists of the operation `name`.
    pub fn history(&self, name: &str) -> Result<History> {
        history(&*self.store, name)
    }

    /// Replays the recorded history of the operation `name`.
    pub fn replay(&self, name: &str) -> Result<Replay> {
        replay(&*self.store, name)
    }
}
