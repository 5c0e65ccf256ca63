//! Call Ledger - An instrumented key-value cache facade
//!
//! Stores values under generated keys in a pluggable backing store, counting
//! and recording every store call so its history can be replayed.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use cache::{Cache, CacheKey, Lookup, StoredValue};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{KeyValueStore, MemoryStore};
