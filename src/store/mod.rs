//! Backing Store Module
//!
//! The key-value/counter/list service the cache delegates all persistence to.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;

// == Key Value Store ==
/// Backing store consumed by the cache facade and its instrumentation.
///
/// Implementations share a single keyspace: a key holds either a byte value
/// (counters are byte values in decimal form) or a list of strings. Every
/// method is individually atomic; nothing is atomic across calls.
pub trait KeyValueStore: Send + Sync {
    /// Writes `value` under `key`, replacing whatever was there.
    fn set_value(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Reads the raw bytes under `key`, `None` if the key does not exist.
    fn get_value(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increments the counter under `name` and returns the new value.
    ///
    /// A missing counter starts from zero.
    fn increment(&self, name: &str) -> Result<i64>;

    /// Appends `item` to the end of the list under `list`, returning its new length.
    fn append_to_list(&self, list: &str, item: &str) -> Result<usize>;

    /// Reads the full list under `list`. A missing list reads as empty.
    fn read_list(&self, list: &str) -> Result<Vec<String>>;

    /// Removes every key in the store's namespace.
    fn clear_all(&self) -> Result<()>;
}
