//! Cache Module
//!
//! Instrumented key-value cache facade over a pluggable backing store.

mod facade;
mod key;
mod lookup;
mod replay;
mod value;

pub mod instrument;


// Re-export public types
pub use facade::{Cache, StoreValue, STORE_OPERATION};
pub use instrument::{instrument, CallHistory, CountCalls, Instrumented, Operation};
pub use key::CacheKey;
pub use lookup::Lookup;
pub use replay::{history, replay, CallRecord, History, Replay};
pub use value::{decode_bytes, decode_float, decode_int, decode_str, StoredValue};
