//! Replay Module
//!
//! Reconstructs an operation's recorded call history as a readable trace.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::cache::instrument::{inputs_key, outputs_key, read_call_count};
use crate::error::Result;
use crate::store::KeyValueStore;

// == Call Record ==
/// One recorded call: serialized argument tuple and serialized result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub inputs: String,
    pub output: String,
}

// == History ==
/// Raw history lists of one operation, in call order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    /// Serialized argument tuples
    pub inputs: Vec<String>,
    /// Serialized results
    pub outputs: Vec<String>,
}

/// Reads the inputs and outputs lists of `name` without pairing them.
pub fn history(store: &dyn KeyValueStore, name: &str) -> Result<History> {
    Ok(History {
        inputs: store.read_list(&inputs_key(name))?,
        outputs: store.read_list(&outputs_key(name))?,
    })
}

// == Replay ==
/// Recorded history of a single operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replay {
    /// Qualified operation name
    pub name: String,
    /// Value of the operation's call counter
    pub calls: i64,
    /// Inputs and outputs paired by position
    pub records: Vec<CallRecord>,
}

/// Reads the history of `name` and pairs inputs with outputs by position.
///
/// Pairing stops at the shorter list. Read-only.
pub fn replay(store: &dyn KeyValueStore, name: &str) -> Result<Replay> {
    let calls = read_call_count(store, name)?;
    let History { inputs, outputs } = history(store, name)?;

    if inputs.len() != outputs.len() {
        debug!(
            operation = name,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "History lists differ in length, truncating replay"
        );
    }

    let records = inputs
        .into_iter()
        .zip(outputs)
        .map(|(inputs, output)| CallRecord { inputs, output })
        .collect();

    Ok(Replay {
        name: name.to_string(),
        calls,
        records,
    })
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.name, self.calls)?;
        for record in &self.records {
            write!(f, "\n{}(*{}) -> {}", self.name, record.inputs, record.output)?;
        }
        Ok(())
    }
}
