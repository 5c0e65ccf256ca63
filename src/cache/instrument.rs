//! Instrumentation Module
//!
//! Wrappers that count calls to a named operation and record its argument and
//! result history in the backing store.
//!
//! Wrappers compose by nesting. The cache uses `CountCalls<CallHistory<Op>>`:
//! the counter is bumped before history is written, so a counted call may
//! lack its history entries if a later step fails.

use std::marker::PhantomData;

use serde::Serialize;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

/// Suffix of the list holding serialized argument tuples.
pub const INPUTS_SUFFIX: &str = ":inputs";
/// Suffix of the list holding serialized results.
pub const OUTPUTS_SUFFIX: &str = ":outputs";

// == History Keys ==
/// Key of the inputs history list for `name`.
pub fn inputs_key(name: &str) -> String {
    format!("{}{}", name, INPUTS_SUFFIX)
}

/// Key of the outputs history list for `name`.
pub fn outputs_key(name: &str) -> String {
    format!("{}{}", name, OUTPUTS_SUFFIX)
}

// == Call Count ==
/// Reads the call counter for `name`, zero if the operation was never called.
pub fn read_call_count(store: &dyn KeyValueStore, name: &str) -> Result<i64> {
    match store.get_value(name)? {
        Some(raw) => std::str::from_utf8(&raw)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                CacheError::WrongType(format!("key '{}' does not hold a decimal counter", name))
            }),
        None => Ok(0),
    }
}

// == Operation ==
/// A named operation executed against a backing store.
///
/// `Args` is the positional argument tuple, excluding the store itself.
pub trait Operation {
    type Args;
    type Output;

    /// Qualified name, used as the counter key and history list prefix.
    fn name(&self) -> &str;

    fn call(&self, store: &dyn KeyValueStore, args: Self::Args) -> Result<Self::Output>;
}

// == Fn Operation ==
/// An operation built from a name and a closure.
pub struct FnOperation<F, A, O> {
    name: String,
    f: F,
    _signature: PhantomData<fn(A) -> O>,
}

/// Wraps a closure as a named operation.
pub fn operation<F, A, O>(name: impl Into<String>, f: F) -> FnOperation<F, A, O>
where
    F: Fn(&dyn KeyValueStore, A) -> Result<O>,
{
    FnOperation {
        name: name.into(),
        f,
        _signature: PhantomData,
    }
}

impl<F, A, O> Operation for FnOperation<F, A, O>
where
    F: Fn(&dyn KeyValueStore, A) -> Result<O>,
{
    type Args = A;
    type Output = O;

    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, store: &dyn KeyValueStore, args: A) -> Result<O> {
        (self.f)(store, args)
    }
}

// == Count Calls ==
/// Increments the operation's counter once per call, before running it.
#[derive(Debug, Clone)]
pub struct CountCalls<Op> {
    name: String,
    inner: Op,
}

impl<Op: Operation> CountCalls<Op> {
    pub fn new(inner: Op) -> Self {
        Self {
            name: inner.name().to_string(),
            inner,
        }
    }

    /// Returns the wrapped operation.
    pub fn inner(&self) -> &Op {
        &self.inner
    }
}

impl<Op: Operation> Operation for CountCalls<Op> {
    type Args = Op::Args;
    type Output = Op::Output;

    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, store: &dyn KeyValueStore, args: Op::Args) -> Result<Op::Output> {
        let calls = store.increment(&self.name)?;
        debug!(operation = %self.name, calls, "Counted call");
        self.inner.call(store, args)
    }
}

// == Call History ==
/// Appends the serialized arguments before the call and the serialized
/// result after it.
///
/// The two appends are independent; a failure or a concurrent call between
/// them leaves the inputs and outputs lists out of step.
#[derive(Debug, Clone)]
pub struct CallHistory<Op> {
    name: String,
    inputs: String,
    outputs: String,
    inner: Op,
}

impl<Op: Operation> CallHistory<Op> {
    pub fn new(inner: Op) -> Self {
        let name = inner.name().to_string();
        Self {
            inputs: inputs_key(&name),
            outputs: outputs_key(&name),
            name,
            inner,
        }
    }

    /// Returns the wrapped operation.
    pub fn inner(&self) -> &Op {
        &self.inner
    }
}

impl<Op> Operation for CallHistory<Op>
where
    Op: Operation,
    Op::Args: Serialize,
    Op::Output: Serialize,
{
    type Args = Op::Args;
    type Output = Op::Output;

    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, store: &dyn KeyValueStore, args: Op::Args) -> Result<Op::Output> {
        let rendered_args = serde_json::to_string(&args)?;
        store.append_to_list(&self.inputs, &rendered_args)?;

        let output = self.inner.call(store, args)?;

        let rendered_output = serde_json::to_string(&output)?;
        let recorded = store.append_to_list(&self.outputs, &rendered_output)?;
        debug!(operation = %self.name, recorded, "Recorded call history");

        Ok(output)
    }
}

// == Instrumented ==
/// Counting outside, history inside.
pub type Instrumented<Op> = CountCalls<CallHistory<Op>>;

/// Wraps `op` with both history recording and call counting.
pub fn instrument<Op>(op: Op) -> Instrumented<Op>
where
    Op: Operation,
    Op::Args: Serialize,
    Op::Output: Serialize,
{
    CountCalls::new(CallHistory::new(op))
}
