//! Ember value runtime.
//!
//! Reference-counted tagged values, a deferred batched collector, dynamic
//! arrays, bucket hash tables, dotted-path access and native dispatch.

#![allow(clippy::new_without_default)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_hash_one)]
#![allow(clippy::unnecessary_cast)]

pub mod config;
pub mod containers;
pub mod core;
pub mod errors;
mod exec;
mod natives;
pub mod registry;

pub use config::HeapConfig;
pub use containers::{HashCursor, HashIter};
pub use crate::core::{
    ClosureFn, FileHandle, HashTable, Heap, Native, NativeFn, Payload, Root, ScratchScope,
    SweepBudget, SweepStats, ValueCell,
};
pub use ember_core::{Kind, ObjectId, ScratchId, Value};
pub use errors::RuntimeError;
pub use registry::{CoreNatives, NativeProvider, NativeRegistry};
