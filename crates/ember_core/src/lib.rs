//! Core types for the Ember value runtime.
//!
//! This crate contains the handle types that are independent of the engine:
//! - `Value` - Copy handle to a value cell (or the absent value)
//! - `ObjectId` / `ScratchId` - Generational handles into the heap slab and scratch pool
//! - `Kind` - The closed set of payload kinds
//! - Number formatting and the deterministic hasher shared by the runtime

pub mod format;
pub mod gc;
pub mod value;

pub use format::{f64_to_string, i64_to_string, push_f64, push_i64};
pub use gc::{ObjectId, ScratchId};
pub use value::{FastHashMap, FastHashSet, Kind, Value, fast_hasher, fast_map_new, fast_set_new};
