//! Core value-management infrastructure.
//!
//! This module contains the fundamental pieces of the engine:
//! - `ValueCell` / `Payload` - The reference-counted tagged unit of data
//! - `Heap` - Allocation, retain/release and the collector's ring
//! - `gc` - Deferred, batched sweeping
//! - `ScratchScope` - Scope-bound pool for non-owned values
//! - `text` - String representation and numeric coercion

pub mod cell;
pub mod gc;
pub mod heap;
pub mod scratch;
pub mod text;

pub use cell::{ClosureFn, FileHandle, HashTable, Native, NativeFn, Payload, ValueCell};
pub use gc::{SweepBudget, SweepStats};
pub use heap::{Heap, Root};
pub use scratch::ScratchScope;
