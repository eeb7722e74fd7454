//! Container operations layered on value cells.
//!
//! - `array` - Resizable sequence primitives every other container builds on
//! - `compare` / `sort` - Universal ordering, seeking and record sorting
//! - `hash` - Fixed-bucket associative table on top of arrays
//! - `path` - Dotted-path navigation through nested containers

pub mod array;
pub mod compare;
pub mod hash;
pub mod path;
pub(crate) mod sort;

pub use hash::{HashCursor, HashIter};
