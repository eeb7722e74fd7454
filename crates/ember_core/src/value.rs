//! Runtime value handle and kind tags.

use crate::gc::{ObjectId, ScratchId};
use ahash::RandomState;
use hashbrown::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Payload kind of a value cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Null,
    Str,
    Int,
    Real,
    Array,
    Hash,
    Exec,
    File,
    Program,
}

impl Kind {
    /// Array, Hash and Program cells own a sequence of child references.
    #[inline]
    pub fn is_multi(self) -> bool {
        matches!(self, Kind::Array | Kind::Hash | Kind::Program)
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Real)
    }

    #[inline]
    pub fn is_executable(self) -> bool {
        matches!(self, Kind::Exec | Kind::Program)
    }

    pub fn type_name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Str => "string",
            Kind::Int => "int",
            Kind::Real => "real",
            Kind::Array => "array",
            Kind::Hash => "hash",
            Kind::Exec => "exec",
            Kind::File => "file",
            Kind::Program => "program",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Handle to a value.
///
/// `Null` is the absent value every lookup returns on a miss. `Cell` points at a
/// long-lived cell tracked by the collector; `Scratch` points at a non-owned
/// cell that only lives as long as the scratch scope that created it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Value {
    #[default]
    Null,
    Cell(ObjectId),
    Scratch(ScratchId),
}

impl Value {
    pub const NULL: Value = Value::Null;

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline(always)]
    pub fn is_scratch(&self) -> bool {
        matches!(self, Value::Scratch(_))
    }

    #[inline(always)]
    pub fn is_cell(&self) -> bool {
        matches!(self, Value::Cell(_))
    }

    #[inline]
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            Value::Cell(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Cell(id)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Cell(id) => write!(f, "Cell({}v{})", id.index, id.generation),
            Value::Scratch(id) => write!(f, "Scratch({}s{})", id.index, id.serial),
        }
    }
}

pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;
pub type FastHashSet<K> = HashSet<K, RandomState>;

/// Fixed-seed hasher: bucket placement must not change between runs.
pub fn fast_hasher() -> RandomState {
    RandomState::with_seeds(0, 0, 0, 0)
}

pub fn fast_map_new<K: Eq + Hash, V>() -> FastHashMap<K, V> {
    HashMap::with_hasher(fast_hasher())
}

pub fn fast_set_new<K: Eq + Hash>() -> FastHashSet<K> {
    HashSet::with_hasher(fast_hasher())
}
