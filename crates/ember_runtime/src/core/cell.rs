//! Value cells and their payloads.

use std::cell::Cell;
use std::fmt;

use ember_core::{Kind, Value};

use crate::errors::RuntimeError;
use crate::core::heap::Heap;

/// Plain native callable: `(arguments) -> result`.
pub type NativeFn = fn(&mut Heap, &[Value]) -> Result<Value, RuntimeError>;

/// Closure-shaped native callable: `(auxiliary data, arguments) -> result`.
pub type ClosureFn = fn(&mut Heap, Value, &[Value]) -> Result<Value, RuntimeError>;

#[derive(Clone, Copy)]
pub enum Native {
    Plain(NativeFn),
    Closure(ClosureFn),
}

impl fmt::Debug for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Native::Plain(_) => write!(f, "Native::Plain"),
            Native::Closure(_) => write!(f, "Native::Closure"),
        }
    }
}

/// Opaque OS file handle; reading and writing live outside the engine.
#[derive(Debug)]
pub struct FileHandle {
    pub path: String,
    pub file: Option<std::fs::File>,
}

/// Bucket table backing a Hash cell.
///
/// `buckets` is empty until the first insertion, then holds exactly the
/// configured bucket count. Each slot is `Null` or an Array of alternating
/// key/value references sorted by key text.
#[derive(Debug, Clone, Default)]
pub struct HashTable {
    pub(crate) buckets: Vec<Value>,
    pub(crate) pairs: usize,
}

impl HashTable {
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn pairs(&self) -> usize {
        self.pairs
    }
}

#[derive(Debug)]
pub enum Payload {
    Null,
    Str(Box<str>),
    Int(i64),
    Real(f64),
    Array(Vec<Value>),
    Hash(HashTable),
    Exec(Native),
    File(FileHandle),
    Program(Vec<Value>),
}

impl Payload {
    pub fn kind(&self) -> Kind {
        match self {
            Payload::Null => Kind::Null,
            Payload::Str(_) => Kind::Str,
            Payload::Int(_) => Kind::Int,
            Payload::Real(_) => Kind::Real,
            Payload::Array(_) => Kind::Array,
            Payload::Hash(_) => Kind::Hash,
            Payload::Exec(_) => Kind::Exec,
            Payload::File(_) => Kind::File,
            Payload::Program(_) => Kind::Program,
        }
    }

    /// References owned by this payload. Empty for scalars.
    pub fn children(&self) -> &[Value] {
        match self {
            Payload::Array(items) | Payload::Program(items) => items,
            Payload::Hash(table) => &table.buckets,
            _ => &[],
        }
    }
}

/// The reference-counted unit of data.
pub struct ValueCell {
    pub(crate) refs: u32,
    pub(crate) payload: Payload,
    pub(crate) cached_int: Cell<Option<i64>>,
    pub(crate) cached_real: Cell<Option<f64>>,
}

impl ValueCell {
    pub fn new(payload: Payload) -> Self {
        Self {
            refs: 0,
            payload,
            cached_int: Cell::new(None),
            cached_real: Cell::new(None),
        }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    #[inline]
    pub fn refs(&self) -> u32 {
        self.refs
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

impl fmt::Debug for ValueCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCell")
            .field("refs", &self.refs)
            .field("payload", &self.payload)
            .finish()
    }
}
