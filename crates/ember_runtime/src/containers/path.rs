//! Dotted-path access through nested containers.
//!
//! A path is a string split on `.` or an already split array. Hash containers
//! look each component up as a key; arrays and programs read it as an index.

use smallvec::SmallVec;

use ember_core::{Kind, Value};

use crate::core::heap::Heap;
use crate::core::scratch::ScratchScope;
use crate::core::text::parse_int_prefix;

type PathParts = SmallVec<[String; 8]>;

impl Heap {
    fn path_parts(&self, path: Value) -> PathParts {
        if let Some(items) = self.items(path) {
            return items.iter().map(|p| self.to_text(*p)).collect();
        }
        let text = self.text_of(path);
        if text.is_empty() {
            return PathParts::new();
        }
        text.split('.').map(str::to_string).collect()
    }

    fn path_child(&self, container: Value, part: &str) -> Value {
        match self.kind(container) {
            Kind::Hash => self.hash_get_text(container, part),
            Kind::Array | Kind::Program => self.array_get(container, parse_int_prefix(part)),
            _ => Value::NULL,
        }
    }

    /// Whether `part` names a slot `container` can store into. Negative
    /// indexes must land inside the array.
    fn path_slot_exists(&self, container: Value, part: &str) -> bool {
        match self.kind(container) {
            Kind::Hash => true,
            Kind::Array | Kind::Program => {
                let index = parse_int_prefix(part);
                index >= 0 || index.unsigned_abs() <= self.size(container) as u64
            }
            _ => false,
        }
    }

    /// Value at `path` below `root`, or `Null` if any segment is missing or
    /// passes through a non-container. An empty path yields `root`.
    pub fn sget(&self, root: Value, path: Value) -> Value {
        let mut cur = root;
        for part in &self.path_parts(path) {
            if !self.kind(cur).is_multi() {
                return Value::NULL;
            }
            cur = self.path_child(cur, part);
        }
        cur
    }

    /// Store `value` at `path` below `root` and return the previous value.
    ///
    /// Missing intermediate segments are created as hashes. An intermediate
    /// that exists but is not a container, or an index before the start of
    /// an array, aborts the write with `Null` before anything is created.
    pub fn sset(&mut self, root: Value, path: Value, value: Value) -> Value {
        let parts = self.path_parts(path);
        let Some((last, walk)) = parts.split_last() else {
            return Value::NULL;
        };
        let mut scope = self.scratch();
        let mut cur = root;
        for part in walk {
            if !scope.path_slot_exists(cur, part) {
                return Value::NULL;
            }
            let mut next = scope.path_child(cur, part);
            match scope.kind(next) {
                Kind::Null => {
                    next = scope.hash();
                    put_child(&mut scope, cur, part, next);
                }
                kind if !kind.is_multi() => return Value::NULL,
                _ => {}
            }
            cur = next;
        }
        if !scope.path_slot_exists(cur, last) {
            return Value::NULL;
        }
        put_child(&mut scope, cur, last, value)
    }
}

fn put_child(scope: &mut ScratchScope<'_>, container: Value, part: &str, value: Value) -> Value {
    match scope.kind(container) {
        Kind::Hash => {
            let key = scope.scratch_string(part);
            scope.hash_set(container, key, value)
        }
        Kind::Array | Kind::Program => scope.array_set(container, value, parse_int_prefix(part)),
        _ => Value::NULL,
    }
}
