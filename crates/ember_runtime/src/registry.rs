//! Named native callables and their installation into a hash value.

use indexmap::IndexMap;

use ember_core::{Kind, Value};

use crate::core::cell::{Native, NativeFn, Payload};
use crate::core::heap::Heap;
use crate::natives;

pub struct NativeRegistry {
    entries: IndexMap<String, NativeFn>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register `fun` under `name`. A later registration replaces an earlier
    /// one but keeps its position.
    pub fn register(&mut self, name: &str, fun: NativeFn) {
        self.entries.insert(name.to_string(), fun);
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store every entry as an Exec value in the hash `target`, keyed by
    /// name. Returns how many entries were installed; nothing is installed
    /// when `target` is not a hash.
    pub fn install_into(self, heap: &mut Heap, target: Value) -> usize {
        if heap.kind(target) != Kind::Hash {
            return 0;
        }
        let mut scope = heap.scratch();
        let mut installed = 0;
        for (name, fun) in self.entries {
            let exec = scope.create(Payload::Exec(Native::Plain(fun)));
            let key = scope.scratch_string(&name);
            scope.hash_set(target, key, exec);
            installed += 1;
        }
        tracing::debug!(installed, "natives installed");
        installed
    }
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub trait NativeProvider {
    fn install(&self, registry: &mut NativeRegistry);
}

/// Container, text and collector natives.
pub struct CoreNatives;

impl NativeProvider for CoreNatives {
    fn install(&self, registry: &mut NativeRegistry) {
        registry.register("len", natives::native_len);
        registry.register("text", natives::native_text);
        registry.register("int", natives::native_int);
        // arrays
        registry.register("push", natives::native_push);
        registry.register("pop", natives::native_pop);
        registry.register("sort", natives::native_sort);
        registry.register("reverse", natives::native_reverse);
        // hashes
        registry.register("keys", natives::native_keys);
        registry.register("values", natives::native_values);
        registry.register("exists", natives::native_exists);
        registry.register("sget", natives::native_sget);
        registry.register("sset", natives::native_sset);
        // text
        registry.register("split", natives::native_split);
        registry.register("join", natives::native_join);
        registry.register("call", natives::native_call);
        registry.register("sweep", natives::native_sweep);
    }
}
