//! Bucket hash table built on arrays.
//!
//! A Hash cell holds a fixed number of buckets once the first pair is stored.
//! Each bucket is an Array of alternating key/value references kept sorted by
//! key text, so lookups hash the key's string representation to a bucket and
//! binary-search inside it. Tables never rehash: past the bucket count,
//! buckets simply grow longer.

use std::hash::BuildHasher;

use ember_core::{Value, fast_hasher};

use crate::core::cell::{HashTable, Payload};
use crate::core::heap::Heap;

use super::sort::seek_sorted;

/// Resumable position of a hash walk: bucket index and pair within it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashCursor {
    bucket: usize,
    pair: usize,
}

impl HashCursor {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct HashIter<'h> {
    heap: &'h Heap,
    table: Value,
    cursor: HashCursor,
}

impl Iterator for HashIter<'_> {
    type Item = (Value, Value);

    fn next(&mut self) -> Option<(Value, Value)> {
        self.heap.hash_next(self.table, &mut self.cursor)
    }
}

#[inline]
fn slot_for(text: &str, buckets: usize) -> usize {
    (fast_hasher().hash_one(text) % buckets as u64) as usize
}

impl Heap {
    pub(crate) fn table(&self, h: Value) -> Option<&HashTable> {
        match self.cell(h).map(|c| &c.payload) {
            Some(Payload::Hash(table)) => Some(table),
            _ => None,
        }
    }

    fn table_mut(&mut self, h: Value) -> Option<&mut HashTable> {
        match self.cell_mut(h).map(|c| &mut c.payload) {
            Some(Payload::Hash(table)) => Some(table),
            _ => None,
        }
    }

    /// Bucket `key` falls into, or `None` before the first insertion.
    pub fn bucket_index(&self, h: Value, key: Value) -> Option<usize> {
        let table = self.table(h)?;
        if table.buckets.is_empty() {
            return None;
        }
        Some(slot_for(&self.text_of(key), table.buckets.len()))
    }

    fn seek_key(&self, bucket: &[Value], text: &str) -> Result<usize, usize> {
        seek_sorted(bucket, 2, |k| self.text_of(k).as_ref().cmp(text))
    }

    /// Bucket array and pair offset holding `text`, if present.
    fn locate(&self, h: Value, text: &str) -> Option<(Value, usize)> {
        let table = self.table(h)?;
        if table.buckets.is_empty() {
            return None;
        }
        let bucket = table.buckets[slot_for(text, table.buckets.len())];
        let items = self.items(bucket)?;
        self.seek_key(items, text).ok().map(|at| (bucket, at))
    }

    pub fn hash_get(&self, h: Value, key: Value) -> Value {
        self.hash_get_text(h, &self.text_of(key))
    }

    pub(crate) fn hash_get_text(&self, h: Value, text: &str) -> Value {
        match self.locate(h, text) {
            Some((bucket, at)) => self.array_get(bucket, at as i64 + 1),
            None => Value::NULL,
        }
    }

    /// Store `value` under `key` and return the previous value.
    ///
    /// The first insertion allocates the configured bucket count. A new key
    /// opens two slots at its sorted position in the bucket.
    pub fn hash_set(&mut self, h: Value, key: Value, value: Value) -> Value {
        let text = self.text_of(key).into_owned();
        let buckets = self.config.hash_buckets.max(1);
        let Some(table) = self.table_mut(h) else {
            return Value::NULL;
        };
        if table.buckets.is_empty() {
            table.buckets = vec![Value::NULL; buckets];
            tracing::trace!(buckets, "hash table allocated");
        }
        let slot = slot_for(&text, table.buckets.len());
        let mut bucket = table.buckets[slot];

        if self.items(bucket).is_none() {
            bucket = self.array(2);
            self.retain(bucket);
            if let Some(table) = self.table_mut(h) {
                table.buckets[slot] = bucket;
            }
        }

        let found = match self.items(bucket) {
            Some(items) => self.seek_key(items, &text),
            None => return Value::NULL,
        };
        match found {
            Ok(at) => self.array_set(bucket, value, at as i64 + 1),
            Err(at) => {
                self.array_expand(bucket, at as i64, 2);
                self.array_set(bucket, key, at as i64);
                if let Some(table) = self.table_mut(h) {
                    table.pairs += 1;
                }
                self.array_set(bucket, value, at as i64 + 1)
            }
        }
    }

    /// Remove `key`; returns the removed value (already released).
    pub fn hash_delete(&mut self, h: Value, key: Value) -> Value {
        let text = self.text_of(key).into_owned();
        let Some((bucket, at)) = self.locate(h, &text) else {
            return Value::NULL;
        };
        self.array_set(bucket, Value::NULL, at as i64);
        let removed = self.array_set(bucket, Value::NULL, at as i64 + 1);
        self.array_collapse(bucket, at as i64, 2);
        if let Some(table) = self.table_mut(h) {
            table.pairs -= 1;
        }
        removed
    }

    pub fn hash_exists(&self, h: Value, key: Value) -> bool {
        self.locate(h, &self.text_of(key)).is_some()
    }

    pub fn hash_len(&self, h: Value) -> usize {
        self.table(h).map_or(0, HashTable::pairs)
    }

    /// New array of every key, in bucket order then storage order.
    pub fn hash_keys(&mut self, h: Value) -> Value {
        let keys: Vec<Value> = self.hash_iter(h).map(|(k, _)| k).collect();
        self.array_from(&keys)
    }

    /// New array of every value, in the same order as `hash_keys`.
    pub fn hash_values(&mut self, h: Value) -> Value {
        let values: Vec<Value> = self.hash_iter(h).map(|(_, v)| v).collect();
        self.array_from(&values)
    }

    /// Next `(key, value)` pair after `cursor`, advancing it.
    pub fn hash_next(&self, h: Value, cursor: &mut HashCursor) -> Option<(Value, Value)> {
        let table = self.table(h)?;
        while cursor.bucket < table.buckets.len() {
            if let Some(items) = self.items(table.buckets[cursor.bucket]) {
                let at = cursor.pair * 2;
                if at + 1 < items.len() {
                    cursor.pair += 1;
                    return Some((items[at], items[at + 1]));
                }
            }
            cursor.bucket += 1;
            cursor.pair = 0;
        }
        None
    }

    pub fn hash_iter(&self, h: Value) -> HashIter<'_> {
        HashIter {
            heap: self,
            table: h,
            cursor: HashCursor::new(),
        }
    }
}
