//! Dynamic array primitives.
//!
//! Every operation accepts any Array or Program value and treats other kinds
//! as a miss: reads return `Null`, writes do nothing.

use smallvec::SmallVec;

use ember_core::Value;

use crate::core::cell::Payload;
use crate::core::heap::{Heap, pad_items};
use crate::errors::RuntimeError;

use super::sort::merge_sort_by;

/// Map a possibly negative offset onto `0..`; `None` if it lands before 0.
#[inline]
fn resolve(len: usize, offset: i64) -> Option<usize> {
    if offset < 0 {
        let back = offset.unsigned_abs();
        (back <= len as u64).then(|| len - back as usize)
    } else {
        Some(offset as usize)
    }
}

impl Heap {
    pub fn items(&self, a: Value) -> Option<&[Value]> {
        match self.cell(a).map(|c| &c.payload) {
            Some(Payload::Array(items)) | Some(Payload::Program(items)) => Some(items),
            _ => None,
        }
    }

    pub(crate) fn items_mut(&mut self, a: Value) -> Option<&mut Vec<Value>> {
        match self.cell_mut(a).map(|c| &mut c.payload) {
            Some(Payload::Array(items)) | Some(Payload::Program(items)) => Some(items),
            _ => None,
        }
    }

    /// Open `n` null slots at `offset`, shifting later elements up.
    /// An offset past the end pads with nulls first.
    pub fn array_expand(&mut self, a: Value, offset: i64, n: usize) -> bool {
        let Some(items) = self.items_mut(a) else {
            return false;
        };
        let Some(at) = resolve(items.len(), offset) else {
            return false;
        };
        pad_items(items, at);
        let len = items.len();
        pad_items(items, len.saturating_add(n));
        items[at..].rotate_right(n);
        true
    }

    /// Release `[offset, offset + n)` (clamped) and close the gap.
    /// Returns how many slots were removed.
    pub fn array_collapse(&mut self, a: Value, offset: i64, n: usize) -> usize {
        let Some(items) = self.items_mut(a) else {
            return 0;
        };
        let len = items.len();
        let Some(at) = resolve(len, offset).filter(|&at| at < len) else {
            return 0;
        };
        let end = at.saturating_add(n).min(len);
        let removed: SmallVec<[Value; 8]> = items.drain(at..end).collect();
        if items.capacity() > 2 * items.len() + 8 {
            items.shrink_to(items.len() + 8);
        }
        for v in &removed {
            self.release(*v);
        }
        removed.len()
    }

    /// Element at `offset`; negative offsets count from the end.
    pub fn array_get(&self, a: Value, offset: i64) -> Value {
        let Some(items) = self.items(a) else {
            return Value::NULL;
        };
        resolve(items.len(), offset)
            .and_then(|at| items.get(at).copied())
            .unwrap_or(Value::NULL)
    }

    /// Store `element` at `offset`, growing the array when needed.
    ///
    /// Scratch elements are cloned into owned values first. The new occupant
    /// is retained and the previous one released and returned.
    pub fn array_set(&mut self, a: Value, element: Value, offset: i64) -> Value {
        let Some(len) = self.items(a).map(<[Value]>::len) else {
            return Value::NULL;
        };
        let Some(at) = resolve(len, offset) else {
            return Value::NULL;
        };
        let element = self.own(element);
        let Some(items) = self.items_mut(a) else {
            return Value::NULL;
        };
        pad_items(items, at.saturating_add(1));
        let prev = std::mem::replace(&mut items[at], element);
        self.retain(element);
        self.release(prev);
        prev
    }

    /// Insert `element` before `offset`. Returns the stored (owned) value.
    pub fn array_insert(&mut self, a: Value, element: Value, offset: i64) -> Value {
        let Some(len) = self.items(a).map(<[Value]>::len) else {
            return Value::NULL;
        };
        let Some(at) = resolve(len, offset) else {
            return Value::NULL;
        };
        let element = self.own(element);
        self.array_expand(a, at as i64, 1);
        self.array_set(a, element, at as i64);
        element
    }

    /// Remove and return the element at `offset`.
    ///
    /// The removed value has already been released; retain it to keep it
    /// past the next sweep.
    pub fn array_delete(&mut self, a: Value, offset: i64) -> Value {
        let Some(len) = self.items(a).map(<[Value]>::len) else {
            return Value::NULL;
        };
        let Some(at) = resolve(len, offset).filter(|&at| at < len) else {
            return Value::NULL;
        };
        let removed = self.array_get(a, at as i64);
        self.array_collapse(a, at as i64, 1);
        removed
    }

    pub fn array_push(&mut self, a: Value, element: Value) -> Value {
        let len = self.size(a);
        self.array_insert(a, element, len as i64)
    }

    pub fn array_pop(&mut self, a: Value) -> Value {
        self.array_delete(a, -1)
    }

    /// Bounded FIFO push.
    ///
    /// Evicts from the front until there is room for `element`, returning the
    /// first evicted value. `max_size == 0` is rejected without mutation.
    pub fn array_queue(&mut self, a: Value, element: Value, max_size: usize) -> Value {
        if max_size == 0 || self.items(a).is_none() {
            return Value::NULL;
        }
        let mut evicted = Value::NULL;
        while self.size(a) >= max_size {
            let v = self.array_delete(a, 0);
            if evicted.is_null() {
                evicted = v;
            }
        }
        self.array_push(a, element);
        evicted
    }

    /// Sort `step`-sized records by their first element.
    ///
    /// Without a comparator the universal `compare` order is used. A
    /// comparator is executed with the two leading elements and the sign of
    /// its integer result orders them. Trailing elements that do not fill a
    /// record stay at the end.
    pub fn array_sort(
        &mut self,
        a: Value,
        step: usize,
        comparator: Option<Value>,
    ) -> Result<(), RuntimeError> {
        let step = step.max(1);
        let Some(items) = self.items_mut(a).map(std::mem::take) else {
            return Ok(());
        };
        let records = items.len() / step;
        let mut order: Vec<usize> = (0..records).collect();

        let sorted = match comparator.filter(|c| self.is_executable(*c)) {
            Some(f) => merge_sort_by(&mut order, |x, y| {
                let r = self.exec(f, &[items[x * step], items[y * step]])?;
                Ok::<_, RuntimeError>(self.as_int(r).cmp(&0))
            }),
            None => merge_sort_by(&mut order, |x, y| {
                Ok::<_, RuntimeError>(self.compare(items[x * step], items[y * step]))
            }),
        };

        let out = if sorted.is_ok() {
            let mut out = Vec::with_capacity(items.len());
            for r in order {
                out.extend_from_slice(&items[r * step..(r + 1) * step]);
            }
            out.extend_from_slice(&items[records * step..]);
            out
        } else {
            items
        };
        // A comparator may have stored into the array while it was detached.
        if let Some(slot) = self.items_mut(a) {
            let stray = std::mem::replace(slot, out);
            for v in stray {
                self.release(v);
            }
        }
        sorted
    }

    /// Replace `delete` elements at `offset` with `insert`.
    /// Returns a new array holding the removed elements.
    pub fn array_splice(&mut self, a: Value, offset: i64, delete: usize, insert: &[Value]) -> Value {
        let Some(len) = self.items(a).map(<[Value]>::len) else {
            return Value::NULL;
        };
        let Some(at) = resolve(len, offset) else {
            return Value::NULL;
        };
        let removed = self.array_slice(a, at as i64, delete);
        self.array_collapse(a, at as i64, delete);
        self.array_expand(a, at as i64, insert.len());
        for (i, v) in insert.iter().enumerate() {
            self.array_set(a, *v, (at + i) as i64);
        }
        removed
    }

    /// New array with up to `len` elements starting at `offset`.
    pub fn array_slice(&mut self, a: Value, offset: i64, len: usize) -> Value {
        let range: SmallVec<[Value; 16]> = match self.items(a) {
            Some(items) => match resolve(items.len(), offset) {
                Some(at) if at < items.len() => {
                    let end = at.saturating_add(len).min(items.len());
                    items[at..end].iter().copied().collect()
                }
                _ => SmallVec::new(),
            },
            None => return Value::NULL,
        };
        self.array_from(&range)
    }

    pub fn array_reverse(&mut self, a: Value) -> bool {
        match self.items_mut(a) {
            Some(items) => {
                items.reverse();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::resolve;

    #[test]
    fn negative_offsets_count_from_the_end() {
        assert_eq!(resolve(5, -1), Some(4));
        assert_eq!(resolve(5, -5), Some(0));
        assert_eq!(resolve(5, -6), None);
        assert_eq!(resolve(5, 7), Some(7));
        assert_eq!(resolve(0, i64::MIN), None);
    }
}
