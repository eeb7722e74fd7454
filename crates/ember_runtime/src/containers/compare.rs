//! Universal value ordering.

use std::cmp::Ordering;

use ember_core::{Kind, Value};

use crate::core::heap::Heap;

/// Container comparison deeper than this falls back to identity.
const MAX_COMPARE_DEPTH: usize = 64;

impl Heap {
    /// Order two values.
    ///
    /// Null sorts lowest, numbers compare numerically, strings byte-wise,
    /// same-kind containers by size then element by element. Executables and
    /// files order by identity; everything else by string representation.
    pub fn compare(&self, a: Value, b: Value) -> Ordering {
        self.compare_at(a, b, 0)
    }

    fn compare_at(&self, a: Value, b: Value, depth: usize) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let (ka, kb) = (self.kind(a), self.kind(b));
        match (ka, kb) {
            (Kind::Null, Kind::Null) => Ordering::Equal,
            (Kind::Null, _) => Ordering::Less,
            (_, Kind::Null) => Ordering::Greater,
            (Kind::Str, Kind::Str) => self.as_str(a).cmp(&self.as_str(b)),
            (Kind::Int, Kind::Int) => self.as_int(a).cmp(&self.as_int(b)),
            (x, y) if x.is_numeric() && y.is_numeric() => self
                .as_real(a)
                .partial_cmp(&self.as_real(b))
                .unwrap_or(Ordering::Equal),
            (x, y) if x == y && x.is_multi() => {
                if depth >= MAX_COMPARE_DEPTH {
                    return identity(a).cmp(&identity(b));
                }
                self.size(a)
                    .cmp(&self.size(b))
                    .then_with(|| self.compare_children(a, b, depth))
            }
            (Kind::Exec, Kind::Exec) | (Kind::File, Kind::File) => identity(a).cmp(&identity(b)),
            _ => self.text_of(a).cmp(&self.text_of(b)),
        }
    }

    fn compare_children(&self, a: Value, b: Value, depth: usize) -> Ordering {
        let (xs, ys) = (self.children_of(a), self.children_of(b));
        for (x, y) in xs.iter().zip(ys) {
            let ord = self.compare_at(*x, *y, depth + 1);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        xs.len().cmp(&ys.len())
    }

    /// Index of the first record whose leading element equals `key`.
    pub fn linear_seek(&self, a: Value, key: Value, step: usize) -> Option<usize> {
        let items = self.items(a)?;
        (0..items.len())
            .step_by(step.max(1))
            .find(|&i| self.compare(items[i], key) == Ordering::Equal)
    }

    /// Binary search of an array sorted by `compare` in `step`-sized records.
    ///
    /// `Ok(index)` on a match, otherwise `Err(insertion_index)`.
    pub fn binary_seek(&self, a: Value, key: Value, step: usize) -> Result<usize, usize> {
        let Some(items) = self.items(a) else {
            return Err(0);
        };
        super::sort::seek_sorted(items, step, |element| self.compare(element, key))
    }
}

fn identity(v: Value) -> (u8, u32, u32) {
    match v {
        Value::Null => (0, 0, 0),
        Value::Cell(id) => (1, id.index, id.generation),
        Value::Scratch(id) => (2, id.index, id.serial),
    }
}
