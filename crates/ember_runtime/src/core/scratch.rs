//! Scope-bound pool for non-owned values.
//!
//! Scratch cells never enter the collector's ring. A [`ScratchScope`] records
//! the pool's save-point and unwinds to it when dropped, so every exit path
//! of the scope (early return and `?` included) resets the pool.

use std::ops::{Deref, DerefMut};

use ember_core::{ScratchId, Value};

use super::cell::{Payload, ValueCell};
use super::heap::{Heap, reserve_items};

pub(crate) struct ScratchSlot {
    pub(crate) serial: u32,
    pub(crate) cell: ValueCell,
}

pub struct ScratchScope<'h> {
    heap: &'h mut Heap,
    mark: usize,
}

impl Heap {
    /// Open a scratch scope. Scopes nest through the guard's `DerefMut`.
    pub fn scratch(&mut self) -> ScratchScope<'_> {
        let mark = self.scratch.len();
        ScratchScope { heap: self, mark }
    }

    fn unwind_scratch(&mut self, mark: usize) {
        if mark >= self.scratch.len() {
            return;
        }
        let dropped: Vec<ScratchSlot> = self.scratch.drain(mark..).collect();
        for slot in &dropped {
            for child in slot.cell.payload.children() {
                self.release(*child);
            }
        }
    }
}

impl ScratchScope<'_> {
    fn alloc(&mut self, payload: Payload) -> Value {
        let heap = &mut *self.heap;
        let serial = heap.scratch_serial;
        heap.scratch_serial = heap.scratch_serial.wrapping_add(1);
        let index = heap.scratch.len() as u32;
        heap.scratch.push(ScratchSlot {
            serial,
            cell: ValueCell::new(payload),
        });
        Value::Scratch(ScratchId::new(index, serial))
    }

    pub fn scratch_string(&mut self, s: &str) -> Value {
        self.alloc(Payload::Str(s.into()))
    }

    pub fn scratch_int(&mut self, i: i64) -> Value {
        self.alloc(Payload::Int(i))
    }

    pub fn scratch_real(&mut self, f: f64) -> Value {
        self.alloc(Payload::Real(f))
    }

    pub fn scratch_array(&mut self, capacity: usize) -> Value {
        let mut items = Vec::new();
        reserve_items(&mut items, capacity);
        self.alloc(Payload::Array(items))
    }

    /// Pool length when this scope opened.
    pub fn save_point(&self) -> usize {
        self.mark
    }
}

impl Deref for ScratchScope<'_> {
    type Target = Heap;

    fn deref(&self) -> &Heap {
        self.heap
    }
}

impl DerefMut for ScratchScope<'_> {
    fn deref_mut(&mut self) -> &mut Heap {
        self.heap
    }
}

impl Drop for ScratchScope<'_> {
    fn drop(&mut self) {
        self.heap.unwind_scratch(self.mark);
    }
}
