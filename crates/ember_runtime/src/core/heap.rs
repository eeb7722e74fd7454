//! Value allocation, reference counting and cell lookup.

use std::alloc::Layout;

use ember_core::{FastHashMap, Kind, ObjectId, Value, fast_map_new};

use super::cell::{FileHandle, HashTable, Payload, ValueCell};
use super::scratch::ScratchSlot;
use crate::config::HeapConfig;

pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) cell: Option<ValueCell>,
}

/// Owner of every value cell.
///
/// Long-lived cells sit in a free-list backed slab that doubles as the
/// collector's ring; `cursor` is where the next sweep resumes. Non-owned
/// cells live in the scratch pool and are never swept.
pub struct Heap {
    pub(crate) slots: Vec<Slot>,
    free_list: Vec<u32>,
    pub(crate) live: usize,
    pub(crate) cursor: usize,
    pub(crate) alloc_count: usize,
    pub(crate) scratch: Vec<ScratchSlot>,
    pub(crate) scratch_serial: u32,
    pub(crate) config: HeapConfig,
}

/// A retained reference that must be handed back to [`Heap::unroot`].
#[must_use = "a Root holds a reference until it is passed to Heap::unroot"]
#[derive(Debug)]
pub struct Root(Value);

impl Root {
    pub fn value(&self) -> Value {
        self.0
    }
}

#[cold]
fn slots_exhausted() -> ! {
    tracing::error!("value slab exhausted its index space");
    std::alloc::handle_alloc_error(Layout::new::<ValueCell>())
}

#[cold]
fn elements_exhausted(requested: usize) -> ! {
    tracing::error!(requested, "element storage cannot grow");
    std::alloc::handle_alloc_error(Layout::new::<Value>())
}

/// Reserve room for `additional` elements. Storage that cannot be reserved
/// is fatal.
pub(crate) fn reserve_items(items: &mut Vec<Value>, additional: usize) {
    if items.try_reserve(additional).is_err() {
        elements_exhausted(items.len().saturating_add(additional))
    }
}

/// Grow `items` with nulls to `len`.
pub(crate) fn pad_items(items: &mut Vec<Value>, len: usize) {
    if len <= items.len() {
        return;
    }
    reserve_items(items, len - items.len());
    items.resize(len, Value::NULL);
}

impl Heap {
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    pub fn with_config(config: HeapConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_slots),
            free_list: Vec::new(),
            live: 0,
            cursor: 0,
            alloc_count: 0,
            scratch: Vec::new(),
            scratch_serial: 0,
            config,
        }
    }

    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Allocate a long-lived cell with a reference count of zero.
    pub fn create(&mut self, payload: Payload) -> Value {
        tracing::trace!(kind = %payload.kind(), "create");
        self.alloc_count += 1;
        self.live += 1;
        let cell = ValueCell::new(payload);

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.cell = Some(cell);
            Value::Cell(ObjectId::new(index, slot.generation))
        } else {
            let Ok(index) = u32::try_from(self.slots.len()) else {
                slots_exhausted()
            };
            self.slots.push(Slot {
                generation: 0,
                cell: Some(cell),
            });
            Value::Cell(ObjectId::new(index, 0))
        }
    }

    pub fn string(&mut self, s: &str) -> Value {
        self.create(Payload::Str(s.into()))
    }

    pub fn int(&mut self, i: i64) -> Value {
        self.create(Payload::Int(i))
    }

    pub fn real(&mut self, f: f64) -> Value {
        self.create(Payload::Real(f))
    }

    pub fn null_cell(&mut self) -> Value {
        self.create(Payload::Null)
    }

    pub fn array(&mut self, capacity: usize) -> Value {
        let mut items = Vec::new();
        reserve_items(&mut items, capacity);
        self.create(Payload::Array(items))
    }

    /// New array holding `items`; each element is owned and retained.
    pub fn array_from(&mut self, items: &[Value]) -> Value {
        let owned = self.own_all(items);
        self.create(Payload::Array(owned))
    }

    /// New program cell; element 0 is the dispatcher, element 1 auxiliary data.
    pub fn program(&mut self, items: &[Value]) -> Value {
        let owned = self.own_all(items);
        self.create(Payload::Program(owned))
    }

    pub fn hash(&mut self) -> Value {
        self.create(Payload::Hash(HashTable::default()))
    }

    pub fn file(&mut self, path: &str, file: Option<std::fs::File>) -> Value {
        self.create(Payload::File(FileHandle {
            path: path.to_string(),
            file,
        }))
    }

    fn own_all(&mut self, items: &[Value]) -> Vec<Value> {
        let mut owned = Vec::with_capacity(items.len());
        for item in items {
            let v = self.own(*item);
            self.retain(v);
            owned.push(v);
        }
        owned
    }

    pub fn cell(&self, v: Value) -> Option<&ValueCell> {
        match v {
            Value::Null => None,
            Value::Cell(id) => {
                let slot = self.slots.get(id.slot())?;
                if slot.generation != id.generation {
                    return None;
                }
                slot.cell.as_ref()
            }
            Value::Scratch(id) => {
                let slot = self.scratch.get(id.slot())?;
                (slot.serial == id.serial).then_some(&slot.cell)
            }
        }
    }

    pub(crate) fn cell_mut(&mut self, v: Value) -> Option<&mut ValueCell> {
        match v {
            Value::Null => None,
            Value::Cell(id) => {
                let slot = self.slots.get_mut(id.slot())?;
                if slot.generation != id.generation {
                    return None;
                }
                slot.cell.as_mut()
            }
            Value::Scratch(id) => {
                let slot = self.scratch.get_mut(id.slot())?;
                (slot.serial == id.serial).then_some(&mut slot.cell)
            }
        }
    }

    /// Kind of `v`; absent and stale handles read as `Null`.
    pub fn kind(&self, v: Value) -> Kind {
        self.cell(v).map_or(Kind::Null, ValueCell::kind)
    }

    /// Whether `v` still resolves to a cell.
    pub fn is_live(&self, v: Value) -> bool {
        self.cell(v).is_some()
    }

    pub fn refs(&self, v: Value) -> u32 {
        self.cell(v).map_or(0, ValueCell::refs)
    }

    /// Element count for containers, byte length for strings, 0 otherwise.
    pub fn size(&self, v: Value) -> usize {
        match self.cell(v).map(|c| &c.payload) {
            Some(Payload::Str(s)) => s.len(),
            Some(Payload::Array(items)) | Some(Payload::Program(items)) => items.len(),
            Some(Payload::Hash(table)) => table.pairs,
            _ => 0,
        }
    }

    /// References owned by `v`: array elements or hash buckets.
    pub fn children_of(&self, v: Value) -> &[Value] {
        self.cell(v).map(|c| c.payload.children()).unwrap_or(&[])
    }

    pub fn as_str(&self, v: Value) -> Option<&str> {
        match self.cell(v).map(|c| &c.payload) {
            Some(Payload::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Number of long-lived cells currently in the ring.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn scratch_len(&self) -> usize {
        self.scratch.len()
    }

    pub fn retain(&mut self, v: Value) -> Value {
        if let Some(cell) = self.cell_mut(v) {
            cell.refs = cell.refs.saturating_add(1);
        }
        v
    }

    pub fn release(&mut self, v: Value) -> Value {
        if let Some(cell) = self.cell_mut(v) {
            if cell.refs == 0 {
                tracing::warn!(value = ?v, "release of a value with no outstanding references");
            } else {
                cell.refs -= 1;
            }
        }
        v
    }

    pub fn root(&mut self, v: Value) -> Root {
        Root(self.retain(v))
    }

    pub fn unroot(&mut self, root: Root) -> Value {
        self.release(root.0)
    }

    /// `v` itself unless it is a scratch value, in which case an owned clone.
    pub fn own(&mut self, v: Value) -> Value {
        if v.is_scratch() {
            self.clone_value(v)
        } else {
            v
        }
    }

    /// Clone for storage.
    ///
    /// Owned scalars are immutable and returned as-is. Scratch scalars get an
    /// owned copy. Containers are copied with every child cloned; a container
    /// reached twice maps to the same copy, so cycles survive the clone.
    pub fn clone_value(&mut self, v: Value) -> Value {
        let mut copies: FastHashMap<Value, Value> = fast_map_new();
        self.clone_inner(v, &mut copies)
    }

    fn clone_inner(&mut self, v: Value, copies: &mut FastHashMap<Value, Value>) -> Value {
        if let Some(done) = copies.get(&v) {
            return *done;
        }
        let Some(cell) = self.cell(v) else {
            return Value::NULL;
        };
        let (children, shell) = match &cell.payload {
            Payload::Array(items) => (items.clone(), Payload::Array(Vec::new())),
            Payload::Program(items) => (items.clone(), Payload::Program(Vec::new())),
            Payload::Hash(table) => (
                table.buckets.clone(),
                Payload::Hash(HashTable {
                    buckets: Vec::new(),
                    pairs: table.pairs,
                }),
            ),
            _ if !v.is_scratch() => return v,
            Payload::Str(s) => {
                let s = s.clone();
                return self.create(Payload::Str(s));
            }
            Payload::Int(i) => {
                let i = *i;
                return self.int(i);
            }
            Payload::Real(f) => {
                let f = *f;
                return self.real(f);
            }
            Payload::Null | Payload::Exec(_) | Payload::File(_) => return Value::NULL,
        };

        let copy = self.create(shell);
        copies.insert(v, copy);
        let mut cloned = Vec::with_capacity(children.len());
        for child in children {
            let c = self.clone_inner(child, copies);
            self.retain(c);
            cloned.push(c);
        }
        if let Some(cell) = self.cell_mut(copy) {
            match &mut cell.payload {
                Payload::Array(items) | Payload::Program(items) => *items = cloned,
                Payload::Hash(table) => table.buckets = cloned,
                _ => {}
            }
        }
        copy
    }

    pub(crate) fn free_slot(&mut self, index: usize) -> Option<ValueCell> {
        let slot = self.slots.get_mut(index)?;
        let cell = slot.cell.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(index as u32);
        self.live -= 1;
        Some(cell)
    }

    pub fn free_slots(&self) -> usize {
        self.free_list.len()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
