#![allow(dead_code)]

use ember_runtime::{Heap, HeapConfig, Value};

/// Heap whose bounded sweeps run until the ring is empty.
pub fn eager_heap() -> Heap {
    Heap::with_config(HeapConfig {
        low_water: 0,
        ..HeapConfig::default()
    })
}

pub fn int_array(heap: &mut Heap, xs: &[i64]) -> Value {
    let a = heap.array(xs.len());
    heap.retain(a);
    for x in xs {
        let v = heap.int(*x);
        heap.array_push(a, v);
    }
    a
}

pub fn str_array(heap: &mut Heap, xs: &[&str]) -> Value {
    let a = heap.array(xs.len());
    heap.retain(a);
    for x in xs {
        let v = heap.string(x);
        heap.array_push(a, v);
    }
    a
}

pub fn ints(heap: &Heap, a: Value) -> Vec<i64> {
    heap.items(a)
        .unwrap_or(&[])
        .iter()
        .map(|v| heap.as_int(*v))
        .collect()
}

pub fn texts(heap: &Heap, a: Value) -> Vec<String> {
    heap.items(a)
        .unwrap_or(&[])
        .iter()
        .map(|v| heap.to_text(*v))
        .collect()
}
