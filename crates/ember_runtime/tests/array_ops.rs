mod common;

use std::cmp::Ordering;

use common::{int_array, ints, str_array, texts};
use ember_runtime::{Heap, Kind, RuntimeError, Value};

const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

#[test]
fn get_accepts_negative_offsets() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[1, 2, 3]);
    assert_eq!(heap.as_int(heap.array_get(a, 0)), 1);
    assert_eq!(heap.as_int(heap.array_get(a, -1)), 3);
    assert_eq!(heap.as_int(heap.array_get(a, -3)), 1);
    assert!(heap.array_get(a, -4).is_null());
    assert!(heap.array_get(a, 3).is_null());
}

#[test]
fn set_grows_and_swaps_references() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[1]);
    let old = heap.array_get(a, 0);
    let new = heap.int(9);

    let prev = heap.array_set(a, new, 0);
    assert_eq!(prev, old);
    assert_eq!(heap.refs(old), 0);
    assert_eq!(heap.refs(new), 1);

    let far = heap.int(4);
    assert!(heap.array_set(a, far, 3).is_null());
    assert_eq!(heap.size(a), 4);
    assert!(heap.array_get(a, 2).is_null());
    assert_eq!(heap.as_int(heap.array_get(a, 3)), 4);
}

#[test]
fn operations_on_non_arrays_are_misses() {
    let mut heap = Heap::new();
    let s = heap.string("text");
    let v = heap.int(1);
    assert!(heap.array_get(s, 0).is_null());
    assert!(heap.array_set(s, v, 0).is_null());
    assert!(!heap.array_expand(s, 0, 2));
    assert_eq!(heap.array_collapse(s, 0, 2), 0);
    assert!(heap.array_get(Value::NULL, 0).is_null());
}

#[test]
fn insert_and_delete_shift_elements() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[1, 3]);
    let two = heap.int(2);
    let stored = heap.array_insert(a, two, 1);
    assert_eq!(stored, two);
    assert_eq!(ints(&heap, a), [1, 2, 3]);

    let removed = heap.array_delete(a, 0);
    assert_eq!(heap.as_int(removed), 1);
    assert_eq!(heap.refs(removed), 0);
    assert_eq!(ints(&heap, a), [2, 3]);

    let popped = heap.array_pop(a);
    assert_eq!(heap.as_int(popped), 3);
    assert_eq!(ints(&heap, a), [2]);
    assert!(heap.array_delete(a, 5).is_null());
}

#[test]
fn expand_and_collapse_respect_bounds() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[1, 2, 3]);
    assert!(heap.array_expand(a, 1, 2));
    assert_eq!(heap.size(a), 5);
    assert!(heap.array_get(a, 1).is_null());
    assert!(heap.array_get(a, 2).is_null());
    assert_eq!(heap.as_int(heap.array_get(a, 3)), 2);

    assert_eq!(heap.array_collapse(a, 1, 2), 2);
    assert_eq!(ints(&heap, a), [1, 2, 3]);
    assert_eq!(heap.array_collapse(a, 2, 10), 1);
    assert_eq!(ints(&heap, a), [1, 2]);
    assert_eq!(heap.array_collapse(a, 2, 1), 0);
}

#[test]
fn collapse_releases_removed_elements_once() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[7, 8]);
    let seven = heap.array_get(a, 0);
    heap.retain(seven);
    assert_eq!(heap.refs(seven), 2);
    heap.array_collapse(a, 0, 1);
    assert_eq!(heap.refs(seven), 1);
}

#[test]
fn queue_evicts_from_the_front() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[]);
    let mut evicted = Vec::new();
    for i in 1..=5 {
        let v = heap.int(i);
        let out = heap.array_queue(a, v, 3);
        evicted.push((!out.is_null()).then(|| heap.as_int(out)));
    }
    assert_eq!(ints(&heap, a), [3, 4, 5]);
    assert_eq!(evicted, [None, None, None, Some(1), Some(2)]);

    let v = heap.int(6);
    assert!(heap.array_queue(a, v, 0).is_null());
    assert_eq!(heap.size(a), 3);
}

#[test]
fn weekdays_sort_lexicographically() {
    let mut heap = Heap::new();
    let days = str_array(&mut heap, &WEEKDAYS);
    heap.array_sort(days, 1, None).unwrap();
    let sorted = texts(&heap, days);
    assert_eq!(sorted.first().map(String::as_str), Some("friday"));
    assert_eq!(sorted.last().map(String::as_str), Some("wednesday"));
    let mut expected: Vec<String> = WEEKDAYS.iter().map(|d| d.to_string()).collect();
    expected.sort();
    assert_eq!(sorted, expected);
}

fn descending(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    let ord = heap.compare(args[1], args[0]);
    Ok(heap.int(ord as i64))
}

fn refuse(_heap: &mut Heap, _args: &[Value]) -> Result<Value, RuntimeError> {
    Err(RuntimeError::native("no ordering"))
}

#[test]
fn sort_uses_a_comparator_when_given() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[2, 5, 1, 4]);
    let cmp = heap.native(descending);
    heap.array_sort(a, 1, Some(cmp)).unwrap();
    assert_eq!(ints(&heap, a), [5, 4, 2, 1]);
}

#[test]
fn failing_comparator_leaves_array_unchanged() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[3, 1, 2]);
    let cmp = heap.native(refuse);
    let err = heap.array_sort(a, 1, Some(cmp)).unwrap_err();
    assert_eq!(err, RuntimeError::native("no ordering"));
    assert_eq!(ints(&heap, a), [3, 1, 2]);
}

#[test]
fn sort_moves_whole_records() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[3, 30, 1, 10, 2, 20, 99]);
    heap.array_sort(a, 2, None).unwrap();
    assert_eq!(ints(&heap, a), [1, 10, 2, 20, 3, 30, 99]);
}

#[test]
fn splice_returns_removed_elements() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[1, 2, 3, 4]);
    let x = heap.int(8);
    let y = heap.int(9);
    let removed = heap.array_splice(a, 1, 2, &[x, y, x]);
    assert_eq!(ints(&heap, removed), [2, 3]);
    assert_eq!(ints(&heap, a), [1, 8, 9, 8, 4]);
    assert_eq!(heap.refs(x), 2);
}

#[test]
fn slice_and_reverse() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[1, 2, 3, 4, 5]);
    let s = heap.array_slice(a, -3, 2);
    assert_eq!(ints(&heap, s), [3, 4]);
    let empty = heap.array_slice(a, 9, 2);
    assert_eq!(heap.kind(empty), Kind::Array);
    assert_eq!(heap.size(empty), 0);
    assert!(heap.array_reverse(a));
    assert_eq!(ints(&heap, a), [5, 4, 3, 2, 1]);
}

#[test]
fn binary_and_linear_seek_agree() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[10, 20, 30, 40]);
    for (i, x) in [10, 20, 30, 40].into_iter().enumerate() {
        let key = heap.int(x);
        assert_eq!(heap.binary_seek(a, key, 1), Ok(i));
        assert_eq!(heap.linear_seek(a, key, 1), Some(i));
    }
    let absent = heap.int(25);
    assert_eq!(heap.binary_seek(a, absent, 1), Err(2));
    assert_eq!(heap.linear_seek(a, absent, 1), None);
}

#[test]
fn binary_seek_returns_first_of_duplicates() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[1, 2, 2, 2, 3]);
    let two = heap.int(2);
    assert_eq!(heap.binary_seek(a, two, 1), Ok(1));
    assert_eq!(heap.linear_seek(a, two, 1), Some(1));

    let records = int_array(&mut heap, &[1, 10, 2, 20, 2, 21, 3, 30]);
    assert_eq!(heap.binary_seek(records, two, 2), Ok(2));
    assert_eq!(heap.linear_seek(records, two, 2), Some(2));
}

#[test]
fn compare_orders_across_kinds() {
    let mut heap = Heap::new();
    let one = heap.int(1);
    let half = heap.real(1.5);
    let word = heap.string("abc");
    assert_eq!(heap.compare(Value::NULL, one), Ordering::Less);
    assert_eq!(heap.compare(one, half), Ordering::Less);
    assert_eq!(heap.compare(half, one), Ordering::Greater);
    let same = heap.string("abc");
    assert_eq!(heap.compare(word, same), Ordering::Equal);

    let short = int_array(&mut heap, &[9]);
    let long = int_array(&mut heap, &[1, 2]);
    assert_eq!(heap.compare(short, long), Ordering::Less);
}

#[test]
fn storing_scratch_values_clones_them() {
    let mut heap = Heap::new();
    let a = int_array(&mut heap, &[]);
    {
        let mut scope = heap.scratch();
        let s = scope.scratch_string("temp");
        let stored = scope.array_push(a, s);
        assert!(stored.is_cell());
        assert_ne!(stored, s);
        assert_eq!(scope.scratch_len(), 1);
    }
    assert_eq!(heap.scratch_len(), 0);
    assert_eq!(texts(&heap, a), ["temp"]);
}
