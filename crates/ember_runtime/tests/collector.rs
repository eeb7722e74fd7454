mod common;

use common::{eager_heap, int_array};
use ember_runtime::{Heap, HeapConfig, Kind, SweepBudget};

#[test]
fn full_sweep_reclaims_released_values() {
    let mut heap = eager_heap();
    let s = heap.string("short-lived");
    let root = heap.root(s);
    assert_eq!(heap.live(), 1);

    heap.unroot(root);
    let stats = heap.sweep(SweepBudget::Full);
    assert_eq!(stats.freed, 1);
    assert_eq!(heap.live(), 0);
    assert!(!heap.is_live(s));
    assert_eq!(heap.kind(s), Kind::Null);
}

#[test]
fn retained_values_survive_any_number_of_sweeps() {
    let mut heap = eager_heap();
    let keep = heap.string("keep");
    heap.retain(keep);
    for _ in 0..10 {
        heap.string("garbage");
        heap.sweep(SweepBudget::Full);
    }
    assert!(heap.is_live(keep));
    assert_eq!(heap.to_text(keep), "keep");
    assert_eq!(heap.live(), 1);
}

#[test]
fn stale_handles_do_not_alias_reused_slots() {
    let mut heap = eager_heap();
    let old = heap.int(1);
    heap.sweep(SweepBudget::Full);
    let new = heap.int(2);
    assert_eq!(heap.free_slots(), 0);
    assert_ne!(old, new);
    assert!(!heap.is_live(old));
    assert_eq!(heap.as_int(old), 0);
    assert_eq!(heap.as_int(new), 2);
}

#[test]
fn bounded_sweeps_resume_where_they_stopped() {
    let mut heap = eager_heap();
    for i in 0..10 {
        heap.int(i);
    }
    let first = heap.sweep(4i64);
    assert_eq!(first.examined, 4);
    assert_eq!(first.freed, 4);
    let second = heap.sweep(SweepBudget::Batch(4));
    assert_eq!(second.freed, 4);
    assert_eq!(heap.live(), 2);
    heap.sweep(-1i64);
    assert_eq!(heap.live(), 0);
}

#[test]
fn bounded_sweeps_stop_at_low_water() {
    let mut heap = Heap::with_config(HeapConfig {
        low_water: 5,
        ..HeapConfig::default()
    });
    for i in 0..8 {
        heap.int(i);
    }
    let stats = heap.sweep(0i64);
    assert_eq!(stats.freed, 3);
    assert_eq!(heap.live(), 5);
    heap.sweep(SweepBudget::Full);
    assert_eq!(heap.live(), 0);
}

#[test]
fn containers_release_children_one_hop_per_reclaim() {
    let mut heap = eager_heap();
    let outer = int_array(&mut heap, &[]);
    let inner = int_array(&mut heap, &[1, 2]);
    heap.array_push(outer, inner);
    heap.release(inner);
    assert_eq!(heap.refs(inner), 1);

    heap.release(outer);
    for _ in 0..3 {
        heap.sweep(SweepBudget::Full);
    }
    assert!(!heap.is_live(outer));
    assert!(!heap.is_live(inner));
    assert_eq!(heap.live(), 0);
}

#[test]
fn cycles_are_not_collected() {
    let mut heap = eager_heap();
    let a = heap.array(1);
    heap.array_push(a, a);
    assert_eq!(heap.refs(a), 1);
    heap.sweep(SweepBudget::Full);
    assert!(heap.is_live(a));
}

#[test]
fn should_sweep_tracks_allocation_pressure() {
    let mut heap = Heap::with_config(HeapConfig {
        sweep_batch: 4,
        low_water: 0,
        ..HeapConfig::default()
    });
    for i in 0..3 {
        heap.int(i);
    }
    assert!(!heap.should_sweep());
    heap.int(3);
    assert!(heap.should_sweep());
    heap.sweep(SweepBudget::Default);
    assert!(!heap.should_sweep());
}

#[test]
fn clone_preserves_cycles() {
    let mut heap = eager_heap();
    let a = heap.array(2);
    heap.retain(a);
    let one = heap.int(1);
    heap.array_push(a, one);
    heap.array_push(a, a);

    let copy = heap.clone_value(a);
    assert_ne!(copy, a);
    assert_eq!(heap.array_get(copy, 1), copy);
    assert_eq!(heap.array_get(copy, 0), one);
    assert_eq!(heap.to_text(copy), "[1,[...]]");
}

#[test]
fn scratch_scope_unwinds_on_drop() {
    let mut heap = Heap::new();
    {
        let mut outer = heap.scratch();
        outer.scratch_int(1);
        {
            let mut inner = outer.scratch();
            assert_eq!(inner.save_point(), 1);
            inner.scratch_string("two");
            inner.scratch_real(3.0);
            assert_eq!(inner.scratch_len(), 3);
        }
        assert_eq!(outer.scratch_len(), 1);
    }
    assert_eq!(heap.scratch_len(), 0);
    assert_eq!(heap.live(), 0);
}
