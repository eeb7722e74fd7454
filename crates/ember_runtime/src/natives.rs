use ember_core::{Kind, Value};

use crate::core::heap::Heap;
use crate::errors::{RuntimeError, check_arity, messages};

fn expect_kind(
    heap: &Heap,
    name: &str,
    v: Value,
    kind: Kind,
    message: &'static str,
) -> Result<(), RuntimeError> {
    if heap.kind(v) == kind {
        Ok(())
    } else {
        Err(RuntimeError::argument(name, message))
    }
}

pub(crate) fn native_len(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("len", args, 1)?;
    let n = heap.size(args[0]);
    Ok(heap.int(n as i64))
}

pub(crate) fn native_text(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("text", args, 1)?;
    let s = heap.to_text(args[0]);
    Ok(heap.string(&s))
}

pub(crate) fn native_int(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("int", args, 1)?;
    let i = heap.as_int(args[0]);
    Ok(heap.int(i))
}

pub(crate) fn native_push(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("push", args, 2)?;
    if !heap.kind(args[0]).is_multi() || heap.kind(args[0]) == Kind::Hash {
        return Err(RuntimeError::argument("push", messages::NOT_AN_ARRAY));
    }
    Ok(heap.array_push(args[0], args[1]))
}

pub(crate) fn native_pop(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("pop", args, 1)?;
    expect_kind(heap, "pop", args[0], Kind::Array, messages::NOT_AN_ARRAY)?;
    Ok(heap.array_pop(args[0]))
}

/// `sort(array)` or `sort(array, comparator)`.
pub(crate) fn native_sort(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.is_empty() || args.len() > 2 {
        return Err(RuntimeError::Arity {
            name: "sort".to_string(),
            expected: 1,
            got: args.len(),
        });
    }
    expect_kind(heap, "sort", args[0], Kind::Array, messages::NOT_AN_ARRAY)?;
    if args.get(1).is_some_and(|c| !heap.is_executable(*c)) {
        return Err(RuntimeError::argument("sort", messages::NOT_EXECUTABLE));
    }
    heap.array_sort(args[0], 1, args.get(1).copied())?;
    Ok(args[0])
}

pub(crate) fn native_reverse(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("reverse", args, 1)?;
    expect_kind(heap, "reverse", args[0], Kind::Array, messages::NOT_AN_ARRAY)?;
    heap.array_reverse(args[0]);
    Ok(args[0])
}

pub(crate) fn native_keys(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("keys", args, 1)?;
    expect_kind(heap, "keys", args[0], Kind::Hash, messages::NOT_A_HASH)?;
    Ok(heap.hash_keys(args[0]))
}

pub(crate) fn native_values(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("values", args, 1)?;
    expect_kind(heap, "values", args[0], Kind::Hash, messages::NOT_A_HASH)?;
    Ok(heap.hash_values(args[0]))
}

pub(crate) fn native_exists(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("exists", args, 2)?;
    expect_kind(heap, "exists", args[0], Kind::Hash, messages::NOT_A_HASH)?;
    let found = heap.hash_exists(args[0], args[1]);
    Ok(heap.int(i64::from(found)))
}

pub(crate) fn native_sget(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("sget", args, 2)?;
    Ok(heap.sget(args[0], args[1]))
}

pub(crate) fn native_sset(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("sset", args, 3)?;
    Ok(heap.sset(args[0], args[1], args[2]))
}

/// `split(separator, text)`.
pub(crate) fn native_split(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("split", args, 2)?;
    expect_kind(heap, "split", args[1], Kind::Str, messages::NOT_A_STRING)?;
    Ok(heap.split(args[0], args[1]))
}

/// `join(separator, array)`.
pub(crate) fn native_join(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    check_arity("join", args, 2)?;
    expect_kind(heap, "join", args[1], Kind::Array, messages::NOT_AN_ARRAY)?;
    Ok(heap.join(args[0], args[1]))
}

/// `call(callable, args...)`.
pub(crate) fn native_call(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    let Some((callable, rest)) = args.split_first() else {
        return Err(RuntimeError::Arity {
            name: "call".to_string(),
            expected: 1,
            got: 0,
        });
    };
    if !heap.is_executable(*callable) {
        return Err(RuntimeError::argument("call", messages::NOT_EXECUTABLE));
    }
    heap.exec(*callable, rest)
}

/// `sweep()` or `sweep(budget)`; returns the number of cells freed.
pub(crate) fn native_sweep(heap: &mut Heap, args: &[Value]) -> Result<Value, RuntimeError> {
    let budget = match args {
        [] => 0,
        [n] => heap.as_int(*n),
        _ => {
            return Err(RuntimeError::Arity {
                name: "sweep".to_string(),
                expected: 1,
                got: args.len(),
            });
        }
    };
    let stats = heap.sweep(budget);
    Ok(heap.int(stats.freed as i64))
}
