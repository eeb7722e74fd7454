//! Stable, fallible merge sort and sorted-record search.

use std::cmp::Ordering;

/// Bottom-up merge sort that never panics on an inconsistent comparator and
/// stops at the first comparator error.
pub(crate) fn merge_sort_by<T, E, F>(v: &mut [T], mut cmp: F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(T, T) -> Result<Ordering, E>,
{
    let n = v.len();
    if n < 2 {
        return Ok(());
    }
    let mut src = v.to_vec();
    let mut dst = v.to_vec();
    let mut width = 1;
    while width < n {
        let mut start = 0;
        while start < n {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            let (mut i, mut j, mut k) = (start, mid, start);
            while i < mid && j < end {
                if cmp(src[j], src[i])? == Ordering::Less {
                    dst[k] = src[j];
                    j += 1;
                } else {
                    dst[k] = src[i];
                    i += 1;
                }
                k += 1;
            }
            dst[k..k + (mid - i)].copy_from_slice(&src[i..mid]);
            k += mid - i;
            dst[k..k + (end - j)].copy_from_slice(&src[j..end]);
            start = end;
        }
        std::mem::swap(&mut src, &mut dst);
        width *= 2;
    }
    v.copy_from_slice(&src);
    Ok(())
}

/// Binary search over `step`-sized records keyed by their first element.
///
/// `probe(element)` orders an element against the sought key. Returns the
/// element index of the first matching record, or the index where a record
/// with the key would be inserted to keep the order.
pub(crate) fn seek_sorted<T: Copy>(
    items: &[T],
    step: usize,
    mut probe: impl FnMut(T) -> Ordering,
) -> Result<usize, usize> {
    let step = step.max(1);
    let (mut lo, mut hi) = (0, items.len() / step);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if probe(items[mid * step]) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    let at = lo * step;
    if lo < items.len() / step && probe(items[at]) == Ordering::Equal {
        Ok(at)
    } else {
        Err(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sort_is_stable() {
        let mut v = [(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')];
        merge_sort_by(&mut v, |x, y| Ok::<_, ()>(x.0.cmp(&y.0))).unwrap();
        assert_eq!(v, [(1, 'b'), (1, 'e'), (2, 'd'), (3, 'a'), (3, 'c')]);
    }

    #[test]
    fn merge_sort_survives_inconsistent_comparator() {
        let mut v: Vec<u32> = (0..50).collect();
        let mut flip = false;
        merge_sort_by(&mut v, |_, _| {
            flip = !flip;
            Ok::<_, ()>(if flip { Ordering::Less } else { Ordering::Greater })
        })
        .unwrap();
        let mut seen = v.clone();
        seen.sort();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn merge_sort_propagates_first_error() {
        let mut v = [5, 4, 3];
        let err = merge_sort_by(&mut v, |a: i32, _| if a == 3 { Err("boom") } else { Ok(Ordering::Less) });
        assert_eq!(err, Err("boom"));
    }

    #[test]
    fn seek_sorted_reports_insertion_point() {
        let items = [10, 100, 20, 200, 30, 300];
        assert_eq!(seek_sorted(&items, 2, |k: i32| k.cmp(&20)), Ok(2));
        assert_eq!(seek_sorted(&items, 2, |k: i32| k.cmp(&25)), Err(4));
        assert_eq!(seek_sorted(&items, 2, |k: i32| k.cmp(&5)), Err(0));
        assert_eq!(seek_sorted(&items, 2, |k: i32| k.cmp(&99)), Err(6));
    }

    #[test]
    fn seek_sorted_finds_first_of_equal_keys() {
        let items = [1, 2, 2, 2, 3];
        assert_eq!(seek_sorted(&items, 1, |k: i32| k.cmp(&2)), Ok(1));
        let records = [1, 0, 4, 1, 4, 2, 4, 3, 9, 0];
        assert_eq!(seek_sorted(&records, 2, |k: i32| k.cmp(&4)), Ok(2));
    }
}
