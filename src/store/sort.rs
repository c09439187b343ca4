//! Chronological ordering of events
//!
//! Partition-exchange sort with the last element of each range as pivot
//! (Lomuto). Dates are `YYYY-MM-DD`, so byte order is calendar order.
//!
//! Whole records are moved between positions. Nothing outside the store keeps
//! a position, only ids, so what a registration refers to is unchanged after
//! a sort. The sort is not stable: events on the same date may swap.

use std::cmp::Ordering;

use crate::types::Event;

/// Sort events in place by date, earliest first
pub fn sort_by_date(events: &mut [Event]) {
    quicksort_by(events, &mut |a: &Event, b: &Event| {
        a.date.as_bytes().cmp(b.date.as_bytes())
    });
}

/// Quicksort `items` with `compare`
///
/// Recurses into the smaller partition and loops over the larger one, so the
/// stack stays logarithmic even when already-sorted input drives the running
/// time to quadratic.
pub(crate) fn quicksort_by<T, F>(mut items: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while items.len() > 1 {
        let pivot = partition(items, compare);
        let (left, rest) = std::mem::take(&mut items).split_at_mut(pivot);
        let right = &mut rest[1..];

        if left.len() < right.len() {
            quicksort_by(left, compare);
            items = right;
        } else {
            quicksort_by(right, compare);
            items = left;
        }
    }
}

/// Lomuto partition around the last element; returns the pivot's final index
fn partition<T, F>(items: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let high = items.len() - 1;
    let mut store = 0;

    for j in 0..high {
        if compare(&items[j], &items[high]) != Ordering::Greater {
            items.swap(store, j);
            store += 1;
        }
    }

    items.swap(store, high);
    store
}
