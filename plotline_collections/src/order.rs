// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering helpers shared by the sorted collections.
//!
//! Orderings are plain [`core::cmp::Ordering`] values. The helpers here
//! combine them and locate positions in sorted slices.

use core::cmp::Ordering;

/// Flips an ordering.
#[inline]
#[must_use]
pub fn reverse(order: Ordering) -> Ordering {
    order.reverse()
}

/// Returns `a` unless it is `Equal`, in which case returns `b`.
#[inline]
#[must_use]
pub fn or(a: Ordering, b: Ordering) -> Ordering {
    a.then(b)
}

/// Compares two numbers totally. NaN sorts after every number and equals
/// itself.
#[must_use]
pub fn compare_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compares two strings by code point.
#[inline]
#[must_use]
pub fn compare_str(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Result of [`sorted_index`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SortedIndex {
    /// Whether an element comparing equal was found.
    pub found: bool,
    /// The last equal element when `found`, else the insertion point.
    pub index: usize,
}

impl SortedIndex {
    /// Position at which a new element keeps the slice sorted, after any
    /// equal elements.
    #[must_use]
    pub const fn insertion_point(&self) -> usize {
        if self.found { self.index + 1 } else { self.index }
    }
}

/// Binary-searches `values`, which must be sorted consistently with
/// `ordering`.
///
/// `ordering(x)` compares an element `x` against the sought value. On
/// equality the search keeps going right, so the reported index is the last
/// equal element.
///
/// ```
/// use plotline_collections::order::sorted_index;
///
/// let values = [1, 3, 3, 5];
/// let hit = sorted_index(&values, |x| x.cmp(&3));
/// assert!(hit.found);
/// assert_eq!(hit.index, 2);
/// assert_eq!(hit.insertion_point(), 3);
///
/// let miss = sorted_index(&values, |x| x.cmp(&4));
/// assert!(!miss.found);
/// assert_eq!(miss.index, 3);
/// ```
pub fn sorted_index<T>(values: &[T], mut ordering: impl FnMut(&T) -> Ordering) -> SortedIndex {
    let mut start = 0;
    let mut end = values.len();
    let mut found = false;
    while start < end {
        let pivot = start + (end - start) / 2;
        match ordering(&values[pivot]) {
            Ordering::Less => start = pivot + 1,
            Ordering::Equal => {
                found = true;
                start = pivot + 1;
            }
            Ordering::Greater => end = pivot,
        }
    }
    SortedIndex {
        found,
        index: if found { start - 1 } else { start },
    }
}
