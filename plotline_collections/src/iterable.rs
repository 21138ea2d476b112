// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy index windows over a collection's values.

use core::fmt;
use core::iter::FusedIterator;
use core::slice;

use crate::error::CollectionError;

/// A window `[start, end)` over a slice, possibly walked backwards.
///
/// When `start > end` the window covers `[end, start)` and yields from the
/// back. Restricting a window with [`range`](Self::range) is relative to the
/// window's own direction, and nothing is copied.
///
/// ```
/// use plotline_collections::List;
///
/// let list = List::from(vec![1, 2, 3, 4, 5]);
/// let window = list.range(1, 4).unwrap();
/// assert_eq!(window.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
///
/// let back = window.backwards();
/// assert_eq!(back.iter().copied().collect::<Vec<_>>(), [4, 3, 2]);
///
/// // The first two elements of the backwards window.
/// let front = back.range(0, 2).unwrap();
/// assert_eq!(front.iter().copied().collect::<Vec<_>>(), [4, 3]);
/// ```
pub struct IndexedIterable<'a, T> {
    values: &'a [T],
    start: usize,
    end: usize,
}

impl<'a, T> IndexedIterable<'a, T> {
    /// Creates a window over `values`; `start` and `end` are clamped to the
    /// slice.
    #[must_use]
    pub fn new(values: &'a [T], start: usize, end: usize) -> Self {
        let len = values.len();
        Self {
            values,
            start: start.min(len),
            end: end.min(len),
        }
    }

    /// Returns `true` if the window yields from the back.
    #[must_use]
    #[inline]
    pub fn is_backwards(&self) -> bool {
        self.start > self.end
    }

    /// Number of elements in the window.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.start.abs_diff(self.end)
    }

    /// Returns `true` if the window is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the same window walked in the opposite direction.
    #[must_use]
    pub fn backwards(&self) -> Self {
        Self {
            values: self.values,
            start: self.end,
            end: self.start,
        }
    }

    /// Restricts the window to its elements `[start, end)`, counted in the
    /// window's own direction and clamped to its length.
    pub fn range(&self, start: usize, end: usize) -> Result<Self, CollectionError> {
        if start > end {
            return Err(CollectionError::InvalidRange { start, end });
        }
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));
        let (start, end) = if self.is_backwards() {
            (self.start - start, self.start - end)
        } else {
            (self.start + start, self.start + end)
        };
        Ok(Self {
            values: self.values,
            start,
            end,
        })
    }

    /// Iterates the window in its direction.
    #[must_use]
    pub fn iter(&self) -> IndexedIter<'a, T> {
        let (lo, hi) = if self.is_backwards() {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        };
        IndexedIter {
            inner: self.values[lo..hi].iter(),
            backwards: self.is_backwards(),
        }
    }
}

impl<T> Clone for IndexedIterable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IndexedIterable<'_, T> {}

impl<'a, T> IntoIterator for IndexedIterable<'a, T> {
    type Item = &'a T;
    type IntoIter = IndexedIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &IndexedIterable<'a, T> {
    type Item = &'a T;
    type IntoIter = IndexedIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Debug for IndexedIterable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedIterable")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

/// Iterator over an [`IndexedIterable`].
#[derive(Clone, Debug)]
pub struct IndexedIter<'a, T> {
    inner: slice::Iter<'a, T>,
    backwards: bool,
}

impl<'a, T> Iterator for IndexedIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.backwards {
            self.inner.next_back()
        } else {
            self.inner.next()
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IndexedIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.backwards {
            self.inner.next()
        } else {
            self.inner.next_back()
        }
    }
}

impl<T> ExactSizeIterator for IndexedIter<'_, T> {}

impl<T> FusedIterator for IndexedIter<'_, T> {}
