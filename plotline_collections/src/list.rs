// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable index-addressable list.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::slice;

use plotline_events::{Event, EventDispatcher};

use crate::error::CollectionError;
use crate::identity::Identity;
use crate::iterable::IndexedIterable;

/// Structural change notifications emitted by a [`List`].
#[derive(Clone, Debug, PartialEq)]
pub enum ListEvent<T> {
    /// A value entered the list.
    Inserted {
        /// The new value.
        new_value: T,
    },
    /// A value left the list.
    Removed {
        /// The removed value.
        old_value: T,
    },
    /// The whole content was replaced.
    SetAll {
        /// Content before the replacement.
        old_values: Vec<T>,
        /// Content after the replacement.
        new_values: Vec<T>,
    },
    /// A value was inserted at `index`.
    InsertIndex {
        /// Position of the new value.
        index: usize,
        /// The new value.
        new_value: T,
    },
    /// The value at `index` was overwritten.
    SetIndex {
        /// Overwritten position.
        index: usize,
        /// Value before the write.
        old_value: T,
        /// Value after the write.
        new_value: T,
    },
    /// The value at `index` was removed.
    RemoveIndex {
        /// Position the value was removed from.
        index: usize,
        /// The removed value.
        old_value: T,
    },
}

/// Channels of [`ListEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListEventKind {
    /// [`ListEvent::Inserted`].
    Inserted,
    /// [`ListEvent::Removed`].
    Removed,
    /// [`ListEvent::SetAll`].
    SetAll,
    /// [`ListEvent::InsertIndex`].
    InsertIndex,
    /// [`ListEvent::SetIndex`].
    SetIndex,
    /// [`ListEvent::RemoveIndex`].
    RemoveIndex,
}

impl<T: 'static> Event for ListEvent<T> {
    type Kind = ListEventKind;

    fn kind(&self) -> ListEventKind {
        match self {
            Self::Inserted { .. } => ListEventKind::Inserted,
            Self::Removed { .. } => ListEventKind::Removed,
            Self::SetAll { .. } => ListEventKind::SetAll,
            Self::InsertIndex { .. } => ListEventKind::InsertIndex,
            Self::SetIndex { .. } => ListEventKind::SetIndex,
            Self::RemoveIndex { .. } => ListEventKind::RemoveIndex,
        }
    }
}

/// An ordered sequence that reports structural changes.
///
/// Every mutation takes effect first and is then reported through
/// [`events`](Self::events), synchronously. Payloads are only built for kinds
/// somebody listens to, so an unobserved list costs no more than a `Vec`.
///
/// [`Identity`] decides whether [`set_index`](Self::set_index) changes
/// anything: plain values compare by value, `Rc` handles by pointer.
/// Lookups ([`index_of`](Self::index_of), [`contains`](Self::contains)) use
/// `PartialEq`.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use plotline_collections::{List, ListEvent, ListEventKind};
/// use plotline_events::Handler;
///
/// let mut list = List::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// {
///     let seen = seen.clone();
///     list.events()
///         .on(
///             ListEventKind::InsertIndex,
///             Handler::new(move |e: &ListEvent<&'static str>| seen.borrow_mut().push(e.clone())),
///             None,
///             true,
///         )
///         .unwrap();
/// }
///
/// list.push("a");
/// list.unshift("b");
/// assert_eq!(list.values(), ["b", "a"]);
/// assert_eq!(
///     *seen.borrow(),
///     [
///         ListEvent::InsertIndex { index: 0, new_value: "a" },
///         ListEvent::InsertIndex { index: 0, new_value: "b" },
///     ]
/// );
/// ```
pub struct List<T: 'static> {
    values: Vec<T>,
    events: EventDispatcher<ListEvent<T>>,
}

impl<T: 'static> Default for List<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            events: EventDispatcher::new(),
        }
    }
}

impl<T: 'static> From<Vec<T>> for List<T> {
    fn from(values: Vec<T>) -> Self {
        Self {
            values,
            events: EventDispatcher::new(),
        }
    }
}

impl<T: 'static> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: 'static> List<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The list's event dispatcher.
    #[must_use]
    #[inline]
    pub fn events(&self) -> &EventDispatcher<ListEvent<T>> {
        &self.events
    }

    /// Number of values.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values, in order.
    #[must_use]
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the value at `index`.
    #[must_use]
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Returns the first value.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }

    /// Returns the last value.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.values.last()
    }

    /// Iterates the values in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.values.iter()
    }

    /// A lazy window over `[start, end)`; `end` is clamped to the length.
    pub fn range(&self, start: usize, end: usize) -> Result<IndexedIterable<'_, T>, CollectionError> {
        IndexedIterable::new(&self.values, 0, self.values.len()).range(start, end)
    }

    /// A lazy window over every value, last to first.
    #[must_use]
    pub fn backwards(&self) -> IndexedIterable<'_, T> {
        IndexedIterable::new(&self.values, self.values.len(), 0)
    }

    fn emit(&self, kind: ListEventKind, build: impl FnOnce() -> ListEvent<T>) {
        if self.events.is_enabled(kind) {
            // `is_enabled` is false once the dispatcher is disposed.
            let _ = self.events.dispatch_immediately(&build());
        }
    }
}

impl<T: Clone + PartialEq + 'static> List<T> {
    /// Returns the position of the first value equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Returns `true` if a value equal to `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    /// Appends `value`.
    pub fn push(&mut self, value: T) {
        let index = self.values.len();
        self.insert_unchecked(index, value);
    }

    /// Appends every value of `values`, in order.
    pub fn push_all(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.push(value);
        }
    }

    /// Prepends `value`.
    pub fn unshift(&mut self, value: T) {
        self.insert_unchecked(0, value);
    }

    /// Removes and returns the last value.
    pub fn pop(&mut self) -> Option<T> {
        let index = self.values.len().checked_sub(1)?;
        Some(self.remove_unchecked(index))
    }

    /// Removes and returns the first value.
    pub fn shift(&mut self) -> Option<T> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.remove_unchecked(0))
    }

    /// Inserts `value` at `index`, which may equal the length.
    pub fn insert_index(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        CollectionError::check_index(index, self.values.len() + 1)?;
        self.insert_unchecked(index, value);
        Ok(())
    }

    /// Overwrites the value at `index` and returns the previous value.
    ///
    /// Writing the value already stored there (per [`Identity`]) changes
    /// nothing and emits nothing.
    pub fn set_index(&mut self, index: usize, value: T) -> Result<T, CollectionError>
    where
        T: Identity,
    {
        CollectionError::check_index(index, self.values.len())?;
        if self.values[index].is_same(&value) {
            return Ok(value);
        }
        let old_value = core::mem::replace(&mut self.values[index], value);
        let new_value = &self.values[index];
        self.emit(ListEventKind::SetIndex, || ListEvent::SetIndex {
            index,
            old_value: old_value.clone(),
            new_value: new_value.clone(),
        });
        self.emit(ListEventKind::Removed, || ListEvent::Removed {
            old_value: old_value.clone(),
        });
        self.emit(ListEventKind::Inserted, || ListEvent::Inserted {
            new_value: new_value.clone(),
        });
        Ok(old_value)
    }

    /// Removes and returns the value at `index`.
    pub fn remove_index(&mut self, index: usize) -> Result<T, CollectionError> {
        CollectionError::check_index(index, self.values.len())?;
        Ok(self.remove_unchecked(index))
    }

    /// Removes every value equal to `value`. Returns `true` if any was found.
    pub fn remove_value(&mut self, value: &T) -> bool {
        let mut removed = false;
        while let Some(index) = self.index_of(value) {
            self.remove_unchecked(index);
            removed = true;
        }
        removed
    }

    /// Moves `value` to `to_index`, or to the end with `None`.
    ///
    /// If an equal value is present it is removed first; `to_index` is
    /// relative to the list after that removal.
    pub fn move_value(&mut self, value: T, to_index: Option<usize>) -> Result<(), CollectionError> {
        let current = self.index_of(&value);
        let len_after_removal = self.values.len() - usize::from(current.is_some());
        let target = to_index.unwrap_or(len_after_removal);
        CollectionError::check_index(target, len_after_removal + 1)?;
        if let Some(current) = current {
            self.remove_unchecked(current);
        }
        self.insert_unchecked(target, value);
        Ok(())
    }

    /// Exchanges the values at `a` and `b`.
    ///
    /// Emits [`ListEvent::SetIndex`] for each position whose value changed.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), CollectionError>
    where
        T: Identity,
    {
        let len = self.values.len();
        CollectionError::check_index(a, len)?;
        CollectionError::check_index(b, len)?;
        if a == b || self.values[a].is_same(&self.values[b]) {
            return Ok(());
        }
        self.values.swap(a, b);
        for (index, old_index) in [(a, b), (b, a)] {
            self.emit(ListEventKind::SetIndex, || ListEvent::SetIndex {
                index,
                old_value: self.values[old_index].clone(),
                new_value: self.values[index].clone(),
            });
        }
        Ok(())
    }

    /// Replaces the whole content.
    ///
    /// Emits one [`ListEvent::SetAll`], then one [`ListEvent::Removed`] per
    /// old value and one [`ListEvent::Inserted`] per new value.
    pub fn set_all(&mut self, values: impl IntoIterator<Item = T>) {
        let old_values = core::mem::replace(&mut self.values, values.into_iter().collect());
        self.emit(ListEventKind::SetAll, || ListEvent::SetAll {
            old_values: old_values.clone(),
            new_values: self.values.clone(),
        });
        if self.events.is_enabled(ListEventKind::Removed) {
            for old_value in &old_values {
                self.emit(ListEventKind::Removed, || ListEvent::Removed {
                    old_value: old_value.clone(),
                });
            }
        }
        if self.events.is_enabled(ListEventKind::Inserted) {
            for new_value in &self.values {
                self.emit(ListEventKind::Inserted, || ListEvent::Inserted {
                    new_value: new_value.clone(),
                });
            }
        }
    }

    /// Removes every value, as `set_all` with nothing.
    pub fn clear(&mut self) {
        self.set_all(core::iter::empty());
    }

    /// Sorts in place with an unstable partition-based sort.
    ///
    /// Emits [`ListEvent::SetIndex`] for every position whose value changed.
    pub fn sort(&mut self, compare: impl FnMut(&T, &T) -> Ordering)
    where
        T: Identity,
    {
        let before = self
            .events
            .is_enabled(ListEventKind::SetIndex)
            .then(|| self.values.clone());
        self.values.sort_unstable_by(compare);
        let Some(before) = before else {
            return;
        };
        for (index, old_value) in before.into_iter().enumerate() {
            let new_value = &self.values[index];
            if !old_value.is_same(new_value) {
                self.emit(ListEventKind::SetIndex, || ListEvent::SetIndex {
                    index,
                    old_value,
                    new_value: new_value.clone(),
                });
            }
        }
    }

    /// Replaces the content with a copy of `source`'s values.
    pub fn copy_from(&mut self, source: &Self) {
        self.set_all(source.values.iter().cloned());
    }

    fn insert_unchecked(&mut self, index: usize, value: T) {
        self.values.insert(index, value);
        let new_value = &self.values[index];
        self.emit(ListEventKind::InsertIndex, || ListEvent::InsertIndex {
            index,
            new_value: new_value.clone(),
        });
        self.emit(ListEventKind::Inserted, || ListEvent::Inserted {
            new_value: new_value.clone(),
        });
    }

    fn remove_unchecked(&mut self, index: usize) -> T {
        let old_value = self.values.remove(index);
        self.emit(ListEventKind::RemoveIndex, || ListEvent::RemoveIndex {
            index,
            old_value: old_value.clone(),
        });
        self.emit(ListEventKind::Removed, || ListEvent::Removed {
            old_value: old_value.clone(),
        });
        old_value
    }
}

impl<'a, T: 'static> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("values", &self.values)
            .field("events", &self.events)
            .finish()
    }
}
