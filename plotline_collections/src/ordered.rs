// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion-ordered and comparator-ordered lists.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::slice;

use plotline_events::{Event, EventDispatcher};

use crate::error::CollectionError;
use crate::iterable::IndexedIterable;
use crate::order::sorted_index;

/// Membership notifications emitted by [`OrderedList`] and [`SortedList`].
#[derive(Clone, Debug, PartialEq)]
pub enum OrderedListEvent<T> {
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
}

/// Channels of [`OrderedListEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderedListEventKind {
    /// [`OrderedListEvent::Inserted`].
    Inserted,
    /// [`OrderedListEvent::Removed`].
    Removed,
}

impl<T: 'static> Event for OrderedListEvent<T> {
    type Kind = OrderedListEventKind;

    fn kind(&self) -> OrderedListEventKind {
        match self {
            Self::Inserted { .. } => OrderedListEventKind::Inserted,
            Self::Removed { .. } => OrderedListEventKind::Removed,
        }
    }
}

/// A list whose order is decided by the list, not by the caller.
///
/// The base ordering is insertion order. [`SortedList`] keeps the same
/// surface but orders by a comparator.
pub struct OrderedList<T: 'static> {
    values: Vec<T>,
    events: EventDispatcher<OrderedListEvent<T>>,
}

impl<T: 'static> Default for OrderedList<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            events: EventDispatcher::new(),
        }
    }
}

impl<T: 'static> OrderedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The list's event dispatcher.
    #[must_use]
    #[inline]
    pub fn events(&self) -> &EventDispatcher<OrderedListEvent<T>> {
        &self.events
    }

    /// The values, in order.
    #[must_use]
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
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

    /// Returns `true` if `index` is in bounds.
    #[must_use]
    pub fn has_index(&self, index: usize) -> bool {
        index < self.values.len()
    }

    /// Returns the value at `index`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// The first value.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }

    /// The last value.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.values.last()
    }

    /// Iterates the values in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.values.iter()
    }

    /// A lazy window over `[start, end)`; see [`List::range`](crate::List::range).
    pub fn range(&self, start: usize, end: usize) -> Result<IndexedIterable<'_, T>, CollectionError> {
        IndexedIterable::new(&self.values, 0, self.values.len()).range(start, end)
    }

    /// A lazy window over every value, last to first.
    #[must_use]
    pub fn backwards(&self) -> IndexedIterable<'_, T> {
        IndexedIterable::new(&self.values, self.values.len(), 0)
    }
}

impl<T: Clone + PartialEq + 'static> OrderedList<T> {
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
    pub fn insert(&mut self, value: T) {
        let index = self.values.len();
        self.insert_at(index, value);
    }

    /// Removes the first value equal to `value`. Returns `true` if found.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.index_of(value) {
            Some(index) => {
                self.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the content, emitting a removal per old value then an
    /// insertion per new value.
    pub fn set_all(&mut self, values: impl IntoIterator<Item = T>) {
        let old_values = core::mem::take(&mut self.values);
        self.emit_removed_all(&old_values);
        for value in values {
            self.insert(value);
        }
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        let old_values = core::mem::take(&mut self.values);
        self.emit_removed_all(&old_values);
    }

    fn insert_at(&mut self, index: usize, value: T) {
        self.values.insert(index, value);
        if self.events.is_enabled(OrderedListEventKind::Inserted) {
            let _ = self.events.dispatch_immediately(&OrderedListEvent::Inserted {
                new_value: self.values[index].clone(),
            });
        }
    }

    fn remove_at(&mut self, index: usize) -> T {
        let old_value = self.values.remove(index);
        if self.events.is_enabled(OrderedListEventKind::Removed) {
            let _ = self.events.dispatch_immediately(&OrderedListEvent::Removed {
                old_value: old_value.clone(),
            });
        }
        old_value
    }

    fn emit_removed_all(&self, old_values: &[T]) {
        if !self.events.is_enabled(OrderedListEventKind::Removed) {
            return;
        }
        for old_value in old_values {
            let _ = self.events.dispatch_immediately(&OrderedListEvent::Removed {
                old_value: old_value.clone(),
            });
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedList")
            .field("values", &self.values)
            .field("events", &self.events)
            .finish()
    }
}

/// Shared comparator of a [`SortedList`].
pub type Comparator<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// An [`OrderedList`] kept sorted by a comparator.
///
/// The comparator must be a consistent total order for as long as the values
/// are in the list. If a value's sort key changes, call
/// [`update`](Self::update) to move it.
///
/// Read access goes through `Deref<Target = OrderedList<T>>`.
///
/// # Example
///
/// ```
/// use plotline_collections::SortedList;
///
/// let mut list = SortedList::new(|a: &i32, b: &i32| a.cmp(b));
/// for v in [5, 1, 4, 1] {
///     list.insert(v);
/// }
/// assert_eq!(list.values(), [1, 1, 4, 5]);
/// assert_eq!(list.index_of(&4), Some(2));
/// assert_eq!(list.index_of(&3), None);
/// ```
pub struct SortedList<T: 'static> {
    list: OrderedList<T>,
    compare: Comparator<T>,
}

impl<T: 'static> SortedList<T> {
    /// Creates an empty list ordered by `compare`.
    #[must_use]
    pub fn new(compare: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        Self::with_comparator(Rc::new(compare))
    }

    /// Creates an empty list with a shared comparator.
    #[must_use]
    pub fn with_comparator(compare: Comparator<T>) -> Self {
        Self {
            list: OrderedList::new(),
            compare,
        }
    }

    /// The comparator.
    #[must_use]
    pub fn comparator(&self) -> &Comparator<T> {
        &self.compare
    }
}

impl<T: Clone + PartialEq + 'static> SortedList<T> {
    /// Inserts `value` after every value that compares equal to it.
    pub fn insert(&mut self, value: T) {
        let index = sorted_index(&self.list.values, |x| (self.compare)(x, &value)).insertion_point();
        self.list.insert_at(index, value);
    }

    /// Returns the position of `value`, found by binary search.
    ///
    /// Among values that compare equal, the first one that is also `==` to
    /// `value` is returned.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        let values = &self.list.values;
        let start = values.partition_point(|x| (self.compare)(x, value) == Ordering::Less);
        values[start..]
            .iter()
            .take_while(|x| (self.compare)(*x, value) == Ordering::Equal)
            .position(|x| x == value)
            .map(|offset| start + offset)
    }

    /// Returns `true` if `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Removes `value`. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.index_of(value) {
            Some(index) => {
                self.list.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Re-homes `value` after its sort key changed.
    ///
    /// The value is located by equality, not by search, since its position
    /// may be stale. It only moves when it is out of order with one of its
    /// immediate neighbours. Returns `true` if it moved.
    pub fn update(&mut self, value: &T) -> bool {
        let Some(index) = self.list.index_of(value) else {
            return false;
        };
        let values = &self.list.values;
        let after_prev = index == 0
            || (self.compare)(&values[index - 1], &values[index]) != Ordering::Greater;
        let before_next = index + 1 == values.len()
            || (self.compare)(&values[index], &values[index + 1]) != Ordering::Greater;
        if after_prev && before_next {
            return false;
        }
        let value = self.list.remove_at(index);
        self.insert(value);
        true
    }

    /// Replaces the content, sorting the new values.
    pub fn set_all(&mut self, values: impl IntoIterator<Item = T>) {
        self.list.clear();
        for value in values {
            self.insert(value);
        }
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}

impl<T: 'static> core::ops::Deref for SortedList<T> {
    type Target = OrderedList<T>;

    fn deref(&self) -> &OrderedList<T> {
        &self.list
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for SortedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedList")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use plotline_events::Handler;

    #[test]
    fn ordered_list_keeps_insertion_order() {
        let mut list = OrderedList::new();
        list.insert(3);
        list.insert(1);
        list.insert(2);
        assert_eq!(list.values(), [3, 1, 2]);
        assert!(list.remove(&1));
        assert!(!list.remove(&1));
        assert_eq!(list.first(), Some(&3));
        assert_eq!(list.last(), Some(&2));
        assert!(list.has_index(1));
        assert!(!list.has_index(2));
    }

    #[test]
    fn set_all_reports_removals_then_insertions() {
        let mut list = OrderedList::new();
        list.set_all([1, 2]);
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = log.clone();
            list.events()
                .on_all(
                    Handler::new(move |e: &OrderedListEvent<i32>| log.borrow_mut().push(e.clone())),
                    None,
                )
                .unwrap();
        }
        list.set_all([9]);
        assert_eq!(
            *log.borrow(),
            vec![
                OrderedListEvent::Removed { old_value: 1 },
                OrderedListEvent::Removed { old_value: 2 },
                OrderedListEvent::Inserted { new_value: 9 },
            ]
        );
    }

    #[derive(Clone, Debug)]
    struct Item {
        id: u32,
        key: Rc<Cell<i32>>,
    }

    impl PartialEq for Item {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    fn item(id: u32, key: i32) -> Item {
        Item {
            id,
            key: Rc::new(Cell::new(key)),
        }
    }

    #[test]
    fn index_of_distinguishes_equal_keys() {
        let mut list = SortedList::new(|a: &Item, b: &Item| a.key.get().cmp(&b.key.get()));
        let a = item(1, 5);
        let b = item(2, 5);
        list.insert(a.clone());
        list.insert(b.clone());
        assert_eq!(list.index_of(&a), Some(0));
        assert_eq!(list.index_of(&b), Some(1));
        assert_eq!(list.index_of(&item(3, 5)), None);
    }

    #[test]
    fn update_moves_only_when_out_of_order() {
        let mut list = SortedList::new(|a: &Item, b: &Item| a.key.get().cmp(&b.key.get()));
        let items = [item(1, 10), item(2, 20), item(3, 30)];
        for it in &items {
            list.insert(it.clone());
        }

        items[1].key.set(25);
        assert!(!list.update(&items[1]));

        items[0].key.set(40);
        assert!(list.update(&items[0]));
        let ids: Vec<u32> = list.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(!list.update(&item(9, 0)));
    }
}
