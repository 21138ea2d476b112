// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable key-unique map.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use plotline_events::{Event, EventDispatcher};

use crate::error::CollectionError;
use crate::identity::Identity;

/// Change notifications emitted by a [`Dictionary`].
#[derive(Clone, Debug, PartialEq)]
pub enum DictionaryEvent<K, V> {
    /// A new key was added.
    InsertKey {
        /// The new key.
        key: K,
        /// Its value.
        new_value: V,
    },
    /// An existing key got a different value.
    SetKey {
        /// The key.
        key: K,
        /// Value before the write.
        old_value: V,
        /// Value after the write.
        new_value: V,
    },
    /// A key was removed.
    RemoveKey {
        /// The key.
        key: K,
        /// Its last value.
        old_value: V,
    },
    /// A value left the dictionary, by overwrite, removal or clearing.
    Removed {
        /// The value that left.
        old_value: V,
    },
    /// Every key was removed.
    Cleared,
}

/// Channels of [`DictionaryEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DictionaryEventKind {
    /// [`DictionaryEvent::InsertKey`].
    InsertKey,
    /// [`DictionaryEvent::SetKey`].
    SetKey,
    /// [`DictionaryEvent::RemoveKey`].
    RemoveKey,
    /// [`DictionaryEvent::Removed`].
    Removed,
    /// [`DictionaryEvent::Cleared`].
    Cleared,
}

impl<K: 'static, V: 'static> Event for DictionaryEvent<K, V> {
    type Kind = DictionaryEventKind;

    fn kind(&self) -> DictionaryEventKind {
        match self {
            Self::InsertKey { .. } => DictionaryEventKind::InsertKey,
            Self::SetKey { .. } => DictionaryEventKind::SetKey,
            Self::RemoveKey { .. } => DictionaryEventKind::RemoveKey,
            Self::Removed { .. } => DictionaryEventKind::Removed,
            Self::Cleared => DictionaryEventKind::Cleared,
        }
    }
}

/// A map that reports insertions, overwrites and removals.
///
/// Iteration order is unspecified; use [`sorted_iter`](Self::sorted_iter)
/// when order matters. Writing the value a key already holds is a silent
/// no-op; [`Identity`] decides what counts as the same value, so a different
/// `Rc` with equal contents still replaces the stored one.
///
/// # Example
///
/// ```
/// use plotline_collections::Dictionary;
///
/// let mut dict = Dictionary::new();
/// dict.insert_key("a", 1).unwrap();
/// assert!(dict.insert_key("a", 2).is_err());
/// assert_eq!(dict.get_key(&"a"), Some(&1));
///
/// // Get-or-create.
/// assert_eq!(*dict.insert_key_if_empty("b", || 10), 10);
/// assert_eq!(*dict.insert_key_if_empty("b", || 20), 10);
/// ```
pub struct Dictionary<K: 'static, V: 'static> {
    map: HashMap<K, V>,
    events: EventDispatcher<DictionaryEvent<K, V>>,
}

impl<K: 'static, V: 'static> Default for Dictionary<K, V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            events: EventDispatcher::new(),
        }
    }
}

impl<K: 'static, V: 'static> Dictionary<K, V> {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The dictionary's event dispatcher.
    #[must_use]
    #[inline]
    pub fn events(&self) -> &EventDispatcher<DictionaryEvent<K, V>> {
        &self.events
    }

    /// Number of keys.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if there are no keys.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.map.iter()
    }

    /// Iterates the keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    /// Returns the pairs sorted by `compare`.
    pub fn sorted_iter(
        &self,
        mut compare: impl FnMut((&K, &V), (&K, &V)) -> Ordering,
    ) -> impl Iterator<Item = (&K, &V)> + '_ {
        let mut pairs: Vec<(&K, &V)> = self.map.iter().collect();
        pairs.sort_by(|a, b| compare(*a, *b));
        pairs.into_iter()
    }

    fn emit(&self, kind: DictionaryEventKind, build: impl FnOnce() -> DictionaryEvent<K, V>) {
        if self.events.is_enabled(kind) {
            // `is_enabled` is false once the dispatcher is disposed.
            let _ = self.events.dispatch_immediately(&build());
        }
    }
}

impl<K, V> Dictionary<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + Identity + 'static,
{
    /// Returns the value for `key`.
    #[must_use]
    pub fn get_key(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn has_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Adds a new key. Fails if the key is already present.
    pub fn insert_key(&mut self, key: K, value: V) -> Result<(), CollectionError> {
        match self.map.entry(key) {
            Entry::Occupied(_) => Err(CollectionError::KeyExists),
            Entry::Vacant(entry) => {
                let entry = entry.insert_entry(value);
                Self::emit_insert(&self.events, entry.key(), entry.get());
                Ok(())
            }
        }
    }

    /// Sets `key` to `value`, adding the key if it is new.
    ///
    /// Overwriting emits [`DictionaryEvent::SetKey`] then
    /// [`DictionaryEvent::Removed`] for the old value. Writing the value the
    /// key already holds (per [`Identity`]) does nothing.
    pub fn set_key(&mut self, key: K, value: V) {
        match self.map.entry(key) {
            Entry::Occupied(mut entry) => {
                if entry.get().is_same(&value) {
                    return;
                }
                let old_value = entry.insert(value);
                Self::emit_overwrite(&self.events, entry.key(), old_value, entry.get());
            }
            Entry::Vacant(entry) => {
                let entry = entry.insert_entry(value);
                Self::emit_insert(&self.events, entry.key(), entry.get());
            }
        }
    }

    /// Replaces the value of an existing key with `update(old)`.
    ///
    /// Fails if `key` is absent. Emits the same events as
    /// [`set_key`](Self::set_key) when the value actually changes.
    pub fn update_key(&mut self, key: &K, update: impl FnOnce(&V) -> V) -> Result<(), CollectionError> {
        let Some(slot) = self.map.get_mut(key) else {
            return Err(CollectionError::KeyMissing);
        };
        let value = update(slot);
        if slot.is_same(&value) {
            return Ok(());
        }
        let old_value = core::mem::replace(slot, value);
        Self::emit_overwrite(&self.events, key, old_value, slot);
        Ok(())
    }

    /// Returns the value for `key`, creating it with `supplier` if absent.
    ///
    /// Emits [`DictionaryEvent::InsertKey`] only when a value is created.
    pub fn insert_key_if_empty(&mut self, key: K, supplier: impl FnOnce() -> V) -> &V {
        match self.map.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let entry = entry.insert_entry(supplier());
                Self::emit_insert(&self.events, entry.key(), entry.get());
                entry.into_mut()
            }
        }
    }

    /// Removes `key` and returns its value.
    pub fn remove_key(&mut self, key: &K) -> Option<V> {
        let old_value = self.map.remove(key)?;
        self.emit(DictionaryEventKind::RemoveKey, || DictionaryEvent::RemoveKey {
            key: key.clone(),
            old_value: old_value.clone(),
        });
        self.emit(DictionaryEventKind::Removed, || DictionaryEvent::Removed {
            old_value: old_value.clone(),
        });
        Some(old_value)
    }

    /// Removes every key.
    ///
    /// Emits [`DictionaryEvent::Cleared`], then [`DictionaryEvent::Removed`]
    /// for each value.
    pub fn clear(&mut self) {
        let old: Vec<V> = self.map.drain().map(|(_, v)| v).collect();
        self.emit(DictionaryEventKind::Cleared, || DictionaryEvent::Cleared);
        for old_value in old {
            self.emit(DictionaryEventKind::Removed, || DictionaryEvent::Removed { old_value });
        }
    }

    /// Sets every key of `source` on `self`, as [`set_key`](Self::set_key).
    ///
    /// Keys absent from `source` are kept.
    pub fn set_all(&mut self, source: &Self) {
        for (key, value) in &source.map {
            self.set_key(key.clone(), value.clone());
        }
    }

    /// Copies every key of `source` into `self`.
    pub fn copy_from(&mut self, source: &Self) {
        self.set_all(source);
    }

    fn emit_insert(events: &EventDispatcher<DictionaryEvent<K, V>>, key: &K, new_value: &V) {
        if events.is_enabled(DictionaryEventKind::InsertKey) {
            let _ = events.dispatch_immediately(&DictionaryEvent::InsertKey {
                key: key.clone(),
                new_value: new_value.clone(),
            });
        }
    }

    fn emit_overwrite(
        events: &EventDispatcher<DictionaryEvent<K, V>>,
        key: &K,
        old_value: V,
        new_value: &V,
    ) {
        if events.is_enabled(DictionaryEventKind::SetKey) {
            let _ = events.dispatch_immediately(&DictionaryEvent::SetKey {
                key: key.clone(),
                old_value: old_value.clone(),
                new_value: new_value.clone(),
            });
        }
        if events.is_enabled(DictionaryEventKind::Removed) {
            let _ = events.dispatch_immediately(&DictionaryEvent::Removed { old_value });
        }
    }
}

impl<K: fmt::Debug + 'static, V: fmt::Debug + 'static> fmt::Debug for Dictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("map", &self.map)
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use plotline_events::Handler;

    type Log = Rc<RefCell<Vec<DictionaryEvent<&'static str, i32>>>>;

    fn observed() -> (Dictionary<&'static str, i32>, Log) {
        let dict = Dictionary::new();
        let log: Log = Rc::default();
        {
            let log = log.clone();
            dict.events()
                .on_all(
                    Handler::new(move |e: &DictionaryEvent<&'static str, i32>| {
                        log.borrow_mut().push(e.clone());
                    }),
                    None,
                )
                .unwrap();
        }
        (dict, log)
    }

    #[test]
    fn overwrite_emits_set_key_then_removed() {
        let (mut dict, log) = observed();
        dict.set_key("k", 1);
        dict.set_key("k", 2);
        assert_eq!(
            *log.borrow(),
            vec![
                DictionaryEvent::InsertKey {
                    key: "k",
                    new_value: 1
                },
                DictionaryEvent::SetKey {
                    key: "k",
                    old_value: 1,
                    new_value: 2
                },
                DictionaryEvent::Removed { old_value: 1 },
            ]
        );
    }

    #[test]
    fn update_key_requires_presence() {
        let (mut dict, log) = observed();
        assert_eq!(
            dict.update_key(&"x", |v| v + 1),
            Err(CollectionError::KeyMissing)
        );
        dict.insert_key("x", 1).unwrap();
        dict.update_key(&"x", |v| *v).unwrap();
        assert_eq!(log.borrow().len(), 1);
        dict.update_key(&"x", |v| v * 10).unwrap();
        assert_eq!(dict.get_key(&"x"), Some(&10));
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn remove_and_clear() {
        let (mut dict, log) = observed();
        dict.insert_key("a", 1).unwrap();
        dict.insert_key("b", 2).unwrap();
        assert_eq!(dict.remove_key(&"a"), Some(1));
        assert_eq!(dict.remove_key(&"a"), None);
        dict.clear();
        assert!(dict.is_empty());
        let kinds: Vec<_> = log.borrow().iter().map(Event::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DictionaryEventKind::InsertKey,
                DictionaryEventKind::InsertKey,
                DictionaryEventKind::RemoveKey,
                DictionaryEventKind::Removed,
                DictionaryEventKind::Cleared,
                DictionaryEventKind::Removed,
            ]
        );
    }

    #[test]
    fn get_or_create_only_creates_once() {
        let (mut dict, log) = observed();
        let mut calls = 0;
        for _ in 0..3 {
            dict.insert_key_if_empty("lazy", || {
                calls += 1;
                5
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn sorted_iteration_and_copy() {
        let mut source = Dictionary::new();
        for (k, v) in [("c", 3), ("a", 1), ("b", 2)] {
            source.set_key(k, v);
        }
        let mut target = Dictionary::new();
        target.set_key("z", 26);
        target.copy_from(&source);
        let keys: Vec<_> = target
            .sorted_iter(|a, b| a.0.cmp(b.0))
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(keys, vec!["a", "b", "c", "z"]);
        assert_eq!(target.len(), 4);
        assert!(target.has_key(&"c"));
    }
}
