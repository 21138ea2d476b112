// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance adapter chains.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;

use plotline_collections::SortedList;
use plotline_events::TypeGate;
use smallvec::SmallVec;

use crate::global::{AdapterTarget, Entry, GlobalAdapter, entry_list};
use crate::key::{AdapterFn, AdapterKey};

/// An ordered chain of value transformations owned by one object.
///
/// Callbacks are grouped by key and run from the lowest priority to the
/// highest; callbacks with equal priority run in registration order. Each
/// one receives the previous one's output. After the instance callbacks, the
/// attached [`GlobalAdapter`] (if any) gets its turn.
///
/// ```
/// use plotline_adapter::{Adapter, AdapterFn, AdapterKey, AdapterTarget};
///
/// struct Label;
/// impl AdapterTarget for Label {}
///
/// const TEXT: AdapterKey<String> = AdapterKey::new("text");
///
/// let mut adapter = Adapter::<Label>::new();
/// adapter.add(TEXT, AdapterFn::new(|v: String, _, _| v.to_uppercase()), 10);
/// adapter.add(TEXT, AdapterFn::new(|v: String, _, _| v + "!"), 0);
///
/// assert_eq!(adapter.apply(&Label, TEXT, "hi".into()), "HI!");
/// ```
pub struct Adapter<Target> {
    callbacks: SortedList<Rc<Entry>>,
    gate: RefCell<TypeGate<&'static str>>,
    next_seq: u64,
    global: Option<GlobalAdapter>,
    _target: PhantomData<fn(&Target)>,
}

impl<Target: 'static> Default for Adapter<Target> {
    fn default() -> Self {
        Self {
            callbacks: entry_list(),
            gate: RefCell::new(TypeGate::new()),
            next_seq: 0,
            global: None,
            _target: PhantomData,
        }
    }
}

impl<Target: 'static> Adapter<Target> {
    /// Creates an adapter with no callbacks and no class-wide registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter that also honors `global`.
    #[must_use]
    pub fn with_global(global: GlobalAdapter) -> Self {
        Self {
            global: Some(global),
            ..Self::default()
        }
    }

    /// The attached class-wide registry.
    #[must_use]
    pub fn global(&self) -> Option<&GlobalAdapter> {
        self.global.as_ref()
    }

    /// Attaches or detaches a class-wide registry.
    pub fn set_global(&mut self, global: Option<GlobalAdapter>) {
        self.global = global;
    }

    /// Registers `callback` for `key`.
    ///
    /// The same callback may be registered more than once; it then runs once
    /// per registration.
    pub fn add<T: 'static>(&mut self, key: AdapterKey<T>, callback: AdapterFn<Target, T>, priority: i32) {
        self.insert(key.name(), priority, Rc::new(callback));
    }

    fn insert(&mut self, key: &'static str, priority: i32, callback: Rc<dyn core::any::Any>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.callbacks.insert(Rc::new(Entry {
            key,
            class: TypeId::of::<Target>(),
            priority,
            seq,
            callback,
        }));
    }

    /// Returns `true` if `callback` is registered for `key` at `priority`.
    #[must_use]
    pub fn has<T: 'static>(&self, key: AdapterKey<T>, callback: &AdapterFn<Target, T>, priority: i32) -> bool {
        self.callbacks.iter().any(|e| {
            e.key == key.name()
                && e.priority == priority
                && e.callback
                    .downcast_ref::<AdapterFn<Target, T>>()
                    .is_some_and(|f| f.ptr_eq(callback))
        })
    }

    /// Removes the callbacks for `key`, or only those at `priority` when one
    /// is given.
    ///
    /// Returns the number of callbacks removed.
    pub fn remove<T>(&mut self, key: AdapterKey<T>, priority: Option<i32>) -> usize {
        let doomed: SmallVec<[Rc<Entry>; 4]> = self
            .callbacks
            .iter()
            .filter(|e| e.key == key.name() && priority.is_none_or(|p| e.priority == p))
            .cloned()
            .collect();
        for entry in &doomed {
            self.callbacks.remove(entry);
        }
        doomed.len()
    }

    /// The keys that have instance callbacks, in the order they first run.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = Vec::new();
        for entry in self.callbacks.iter() {
            if !keys.contains(&entry.key) {
                keys.push(entry.key);
            }
        }
        keys
    }

    /// Number of instance callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns `true` if there are no instance callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Removes every instance callback. Disabled keys stay disabled.
    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    /// Registers each of `source`'s callbacks on `self`, keeping their
    /// priorities and relative order, and copies its disabled keys.
    pub fn copy_from(&mut self, source: &Self) {
        for entry in source.callbacks.iter() {
            self.insert(entry.key, entry.priority, entry.callback.clone());
        }
        self.gate.borrow_mut().extend_from(&source.gate.borrow());
    }

    /// Reopens `key`.
    pub fn enable_key<T>(&mut self, key: AdapterKey<T>) {
        self.gate.get_mut().enable(&key.name());
    }

    /// Makes [`apply`](Self::apply) return values for `key` unchanged until
    /// the key is reopened.
    pub fn disable_key<T>(&mut self, key: AdapterKey<T>) {
        self.gate.get_mut().disable(key.name());
    }

    /// Makes the next `times` calls to [`apply`](Self::apply) for `key`
    /// return their value unchanged.
    pub fn disable_key_for<T>(&mut self, key: AdapterKey<T>, times: usize) {
        self.gate.get_mut().disable_for(key.name(), times);
    }

    /// Returns `true` if `key` is disabled.
    #[must_use]
    pub fn is_key_disabled<T>(&self, key: AdapterKey<T>) -> bool {
        self.gate.borrow().is_disabled(&key.name())
    }
}

impl<Target: AdapterTarget> Adapter<Target> {
    /// Runs `value` through every callback for `key`, instance callbacks
    /// first, then class-wide ones.
    pub fn apply<T: 'static>(&self, target: &Target, key: AdapterKey<T>, value: T) -> T {
        let admitted = self.gate.borrow_mut().admit(&key.name());
        if !admitted {
            #[cfg(feature = "tracing")]
            tracing::trace!(key = key.name(), "adapter key disabled, value passed through");
            return value;
        }
        let value = self
            .callbacks
            .iter()
            .filter(|e| e.key == key.name())
            .fold(value, |value, entry| {
                match entry.callback.downcast_ref::<AdapterFn<Target, T>>() {
                    Some(callback) => callback.call(value, target, key),
                    None => value,
                }
            });
        match &self.global {
            Some(global) => global.apply_all(target, key, value),
            None => value,
        }
    }

    /// Returns `true` if [`apply`](Self::apply) for `key` would run any
    /// callback. Does not use up a disabled attempt.
    #[must_use]
    pub fn is_enabled<T>(&self, target: &Target, key: AdapterKey<T>) -> bool {
        if self.is_key_disabled(key) {
            return false;
        }
        self.callbacks.iter().any(|e| e.key == key.name())
            || self
                .global
                .as_ref()
                .is_some_and(|global| global.is_enabled(target, key))
    }
}

impl<Target> fmt::Debug for Adapter<Target> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("callbacks", &self.callbacks.values())
            .field("gate", &self.gate)
            .field("global", &self.global.is_some())
            .finish_non_exhaustive()
    }
}
