// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-wide adapter callbacks.

use alloc::rc::Rc;
use core::any::{Any, TypeId};
use core::cell::RefCell;
use core::cmp::Ordering;
use core::fmt;

use plotline_collections::SortedList;
use plotline_collections::order;
use smallvec::SmallVec;

use crate::key::{AdapterFn, AdapterKey};

/// An object that adapters can be applied to.
///
/// Class-wide callbacks are registered against a type. An object belongs to
/// that type when it can present itself as one: the type itself, or a part it
/// is composed of.
///
/// ```
/// use core::any::{Any, TypeId};
/// use plotline_adapter::AdapterTarget;
///
/// struct Sprite;
/// struct Bullet {
///     sprite: Sprite,
/// }
///
/// impl AdapterTarget for Sprite {}
///
/// impl AdapterTarget for Bullet {
///     fn as_instance_of(&self, class: TypeId) -> Option<&dyn Any> {
///         if class == TypeId::of::<Sprite>() {
///             Some(&self.sprite)
///         } else {
///             (class == TypeId::of::<Self>()).then_some(self as &dyn Any)
///         }
///     }
/// }
///
/// let bullet = Bullet { sprite: Sprite };
/// assert!(bullet.is_instance_of(TypeId::of::<Sprite>()));
/// assert!(!Sprite.is_instance_of(TypeId::of::<Bullet>()));
/// ```
pub trait AdapterTarget: Any {
    /// Returns `self` viewed as an instance of `class`, if it is one.
    ///
    /// The returned value must be of the type `class` identifies.
    fn as_instance_of(&self, class: TypeId) -> Option<&dyn Any>
    where
        Self: Sized,
    {
        (class == TypeId::of::<Self>()).then_some(self as &dyn Any)
    }

    /// Returns `true` if `self` is an instance of `class`.
    fn is_instance_of(&self, class: TypeId) -> bool
    where
        Self: Sized,
    {
        self.as_instance_of(class).is_some()
    }
}

/// A registered callback, type-erased.
///
/// `callback` holds an `AdapterFn<Target, T>` for instance adapters and a
/// [`ClassFn<T>`] for class-wide ones.
pub(crate) struct Entry {
    pub(crate) key: &'static str,
    pub(crate) class: TypeId,
    pub(crate) priority: i32,
    pub(crate) seq: u64,
    pub(crate) callback: Rc<dyn Any>,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("priority", &self.priority)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

/// Lower priorities first, then registration order.
pub(crate) fn by_priority(a: &Rc<Entry>, b: &Rc<Entry>) -> Ordering {
    order::or(a.priority.cmp(&b.priority), a.seq.cmp(&b.seq))
}

pub(crate) fn entry_list() -> SortedList<Rc<Entry>> {
    SortedList::new(by_priority)
}

/// A class-wide callback with the class erased from its signature.
type ClassFn<T> = Rc<dyn Fn(T, &dyn Any, AdapterKey<T>) -> T>;

struct GlobalState {
    callbacks: SortedList<Rc<Entry>>,
    next_seq: u64,
}

/// Callbacks that apply to every instance of a type.
///
/// A `GlobalAdapter` is a cheap, cloneable handle; every clone sees the same
/// registrations. Hand one to each [`Adapter`](crate::Adapter) that should
/// honor it. Class-wide callbacks run after the instance's own.
#[derive(Clone)]
pub struct GlobalAdapter {
    shared: Rc<RefCell<GlobalState>>,
}

impl Default for GlobalAdapter {
    fn default() -> Self {
        Self {
            shared: Rc::new(RefCell::new(GlobalState {
                callbacks: entry_list(),
                next_seq: 0,
            })),
        }
    }
}

impl GlobalAdapter {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `key` on every instance of `Class`.
    pub fn add_all<Class: Any, T: 'static>(
        &self,
        key: AdapterKey<T>,
        callback: AdapterFn<Class, T>,
        priority: i32,
    ) {
        let erased: ClassFn<T> = Rc::new(move |value: T, instance: &dyn Any, key: AdapterKey<T>| {
            match instance.downcast_ref::<Class>() {
                Some(instance) => callback.call(value, instance, key),
                None => value,
            }
        });
        let mut state = self.shared.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.callbacks.insert(Rc::new(Entry {
            key: key.name(),
            class: TypeId::of::<Class>(),
            priority,
            seq,
            callback: Rc::new(erased),
        }));
    }

    /// Removes every callback for `key` registered against `Class`.
    ///
    /// Returns the number of callbacks removed.
    pub fn remove_all<Class: Any, T>(&self, key: AdapterKey<T>) -> usize {
        let class = TypeId::of::<Class>();
        let mut state = self.shared.borrow_mut();
        let doomed: SmallVec<[Rc<Entry>; 4]> = state
            .callbacks
            .iter()
            .filter(|e| e.key == key.name() && e.class == class)
            .cloned()
            .collect();
        for entry in &doomed {
            state.callbacks.remove(entry);
        }
        doomed.len()
    }

    /// Folds `value` through every callback for `key` whose class `target`
    /// is an instance of.
    pub fn apply_all<Target: AdapterTarget, T: 'static>(
        &self,
        target: &Target,
        key: AdapterKey<T>,
        value: T,
    ) -> T {
        // Snapshot first: callbacks may register more callbacks.
        let matching: SmallVec<[Rc<Entry>; 4]> = self
            .shared
            .borrow()
            .callbacks
            .iter()
            .filter(|e| e.key == key.name())
            .cloned()
            .collect();
        matching.iter().fold(value, |value, entry| {
            let Some(instance) = target.as_instance_of(entry.class) else {
                return value;
            };
            match entry.callback.downcast_ref::<ClassFn<T>>() {
                Some(callback) => callback(value, instance, key),
                None => value,
            }
        })
    }

    /// Returns `true` if a callback for `key` applies to `target`.
    #[must_use]
    pub fn is_enabled<Target: AdapterTarget, T>(&self, target: &Target, key: AdapterKey<T>) -> bool {
        self.shared
            .borrow()
            .callbacks
            .iter()
            .any(|e| e.key == key.name() && target.is_instance_of(e.class))
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.borrow().callbacks.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every callback.
    pub fn clear(&self) {
        self.shared.borrow_mut().callbacks.clear();
    }

    /// Returns `true` if both handles share one registry.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for GlobalAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shared.try_borrow() {
            Ok(state) => f
                .debug_struct("GlobalAdapter")
                .field("callbacks", &state.callbacks.values())
                .finish(),
            Err(_) => f.debug_struct("GlobalAdapter").finish_non_exhaustive(),
        }
    }
}
