// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-type enable/disable table with countdown support.

use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Gate {
    Forever,
    Remaining(usize),
}

/// Tracks which channels are switched off, and for how long.
///
/// A channel is either open, closed until reopened, or closed for a fixed
/// number of attempts. Each call to [`admit`](Self::admit) on a counted
/// channel uses up one attempt; the attempt that brings the count to zero is
/// still refused and reopens the channel for the next one.
///
/// ```
/// use plotline_events::TypeGate;
///
/// let mut gate = TypeGate::new();
/// gate.disable_for("resize", 2);
/// assert!(!gate.admit(&"resize"));
/// assert!(!gate.admit(&"resize"));
/// assert!(gate.admit(&"resize"));
/// ```
#[derive(Clone)]
pub struct TypeGate<K> {
    disabled: HashMap<K, Gate>,
}

impl<K> Default for TypeGate<K> {
    fn default() -> Self {
        Self {
            disabled: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> TypeGate<K> {
    /// Creates a gate with every channel open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reopens `key`.
    pub fn enable(&mut self, key: &K) {
        self.disabled.remove(key);
    }

    /// Closes `key` until it is reopened.
    pub fn disable(&mut self, key: K) {
        self.disabled.insert(key, Gate::Forever);
    }

    /// Closes `key` for the next `attempts` attempts.
    ///
    /// Zero attempts reopens the channel.
    pub fn disable_for(&mut self, key: K, attempts: usize) {
        if attempts == 0 {
            self.disabled.remove(&key);
        } else {
            self.disabled.insert(key, Gate::Remaining(attempts));
        }
    }

    /// Returns `true` if `key` is currently closed.
    #[must_use]
    pub fn is_disabled(&self, key: &K) -> bool {
        self.disabled.contains_key(key)
    }

    /// Records an attempt on `key` and returns whether it may proceed.
    pub fn admit(&mut self, key: &K) -> bool {
        match self.disabled.get_mut(key) {
            None => true,
            Some(Gate::Forever) => false,
            Some(Gate::Remaining(count)) => {
                if *count <= 1 {
                    self.disabled.remove(key);
                } else {
                    *count -= 1;
                }
                false
            }
        }
    }

    /// Returns the number of attempts `key` stays closed for, or `None` if it
    /// is open or closed indefinitely.
    #[must_use]
    pub fn remaining(&self, key: &K) -> Option<usize> {
        match self.disabled.get(key) {
            Some(Gate::Remaining(count)) => Some(*count),
            _ => None,
        }
    }

    /// Returns `true` if no channel is closed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disabled.is_empty()
    }

    /// Reopens every channel.
    pub fn clear(&mut self) {
        self.disabled.clear();
    }

    /// Copies every closed channel of `other` into `self`.
    pub fn extend_from(&mut self, other: &Self)
    where
        K: Clone,
    {
        self.disabled
            .extend(other.disabled.iter().map(|(k, g)| (k.clone(), *g)));
    }
}

impl<K: fmt::Debug> fmt::Debug for TypeGate<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.disabled.iter()).finish()
    }
}
