// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single replaceable `(value, disposer)` slot.

use core::cell::{Cell, RefCell};
use core::fmt;

use crate::disposer::{Dispose, Disposer};
use crate::error::DisposeError;

/// Holds one value together with the disposer that releases it.
///
/// Installing a new pair with [`set`](Self::set) first disposes the previous
/// disposer. This is the usual way to keep "the current X" alive, such as a
/// pending timer or a subscription that gets replaced when its source changes.
///
/// Once the slot itself has been disposed, any disposer passed to
/// [`set`](Self::set) is released immediately and the value is dropped.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use plotline_disposer::{Dispose, Disposer, MutableValueDisposer};
///
/// let released = Rc::new(Cell::new(0));
/// let make = |released: &Rc<Cell<u32>>| {
///     let released = released.clone();
///     Disposer::new(move || released.set(released.get() + 1))
/// };
///
/// let slot = MutableValueDisposer::new();
/// slot.set(Some("first"), Some(make(&released))).unwrap();
/// slot.set(Some("second"), Some(make(&released))).unwrap();
/// assert_eq!(released.get(), 1);
/// assert_eq!(slot.get(), Some("second"));
///
/// slot.reset().unwrap();
/// assert_eq!(released.get(), 2);
/// assert_eq!(slot.get(), None);
/// ```
pub struct MutableValueDisposer<T> {
    value: RefCell<Option<T>>,
    disposer: RefCell<Option<Disposer>>,
    disposed: Cell<bool>,
}

impl<T> Default for MutableValueDisposer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MutableValueDisposer<T> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: RefCell::new(None),
            disposer: RefCell::new(None),
            disposed: Cell::new(false),
        }
    }

    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Returns `true` if a disposer is currently installed.
    #[must_use]
    pub fn has_disposer(&self) -> bool {
        self.disposer.borrow().is_some()
    }

    /// Replaces the current pair.
    ///
    /// The previous disposer is released before the new pair is installed.
    /// The new pair is installed even if releasing the previous one failed;
    /// that failure is returned.
    pub fn set(&self, value: Option<T>, disposer: Option<Disposer>) -> Result<(), DisposeError> {
        if self.disposed.get() {
            drop(value);
            return match disposer {
                Some(disposer) => disposer.dispose(),
                None => Ok(()),
            };
        }
        let previous = self.disposer.borrow_mut().take();
        let result = match previous {
            Some(previous) => previous.dispose(),
            None => Ok(()),
        };
        *self.disposer.borrow_mut() = disposer;
        *self.value.borrow_mut() = value;
        result
    }

    /// Releases the current pair and leaves the slot empty.
    pub fn reset(&self) -> Result<(), DisposeError> {
        self.set(None, None)
    }
}

impl<T> Dispose for MutableValueDisposer<T> {
    fn dispose(&self) -> Result<(), DisposeError> {
        if self.disposed.replace(true) {
            return Ok(());
        }
        let previous = self.disposer.borrow_mut().take();
        let value = self.value.borrow_mut().take();
        drop(value);
        match previous {
            Some(previous) => previous.dispose(),
            None => Ok(()),
        }
    }

    #[inline]
    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableValueDisposer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableValueDisposer")
            .field("value", &self.value.borrow())
            .field("disposer", &self.disposer.borrow())
            .field("disposed", &self.disposed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;

    fn counting(count: &Rc<Cell<u32>>) -> Disposer {
        let count = count.clone();
        Disposer::new(move || count.set(count.get() + 1))
    }

    #[test]
    fn set_releases_previous_disposer_first() {
        let count = Rc::new(Cell::new(0));
        let slot = MutableValueDisposer::new();
        let first = counting(&count);
        slot.set(Some(1), Some(first.clone())).unwrap();
        assert!(!first.is_disposed());

        slot.set(Some(2), Some(counting(&count))).unwrap();
        assert!(first.is_disposed());
        assert_eq!(count.get(), 1);
        assert_eq!(slot.get(), Some(2));
    }

    #[test]
    fn dispose_releases_current_and_clears_value() {
        let count = Rc::new(Cell::new(0));
        let slot = MutableValueDisposer::new();
        slot.set(Some("v"), Some(counting(&count))).unwrap();

        slot.dispose().unwrap();
        slot.dispose().unwrap();
        assert!(slot.is_disposed());
        assert_eq!(count.get(), 1);
        assert_eq!(slot.get(), None);
        assert!(!slot.has_disposer());
    }

    #[test]
    fn set_after_dispose_releases_incoming() {
        let count = Rc::new(Cell::new(0));
        let slot = MutableValueDisposer::new();
        slot.dispose().unwrap();

        slot.set(Some(5), Some(counting(&count))).unwrap();
        assert_eq!(count.get(), 1);
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn failed_release_still_installs_new_pair() {
        let slot = MutableValueDisposer::new();
        slot.set(
            Some(1),
            Some(Disposer::try_new(|| Err(DisposeError::release("old")))),
        )
        .unwrap();

        let result = slot.set(Some(2), Some(Disposer::noop()));
        assert_eq!(result, Err(DisposeError::release("old")));
        assert_eq!(slot.get(), Some(2));
        assert!(slot.has_disposer());
    }
}
