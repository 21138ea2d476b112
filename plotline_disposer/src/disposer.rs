// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Dispose`] trait and the basic [`Disposer`] handle.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use crate::error::DisposeError;

/// A resource that can be released exactly once.
///
/// Implementations must be idempotent: the first call to [`dispose`](Self::dispose)
/// releases the resource and every later call is a no-op returning `Ok(())`.
pub trait Dispose {
    /// Releases the resource.
    ///
    /// Returns the failure reported by the release action, if any. The
    /// resource counts as disposed even when this returns an error.
    fn dispose(&self) -> Result<(), DisposeError>;

    /// Returns `true` once [`dispose`](Self::dispose) has been called.
    fn is_disposed(&self) -> bool;
}

type ReleaseFn = Box<dyn FnOnce() -> Result<(), DisposeError>>;

struct Inner {
    disposed: Cell<bool>,
    action: Cell<Option<ReleaseFn>>,
}

/// A shared handle to a release action.
///
/// Cloning a `Disposer` produces another handle to the *same* resource:
/// disposing any clone disposes all of them, and the action runs once.
///
/// The disposed flag is set before the action runs. A re-entrant call to
/// [`dispose`](Dispose::dispose) from inside the action, or a second call after
/// the action failed, is therefore a no-op.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use plotline_disposer::{Dispose, Disposer};
///
/// let released = Rc::new(Cell::new(0));
/// let disposer = {
///     let released = released.clone();
///     Disposer::new(move || released.set(released.get() + 1))
/// };
///
/// let alias = disposer.clone();
/// disposer.dispose().unwrap();
/// alias.dispose().unwrap();
///
/// assert!(alias.is_disposed());
/// assert_eq!(released.get(), 1);
/// ```
#[derive(Clone)]
pub struct Disposer {
    inner: Rc<Inner>,
}

impl Disposer {
    /// Creates a disposer around an infallible release action.
    #[must_use]
    pub fn new(action: impl FnOnce() + 'static) -> Self {
        Self::try_new(move || {
            action();
            Ok(())
        })
    }

    /// Creates a disposer around a release action that may fail.
    #[must_use]
    pub fn try_new(action: impl FnOnce() -> Result<(), DisposeError> + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                disposed: Cell::new(false),
                action: Cell::new(Some(Box::new(action))),
            }),
        }
    }

    /// Creates a disposer with nothing to release.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            inner: Rc::new(Inner {
                disposed: Cell::new(false),
                action: Cell::new(None),
            }),
        }
    }

    /// Returns `true` if both handles refer to the same resource.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Dispose for Disposer {
    fn dispose(&self) -> Result<(), DisposeError> {
        if self.inner.disposed.replace(true) {
            return Ok(());
        }
        match self.inner.action.take() {
            Some(action) => action(),
            None => Ok(()),
        }
    }

    #[inline]
    fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("disposed", &self.inner.disposed.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn counting() -> (Disposer, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let disposer = {
            let count = count.clone();
            Disposer::new(move || count.set(count.get() + 1))
        };
        (disposer, count)
    }

    #[test]
    fn dispose_runs_action_once() {
        let (disposer, count) = counting();
        assert!(!disposer.is_disposed());
        for _ in 0..5 {
            disposer.dispose().unwrap();
        }
        assert!(disposer.is_disposed());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn clones_share_state() {
        let (disposer, count) = counting();
        let alias = disposer.clone();
        assert!(alias.ptr_eq(&disposer));
        alias.dispose().unwrap();
        assert!(disposer.is_disposed());
        disposer.dispose().unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn failing_action_still_marks_disposed() {
        let calls = Rc::new(Cell::new(0));
        let disposer = {
            let calls = calls.clone();
            Disposer::try_new(move || {
                calls.set(calls.get() + 1);
                Err(DisposeError::release("boom"))
            })
        };

        assert_eq!(disposer.dispose(), Err(DisposeError::release("boom")));
        assert!(disposer.is_disposed());
        // No retry of the failing action.
        assert_eq!(disposer.dispose(), Ok(()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn reentrant_dispose_is_noop() {
        let slot: Rc<RefCell<Option<Disposer>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));
        let disposer = {
            let slot = slot.clone();
            let calls = calls.clone();
            Disposer::new(move || {
                calls.set(calls.get() + 1);
                let again = slot.borrow().clone();
                if let Some(again) = again {
                    again.dispose().unwrap();
                }
            })
        };
        *slot.borrow_mut() = Some(disposer.clone());

        disposer.dispose().unwrap();
        assert_eq!(calls.get(), 1);
        slot.borrow_mut().take();
    }

    #[test]
    fn noop_disposer() {
        let disposer = Disposer::noop();
        assert!(!disposer.is_disposed());
        disposer.dispose().unwrap();
        assert!(disposer.is_disposed());
    }

    #[test]
    fn distinct_disposers_are_not_ptr_eq() {
        let handles: Vec<_> = (0..2).map(|_| Disposer::noop()).collect();
        assert!(!handles[0].ptr_eq(&handles[1]));
    }
}
