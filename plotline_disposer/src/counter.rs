// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference-counted disposal.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use crate::disposer::{Dispose, Disposer};
use crate::error::DisposeError;

struct Inner {
    count: Cell<usize>,
    resource: Disposer,
}

/// Releases a shared resource once every user has let go of it.
///
/// Each call to [`increment`](Self::increment) hands out a [`Disposer`] that
/// decrements the count when disposed. When the count returns to zero the
/// underlying resource is released. The resource can also be released
/// directly through [`Dispose::dispose`].
///
/// # Example
///
/// ```
/// use plotline_disposer::{CounterDisposer, Dispose};
///
/// let shared = CounterDisposer::new(|| {});
/// let a = shared.increment();
/// let b = shared.increment();
///
/// a.dispose().unwrap();
/// assert!(!shared.is_disposed());
///
/// b.dispose().unwrap();
/// assert!(shared.is_disposed());
/// ```
#[derive(Clone)]
pub struct CounterDisposer {
    inner: Rc<Inner>,
}

impl CounterDisposer {
    /// Creates a counter around an infallible release action.
    #[must_use]
    pub fn new(action: impl FnOnce() + 'static) -> Self {
        Self::from_disposer(Disposer::new(action))
    }

    /// Creates a counter around a release action that may fail.
    #[must_use]
    pub fn try_new(action: impl FnOnce() -> Result<(), DisposeError> + 'static) -> Self {
        Self::from_disposer(Disposer::try_new(action))
    }

    /// Creates a counter that releases `resource` when the count hits zero.
    #[must_use]
    pub fn from_disposer(resource: Disposer) -> Self {
        Self {
            inner: Rc::new(Inner {
                count: Cell::new(0),
                resource,
            }),
        }
    }

    /// Registers a new user and returns the handle that releases it.
    ///
    /// Disposing the returned handle more than once only decrements once.
    #[must_use]
    pub fn increment(&self) -> Disposer {
        self.inner.count.set(self.inner.count.get() + 1);
        let inner = self.inner.clone();
        Disposer::try_new(move || {
            let remaining = inner.count.get().saturating_sub(1);
            inner.count.set(remaining);
            if remaining == 0 {
                inner.resource.dispose()
            } else {
                Ok(())
            }
        })
    }

    /// Returns the number of outstanding users.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.count.get()
    }
}

impl Dispose for CounterDisposer {
    fn dispose(&self) -> Result<(), DisposeError> {
        self.inner.resource.dispose()
    }

    #[inline]
    fn is_disposed(&self) -> bool {
        self.inner.resource.is_disposed()
    }
}

impl fmt::Debug for CounterDisposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterDisposer")
            .field("count", &self.inner.count.get())
            .field("disposed", &self.inner.resource.is_disposed())
            .finish()
    }
}
