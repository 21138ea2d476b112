// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite disposer over a fixed list of children.

use alloc::vec::Vec;
use core::cell::Cell;

use crate::disposer::{Dispose, Disposer};
use crate::error::DisposeError;

/// Disposes a fixed list of disposers, in order.
///
/// A child whose release action fails does not prevent the remaining children
/// from being released. All failures are reported together once every child
/// has been attempted (see [`DisposeError::combine`]).
///
/// # Example
///
/// ```
/// use plotline_disposer::{Dispose, Disposer, DisposeError, MultiDisposer};
///
/// let first = Disposer::try_new(|| Err(DisposeError::release("first")));
/// let second = Disposer::noop();
/// let multi = MultiDisposer::new(vec![first, second.clone()]);
///
/// assert!(multi.dispose().is_err());
/// assert!(second.is_disposed());
/// ```
#[derive(Debug)]
pub struct MultiDisposer {
    disposers: Vec<Disposer>,
    disposed: Cell<bool>,
}

impl MultiDisposer {
    /// Creates a composite over `disposers`.
    #[must_use]
    pub fn new(disposers: Vec<Disposer>) -> Self {
        Self {
            disposers,
            disposed: Cell::new(false),
        }
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Returns the children in disposal order.
    #[must_use]
    pub fn disposers(&self) -> &[Disposer] {
        &self.disposers
    }
}

impl Dispose for MultiDisposer {
    fn dispose(&self) -> Result<(), DisposeError> {
        if self.disposed.replace(true) {
            return Ok(());
        }
        let mut errors = Vec::new();
        for disposer in &self.disposers {
            if let Err(error) = disposer.dispose() {
                errors.push(error);
            }
        }
        #[cfg(feature = "tracing")]
        if !errors.is_empty() {
            tracing::debug!(
                failures = errors.len(),
                children = self.disposers.len(),
                "multi-disposer finished with failures"
            );
        }
        DisposeError::combine(errors)
    }

    #[inline]
    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl From<MultiDisposer> for Disposer {
    fn from(multi: MultiDisposer) -> Self {
        Self::try_new(move || multi.dispose())
    }
}
