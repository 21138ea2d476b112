// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Deref;

use plotline_disposer::Disposer;

use crate::dispatcher::EventDispatcher;
use crate::error::EventError;
use crate::event::{AsContext, Event};

/// An [`EventDispatcher`] that belongs to a target object.
///
/// The target is fixed at construction. When listeners are copied from
/// another targeted dispatcher, listeners whose context is the *source's*
/// target are left behind, so an object never picks up a listener that points
/// back at a different instance.
///
/// All [`EventDispatcher`] methods are available through `Deref`.
pub struct TargetedEventDispatcher<T, E: Event> {
    target: T,
    events: EventDispatcher<E>,
}

impl<T: AsContext, E: Event> TargetedEventDispatcher<T, E> {
    /// Creates a dispatcher owned by `target`.
    #[must_use]
    pub fn new(target: T) -> Self {
        Self {
            target,
            events: EventDispatcher::new(),
        }
    }

    /// Returns the owning target.
    #[must_use]
    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the underlying dispatcher.
    #[must_use]
    #[inline]
    pub fn dispatcher(&self) -> &EventDispatcher<E> {
        &self.events
    }

    /// Copies the cloneable listeners of `source`, except those whose context
    /// is `source`'s target.
    pub fn copy_from(&self, source: &Self) -> Result<Disposer, EventError> {
        let excluded = source.target.context_id();
        self.events
            .copy_filtered(&source.events, |context| context != Some(excluded))
    }
}

impl<T, E: Event> Deref for TargetedEventDispatcher<T, E> {
    type Target = EventDispatcher<E>;

    fn deref(&self) -> &EventDispatcher<E> {
        &self.events
    }
}

impl<T: fmt::Debug, E: Event> fmt::Debug for TargetedEventDispatcher<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetedEventDispatcher")
            .field("target", &self.target)
            .field("events", &self.events)
            .finish()
    }
}
