// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads, handlers and listener owners.

use alloc::rc::Rc;
use core::fmt;
use core::hash::Hash;

/// A dispatchable event.
///
/// Each event reports a [`Kind`](Self::Kind), the channel listeners subscribe
/// to. Kinds are usually a field-less enum mirroring the event enum.
///
/// ```
/// use plotline_events::Event;
///
/// #[derive(Debug)]
/// enum Pointer {
///     Down { x: f64, y: f64 },
///     Up,
/// }
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// enum PointerKind {
///     Down,
///     Up,
/// }
///
/// impl Event for Pointer {
///     type Kind = PointerKind;
///
///     fn kind(&self) -> PointerKind {
///         match self {
///             Self::Down { .. } => PointerKind::Down,
///             Self::Up => PointerKind::Up,
///         }
///     }
/// }
///
/// assert_eq!(Pointer::Up.kind(), PointerKind::Up);
/// ```
pub trait Event: 'static {
    /// The channel identifier.
    type Kind: Copy + Eq + Hash + fmt::Debug + 'static;

    /// Returns the channel this event is dispatched on.
    fn kind(&self) -> Self::Kind;
}

/// A shared event callback with identity.
///
/// Two handlers are the same handler when they are clones of one another.
/// Identity is what [`EventDispatcher::on`](crate::EventDispatcher::on) uses
/// to replace duplicate registrations and what
/// [`EventDispatcher::off`](crate::EventDispatcher::off) matches against.
pub struct Handler<E> {
    callback: Rc<dyn Fn(&E)>,
}

impl<E> Handler<E> {
    /// Wraps `callback`.
    pub fn new(callback: impl Fn(&E) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Invokes the callback.
    #[inline]
    pub fn call(&self, event: &E) {
        (self.callback)(event);
    }

    /// Returns `true` if both handlers wrap the same callback.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
        }
    }
}

impl<E> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Identity of the object a listener belongs to.
///
/// Listener contexts take part in duplicate detection and let a
/// [`TargetedEventDispatcher`](crate::TargetedEventDispatcher) refuse to copy
/// listeners that belong to its source's own target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(usize);

impl ContextId {
    /// Creates a context from a caller-chosen raw id.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Uses the address of a shared allocation as the context.
    ///
    /// The id is only meaningful while the allocation is alive.
    #[must_use]
    pub fn of<T: ?Sized>(owner: &Rc<T>) -> Self {
        Self(Rc::as_ptr(owner).cast::<()>().addr())
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Something that can act as a listener context.
pub trait AsContext {
    /// Returns the context identity of `self`.
    fn context_id(&self) -> ContextId;
}

impl AsContext for ContextId {
    fn context_id(&self) -> ContextId {
        *self
    }
}

impl<T: ?Sized> AsContext for Rc<T> {
    fn context_id(&self) -> ContextId {
        ContextId::of(self)
    }
}
