// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The listener registry and its dispatch loop.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell, RefMut};
use core::fmt;

use plotline_disposer::{Dispose, DisposeError, Disposer, MultiDisposer};
use plotline_scheduler::FrameScheduler;
use smallvec::SmallVec;

use crate::error::EventError;
use crate::event::{ContextId, Event, Handler};
use crate::gate::TypeGate;

struct Listener<E: Event> {
    /// `None` listens to every kind.
    kind: Option<E::Kind>,
    handler: Handler<E>,
    context: Option<ContextId>,
    once: bool,
    should_clone: bool,
    killed: Cell<bool>,
    disposer: Disposer,
}

impl<E: Event> Listener<E> {
    #[inline]
    fn is_live(&self) -> bool {
        !self.killed.get()
    }

    #[inline]
    fn accepts(&self, kind: E::Kind) -> bool {
        self.kind.is_none_or(|k| k == kind)
    }

    fn is_duplicate_of(
        &self,
        kind: Option<E::Kind>,
        handler: &Handler<E>,
        context: Option<ContextId>,
        once: bool,
    ) -> bool {
        self.is_live()
            && self.once == once
            && self.kind == kind
            && self.context == context
            && self.handler.ptr_eq(handler)
    }

    fn kill(&self) {
        // The listener disposer's action cannot fail.
        let _ = self.disposer.dispose();
    }
}

struct State<E: Event> {
    listeners: Vec<Rc<Listener<E>>>,
    /// Listeners disposed while a dispatch was iterating.
    pending_removal: Vec<Rc<Listener<E>>>,
    iterating: usize,
    enabled: bool,
    disposed: bool,
    gate: TypeGate<E::Kind>,
}

struct Shared<E: Event> {
    state: RefCell<State<E>>,
}

impl<E: Event> Shared<E> {
    fn remove_listener(&self, listener: &Rc<Listener<E>>) {
        listener.killed.set(true);
        let mut state = self.state.borrow_mut();
        if state.iterating > 0 {
            state.pending_removal.push(listener.clone());
        } else {
            state.listeners.retain(|l| !Rc::ptr_eq(l, listener));
        }
    }

    fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }
}

/// Holds the iteration depth up while a dispatch walks the listener list.
///
/// Compaction of listeners removed mid-dispatch happens when the outermost
/// guard drops, including during unwinding.
struct IterationGuard<'a, E: Event> {
    shared: &'a Shared<E>,
}

impl<'a, E: Event> IterationGuard<'a, E> {
    fn enter(shared: &'a Shared<E>) -> Self {
        shared.state.borrow_mut().iterating += 1;
        Self { shared }
    }
}

impl<E: Event> Drop for IterationGuard<'_, E> {
    fn drop(&mut self) {
        let mut state = self.shared.state.borrow_mut();
        state.iterating -= 1;
        if state.iterating == 0 && !state.pending_removal.is_empty() {
            let removed = core::mem::take(&mut state.pending_removal);
            state
                .listeners
                .retain(|l| !removed.iter().any(|r| Rc::ptr_eq(l, r)));
        }
    }
}

/// A typed publish/subscribe hub.
///
/// Listeners subscribe to one [`Event::Kind`] (or to every kind with
/// [`on_all`](Self::on_all)) and are invoked in registration order.
///
/// Listeners may be added or removed from inside a callback, including a
/// listener removing itself. Removal during a dispatch marks the listener as
/// killed, so it is not invoked again, and the listener list is compacted
/// once the outermost dispatch finishes. Listeners added during a dispatch are
/// not invoked by that dispatch.
///
/// Dispatch is gated three ways: globally ([`disable`](Self::disable)), per
/// kind until re-enabled ([`disable_type`](Self::disable_type)), and per kind
/// for a number of attempts ([`disable_type_for`](Self::disable_type_for)).
///
/// The dispatcher is a cheap handle; clones share the same listeners.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use plotline_events::{Event, EventDispatcher, Handler};
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// enum Kind { Hit }
/// struct Hit(u32);
/// impl Event for Hit {
///     type Kind = Kind;
///     fn kind(&self) -> Kind { Kind::Hit }
/// }
///
/// let events = EventDispatcher::<Hit>::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let handler = {
///     let seen = seen.clone();
///     Handler::new(move |e: &Hit| seen.borrow_mut().push(e.0))
/// };
///
/// events.on(Kind::Hit, handler.clone(), None, true).unwrap();
/// // Registering the same handler again replaces the first registration.
/// events.on(Kind::Hit, handler, None, true).unwrap();
///
/// events.dispatch_immediately(&Hit(1)).unwrap();
/// assert_eq!(*seen.borrow(), [1]);
/// ```
pub struct EventDispatcher<E: Event> {
    shared: Rc<Shared<E>>,
}

impl<E: Event> Clone for EventDispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E: Event> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> EventDispatcher<E> {
    /// Creates an enabled dispatcher with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(State {
                    listeners: Vec::new(),
                    pending_removal: Vec::new(),
                    iterating: 0,
                    enabled: true,
                    disposed: false,
                    gate: TypeGate::new(),
                }),
            }),
        }
    }

    /// Returns `true` if both handles refer to the same dispatcher.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// Registers `handler` for events of `kind`.
    ///
    /// A live listener with the same kind, handler and context that was not
    /// registered with [`once`](Self::once) is removed first, so registering
    /// twice replaces rather than duplicates. `should_clone` controls whether
    /// [`copy_from`](Self::copy_from) copies this listener.
    ///
    /// Disposing the returned handle removes the listener.
    pub fn on(
        &self,
        kind: E::Kind,
        handler: Handler<E>,
        context: Option<ContextId>,
        should_clone: bool,
    ) -> Result<Disposer, EventError> {
        self.add_listener(Some(kind), handler, context, false, should_clone)
    }

    /// Registers `handler` for the first event of `kind` only.
    ///
    /// The listener removes itself before its callback runs, so dispatching
    /// the same kind again from inside the callback does not reach it.
    pub fn once(
        &self,
        kind: E::Kind,
        handler: Handler<E>,
        context: Option<ContextId>,
    ) -> Result<Disposer, EventError> {
        self.add_listener(Some(kind), handler, context, true, true)
    }

    /// Registers `handler` for events of every kind.
    pub fn on_all(
        &self,
        handler: Handler<E>,
        context: Option<ContextId>,
    ) -> Result<Disposer, EventError> {
        self.add_listener(None, handler, context, false, true)
    }

    /// Removes every live listener registered for `kind` with `context`.
    ///
    /// With `Some(handler)` only listeners wrapping that handler are removed.
    /// Wildcard listeners are not affected.
    pub fn off(
        &self,
        kind: E::Kind,
        handler: Option<&Handler<E>>,
        context: Option<ContextId>,
    ) -> Result<(), EventError> {
        let matching: SmallVec<[Rc<Listener<E>>; 4]> = self
            .live_state()?
            .listeners
            .iter()
            .filter(|l| {
                l.is_live()
                    && l.kind == Some(kind)
                    && l.context == context
                    && handler.is_none_or(|h| l.handler.ptr_eq(h))
            })
            .cloned()
            .collect();
        for listener in matching {
            listener.kill();
        }
        Ok(())
    }

    /// Invokes every matching listener now, in registration order.
    ///
    /// Nothing is delivered while the dispatcher is disabled or the event's
    /// kind is gated off. Each call on a kind that is disabled for a number
    /// of attempts uses up one attempt, whether or not anyone is listening.
    pub fn dispatch_immediately(&self, event: &E) -> Result<(), EventError> {
        let kind = event.kind();
        if !self.should_dispatch(kind)? {
            return Ok(());
        }

        let _guard = IterationGuard::enter(&self.shared);
        let snapshot = self.shared.state.borrow().listeners.len();
        for index in 0..snapshot {
            let listener = self.shared.state.borrow().listeners.get(index).cloned();
            let Some(listener) = listener else {
                // The dispatcher was disposed by a callback.
                break;
            };
            if !listener.is_live() || !listener.accepts(kind) {
                continue;
            }
            if listener.once {
                listener.kill();
            }
            listener.handler.call(event);
        }
        Ok(())
    }

    /// Invokes every matching listener later, from the scheduler's idle lane.
    ///
    /// Gating is applied now. A listener that is removed, or whose dispatcher
    /// is disposed, before its deferred call runs is skipped.
    pub fn dispatch(&self, event: E, scheduler: &FrameScheduler) -> Result<(), EventError> {
        let kind = event.kind();
        if !self.should_dispatch(kind)? {
            return Ok(());
        }

        let matching: SmallVec<[Rc<Listener<E>>; 8]> = self
            .shared
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.is_live() && l.accepts(kind))
            .cloned()
            .collect();
        if matching.is_empty() {
            return Ok(());
        }

        let event = Rc::new(event);
        for listener in matching {
            let shared: Weak<Shared<E>> = Rc::downgrade(&self.shared);
            let event = event.clone();
            scheduler.when_idle(move |_now| {
                let dispatcher_gone = shared.upgrade().is_none_or(|s| s.is_disposed());
                if dispatcher_gone || !listener.is_live() {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(kind = ?listener.kind, "skipping deferred dispatch");
                    return;
                }
                if listener.once {
                    listener.kill();
                }
                listener.handler.call(&event);
            });
        }
        Ok(())
    }

    /// Turns dispatching back on.
    pub fn enable(&self) -> Result<(), EventError> {
        self.live_state()?.enabled = true;
        Ok(())
    }

    /// Turns all dispatching off until [`enable`](Self::enable).
    pub fn disable(&self) -> Result<(), EventError> {
        self.live_state()?.enabled = false;
        Ok(())
    }

    /// Clears any gate on `kind`.
    pub fn enable_type(&self, kind: E::Kind) -> Result<(), EventError> {
        self.live_state()?.gate.enable(&kind);
        Ok(())
    }

    /// Drops every dispatch of `kind` until [`enable_type`](Self::enable_type).
    pub fn disable_type(&self, kind: E::Kind) -> Result<(), EventError> {
        self.live_state()?.gate.disable(kind);
        Ok(())
    }

    /// Drops the next `attempts` dispatches of `kind`, then re-enables it.
    ///
    /// Every attempted dispatch of `kind` counts, including ones made while
    /// the dispatcher is [disabled](Self::disable).
    pub fn disable_type_for(&self, kind: E::Kind, attempts: usize) -> Result<(), EventError> {
        self.live_state()?.gate.disable_for(kind, attempts);
        Ok(())
    }

    /// Returns `true` if a dispatch of `kind` right now would reach a
    /// listener.
    ///
    /// This is the check producers use to skip building event payloads
    /// nobody observes. It does not use up a gated attempt, and it answers
    /// `false` rather than failing once the dispatcher is disposed.
    #[must_use]
    pub fn is_enabled(&self, kind: E::Kind) -> bool {
        let state = self.shared.state.borrow();
        !state.disposed
            && state.enabled
            && !state.gate.is_disabled(&kind)
            && state
                .listeners
                .iter()
                .any(|l| l.is_live() && l.accepts(kind))
    }

    /// Returns `true` if any live listener is registered.
    #[must_use]
    pub fn has_listeners(&self) -> bool {
        self.shared
            .state
            .borrow()
            .listeners
            .iter()
            .any(|l| l.is_live())
    }

    /// Returns `true` if a live listener accepts `kind`, counting wildcard
    /// listeners.
    #[must_use]
    pub fn has_listeners_by_type(&self, kind: E::Kind) -> bool {
        self.shared
            .state
            .borrow()
            .listeners
            .iter()
            .any(|l| l.is_live() && l.accepts(kind))
    }

    /// Returns the number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.is_live())
            .count()
    }

    /// Re-registers every live, cloneable listener of `source` on `self`.
    ///
    /// Kind, handler, context and once-ness are preserved. The returned
    /// handle removes all copied listeners.
    pub fn copy_from(&self, source: &Self) -> Result<Disposer, EventError> {
        self.copy_filtered(source, |_| true)
    }

    pub(crate) fn copy_filtered(
        &self,
        source: &Self,
        keep: impl Fn(Option<ContextId>) -> bool,
    ) -> Result<Disposer, EventError> {
        if self.ptr_eq(source) {
            return Err(EventError::CopyFromSelf);
        }
        if source.is_disposed() {
            return Err(EventError::Disposed);
        }
        let copied: Vec<Rc<Listener<E>>> = source
            .shared
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.is_live() && l.should_clone && keep(l.context))
            .cloned()
            .collect();
        let mut disposers = Vec::with_capacity(copied.len());
        for listener in copied {
            disposers.push(self.add_listener(
                listener.kind,
                listener.handler.clone(),
                listener.context,
                listener.once,
                listener.should_clone,
            )?);
        }
        Ok(MultiDisposer::new(disposers).into())
    }

    fn add_listener(
        &self,
        kind: Option<E::Kind>,
        handler: Handler<E>,
        context: Option<ContextId>,
        once: bool,
        should_clone: bool,
    ) -> Result<Disposer, EventError> {
        if self.is_disposed() {
            return Err(EventError::Disposed);
        }

        let existing: SmallVec<[Rc<Listener<E>>; 2]> = self
            .shared
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.is_duplicate_of(kind, &handler, context, once))
            .cloned()
            .collect();
        for listener in existing {
            listener.kill();
        }

        let shared = Rc::downgrade(&self.shared);
        let listener = Rc::new_cyclic(|this: &Weak<Listener<E>>| {
            let this = this.clone();
            Listener {
                kind,
                handler,
                context,
                once,
                should_clone,
                killed: Cell::new(false),
                disposer: Disposer::new(move || {
                    if let (Some(shared), Some(listener)) = (shared.upgrade(), this.upgrade()) {
                        shared.remove_listener(&listener);
                    }
                }),
            }
        });
        let disposer = listener.disposer.clone();
        self.shared.state.borrow_mut().listeners.push(listener);
        Ok(disposer)
    }

    fn live_state(&self) -> Result<RefMut<'_, State<E>>, EventError> {
        let state = self.shared.state.borrow_mut();
        if state.disposed {
            return Err(EventError::Disposed);
        }
        Ok(state)
    }

    /// Applies the per-kind and global gates.
    ///
    /// A countdown attempt is used up even while the dispatcher as a whole
    /// is disabled.
    fn should_dispatch(&self, kind: E::Kind) -> Result<bool, EventError> {
        let mut state = self.shared.state.borrow_mut();
        if state.disposed {
            return Err(EventError::Disposed);
        }
        let admitted = state.gate.admit(&kind);
        Ok(admitted && state.enabled)
    }
}

impl<E: Event> Dispose for EventDispatcher<E> {
    /// Removes every listener.
    ///
    /// Safe to call from inside a callback of this dispatcher. Later calls
    /// to registration or dispatch methods return [`EventError::Disposed`].
    fn dispose(&self) -> Result<(), DisposeError> {
        let listeners = {
            let mut state = self.shared.state.borrow_mut();
            if state.disposed {
                return Ok(());
            }
            state.disposed = true;
            state.pending_removal.clear();
            state.gate.clear();
            core::mem::take(&mut state.listeners)
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(listeners = listeners.len(), "disposing event dispatcher");

        let mut errors = Vec::new();
        for listener in &listeners {
            if let Err(error) = listener.disposer.dispose() {
                errors.push(error);
            }
        }
        DisposeError::combine(errors)
    }

    fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }
}

impl<E: Event> fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("EventDispatcher")
            .field("listeners", &state.listeners.len())
            .field("enabled", &state.enabled)
            .field("disposed", &state.disposed)
            .field("gate", &state.gate)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    enum Kind {
        Foo,
        Bar,
    }

    #[derive(Debug)]
    struct Ev(Kind, u32);

    impl Event for Ev {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            self.0
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<u32>>>, tag: u32) -> Handler<Ev> {
        let log = log.clone();
        Handler::new(move |e: &Ev| log.borrow_mut().push(tag * 100 + e.1))
    }

    #[test]
    fn kinds_and_wildcards() {
        let events = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        events.on(Kind::Foo, recorder(&log, 1), None, true).unwrap();
        events.on_all(recorder(&log, 2), None).unwrap();

        events.dispatch_immediately(&Ev(Kind::Bar, 5)).unwrap();
        events.dispatch_immediately(&Ev(Kind::Foo, 6)).unwrap();
        assert_eq!(*log.borrow(), vec![205, 106, 206]);
        assert!(events.has_listeners_by_type(Kind::Bar));
    }

    #[test]
    fn replace_is_keyed_by_context_and_onceness() {
        let events = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let handler = recorder(&log, 1);
        events.on(Kind::Foo, handler.clone(), None, true).unwrap();
        events.on(Kind::Foo, handler.clone(), None, true).unwrap();
        events
            .on(Kind::Foo, handler.clone(), Some(ContextId::new(1)), true)
            .unwrap();
        events.once(Kind::Foo, handler, None).unwrap();
        assert_eq!(events.listener_count(), 3);
    }

    #[test]
    fn self_removal_during_dispatch_does_not_skip_neighbours() {
        let events = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        events.on(Kind::Foo, recorder(&log, 1), None, true).unwrap();

        let slot: Rc<RefCell<Option<Disposer>>> = Rc::new(RefCell::new(None));
        let self_removing = {
            let slot = slot.clone();
            let log = log.clone();
            Handler::new(move |_: &Ev| {
                log.borrow_mut().push(2);
                if let Some(d) = slot.borrow().as_ref() {
                    d.dispose().unwrap();
                }
            })
        };
        *slot.borrow_mut() = Some(events.on(Kind::Foo, self_removing, None, true).unwrap());
        events.on(Kind::Foo, recorder(&log, 3), None, true).unwrap();

        events.dispatch_immediately(&Ev(Kind::Foo, 0)).unwrap();
        events.dispatch_immediately(&Ev(Kind::Foo, 0)).unwrap();
        assert_eq!(*log.borrow(), vec![100, 2, 300, 100, 300]);
        assert_eq!(events.listener_count(), 2);
    }

    #[test]
    fn killed_listeners_are_compacted_after_outer_dispatch() {
        let events = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let victim = events.on(Kind::Bar, recorder(&log, 9), None, true).unwrap();
        let killer = {
            let victim = victim.clone();
            Handler::new(move |_: &Ev| victim.dispose().unwrap())
        };
        events.on(Kind::Foo, killer, None, true).unwrap();

        events.dispatch_immediately(&Ev(Kind::Foo, 0)).unwrap();
        assert_eq!(events.shared.state.borrow().listeners.len(), 1);
        assert!(events.shared.state.borrow().pending_removal.is_empty());
        assert!(!events.has_listeners_by_type(Kind::Bar));
    }

    #[test]
    fn listeners_added_during_dispatch_wait_for_next_dispatch() {
        let events = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let adder = {
            let events = events.clone();
            let log = log.clone();
            Handler::new(move |_: &Ev| {
                events.on(Kind::Foo, recorder(&log, 5), None, true).unwrap();
            })
        };
        events.on(Kind::Foo, adder, None, true).unwrap();
        events.dispatch_immediately(&Ev(Kind::Foo, 1)).unwrap();
        assert!(log.borrow().is_empty());
        events.dispatch_immediately(&Ev(Kind::Foo, 2)).unwrap();
        assert_eq!(*log.borrow(), vec![502]);
    }

    #[test]
    fn countdown_runs_down_while_globally_disabled() {
        let events = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        events.on(Kind::Foo, recorder(&log, 1), None, true).unwrap();
        events.disable_type_for(Kind::Foo, 1).unwrap();
        events.disable().unwrap();
        assert!(!events.is_enabled(Kind::Foo));
        events.dispatch_immediately(&Ev(Kind::Foo, 1)).unwrap();
        events.enable().unwrap();
        events.dispatch_immediately(&Ev(Kind::Foo, 2)).unwrap();
        events.dispatch_immediately(&Ev(Kind::Foo, 3)).unwrap();
        assert_eq!(*log.borrow(), vec![102, 103]);
    }

    #[test]
    fn is_enabled_requires_listener_for_kind() {
        let events = EventDispatcher::new();
        assert!(!events.is_enabled(Kind::Foo));
        events
            .on(Kind::Bar, Handler::new(|_: &Ev| {}), None, true)
            .unwrap();
        assert!(!events.is_enabled(Kind::Foo));
        assert!(events.is_enabled(Kind::Bar));
        events.disable_type(Kind::Bar).unwrap();
        assert!(!events.is_enabled(Kind::Bar));
        events.enable_type(Kind::Bar).unwrap();
        assert!(events.is_enabled(Kind::Bar));
    }

    #[test]
    fn off_matches_kind_context_and_optional_handler() {
        let events = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let owner = Some(ContextId::new(7));
        let a = recorder(&log, 1);
        events.on(Kind::Foo, a.clone(), owner, true).unwrap();
        events.on(Kind::Foo, recorder(&log, 2), owner, true).unwrap();
        events.on(Kind::Foo, recorder(&log, 3), None, true).unwrap();

        events.off(Kind::Foo, Some(&a), owner).unwrap();
        assert_eq!(events.listener_count(), 2);
        events.off(Kind::Foo, None, owner).unwrap();
        assert_eq!(events.listener_count(), 1);

        events.dispatch_immediately(&Ev(Kind::Foo, 0)).unwrap();
        assert_eq!(*log.borrow(), vec![300]);
    }

    #[test]
    fn dispose_inside_callback_stops_iteration() {
        let events = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let disposer = {
            let events = events.clone();
            Handler::new(move |_: &Ev| events.dispose().unwrap())
        };
        events.on(Kind::Foo, disposer, None, true).unwrap();
        events.on(Kind::Foo, recorder(&log, 1), None, true).unwrap();

        events.dispatch_immediately(&Ev(Kind::Foo, 0)).unwrap();
        assert!(log.borrow().is_empty());
        assert!(events.is_disposed());
        assert!(!events.has_listeners());
        assert_eq!(
            events.dispatch_immediately(&Ev(Kind::Foo, 0)),
            Err(EventError::Disposed)
        );
        assert_eq!(
            events.on_all(Handler::new(|_: &Ev| {}), None).unwrap_err(),
            EventError::Disposed
        );
    }

    #[test]
    fn disposer_after_dispatcher_dispose_is_noop() {
        let events = EventDispatcher::new();
        let handle = events
            .on(Kind::Foo, Handler::new(|_: &Ev| {}), None, true)
            .unwrap();
        events.dispose().unwrap();
        assert!(handle.is_disposed());
        handle.dispose().unwrap();
        events.dispose().unwrap();
    }

    #[test]
    fn copy_from_skips_non_cloneable_and_self() {
        let source = EventDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        source.on(Kind::Foo, recorder(&log, 1), None, true).unwrap();
        source.on(Kind::Foo, recorder(&log, 2), None, false).unwrap();
        source.once(Kind::Bar, recorder(&log, 3), None).unwrap();

        let copy = EventDispatcher::new();
        let handle = copy.copy_from(&source).unwrap();
        assert_eq!(copy.listener_count(), 2);
        assert_eq!(copy.copy_from(&copy).unwrap_err(), EventError::CopyFromSelf);

        copy.dispatch_immediately(&Ev(Kind::Bar, 0)).unwrap();
        copy.dispatch_immediately(&Ev(Kind::Bar, 0)).unwrap();
        assert_eq!(*log.borrow(), vec![300]);

        handle.dispose().unwrap();
        assert!(!copy.has_listeners());
        assert_eq!(source.listener_count(), 3);
    }
}
