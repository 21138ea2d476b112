// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotline Events: typed, reentrancy-safe publish/subscribe.
//!
//! Every observable object in Plotline owns an [`EventDispatcher`]. Producers
//! ask [`EventDispatcher::is_enabled`] before building a payload, then
//! deliver it synchronously with [`EventDispatcher::dispatch_immediately`] or
//! defer it to the scheduler's idle lane with [`EventDispatcher::dispatch`].
//!
//! - [`Event`]: payload trait; `Event::Kind` is the channel.
//! - [`Handler`]: a shared callback with identity, used for duplicate
//!   detection and removal.
//! - [`ContextId`]/[`AsContext`]: identity of the object a listener belongs to.
//! - [`TypeGate`]: per-kind disable table with countdowns.
//! - [`TargetedEventDispatcher`]: a dispatcher bound to an owner object.
//!
//! ## Reentrancy
//!
//! Callbacks run with no internal borrow held, so they may register, remove,
//! dispatch or dispose freely. Removal during dispatch is deferred: the
//! listener is marked killed immediately and the list is compacted when the
//! outermost dispatch returns.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use plotline_disposer::Dispose;
//! use plotline_events::{Event, EventDispatcher, Handler};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
//! enum Kind { Changed }
//! struct Changed;
//! impl Event for Changed {
//!     type Kind = Kind;
//!     fn kind(&self) -> Kind { Kind::Changed }
//! }
//!
//! let events = EventDispatcher::new();
//! let count = Rc::new(Cell::new(0));
//! let handle = {
//!     let count = count.clone();
//!     events
//!         .on(Kind::Changed, Handler::new(move |_: &Changed| count.set(count.get() + 1)), None, true)
//!         .unwrap()
//! };
//!
//! // Skip the next two notifications.
//! events.disable_type_for(Kind::Changed, 2).unwrap();
//! for _ in 0..3 {
//!     events.dispatch_immediately(&Changed).unwrap();
//! }
//! assert_eq!(count.get(), 1);
//!
//! handle.dispose().unwrap();
//! assert!(!events.has_listeners());
//! ```

#![no_std]

extern crate alloc;

mod dispatcher;
mod error;
mod event;
mod gate;
mod targeted;

pub use dispatcher::EventDispatcher;
pub use error::EventError;
pub use event::{AsContext, ContextId, Event, Handler};
pub use gate::TypeGate;
pub use targeted::TargetedEventDispatcher;
