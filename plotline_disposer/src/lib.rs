// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotline Disposer: idempotent resource-release handles.
//!
//! Every stateful object in Plotline hands out a [`Disposer`] for the
//! resources it registers on someone else's behalf: event listeners, pending
//! timers, running animations. Disposing the handle is the single cancellation
//! mechanism across the workspace.
//!
//! - [`Dispose`]: the release contract. The first call releases, later calls
//!   are no-ops.
//! - [`Disposer`]: a shared handle around one release action.
//! - [`MultiDisposer`]: releases a fixed list of disposers in order.
//! - [`MutableValueDisposer`]: a replaceable `(value, disposer)` slot.
//! - [`CounterDisposer`]: releases a resource when its last user leaves.
//!
//! ## Failure policy
//!
//! Release actions may fail ([`Disposer::try_new`]). A disposer is marked as
//! disposed before its action runs, so a failing action is never retried.
//! Composite disposers attempt every child and then report all failures
//! together as a [`DisposeError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use plotline_disposer::{Dispose, Disposer, MultiDisposer};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let record = |name: &'static str| {
//!     let log = log.clone();
//!     Disposer::new(move || log.borrow_mut().push(name))
//! };
//!
//! let all = MultiDisposer::new(vec![record("listener"), record("timer")]);
//! all.dispose().unwrap();
//! all.dispose().unwrap();
//!
//! assert_eq!(*log.borrow(), ["listener", "timer"]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Handles are reference counted with
//! `Rc` and are meant for single-threaded, frame-driven hosts.

#![no_std]

extern crate alloc;

mod counter;
mod disposer;
mod error;
mod multi;
mod mutable;

pub use counter::CounterDisposer;
pub use disposer::{Dispose, Disposer};
pub use error::DisposeError;
pub use multi::MultiDisposer;
pub use mutable::MutableValueDisposer;
