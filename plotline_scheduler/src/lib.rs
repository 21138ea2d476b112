// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotline Scheduler: frame-synchronized batching.
//!
//! Visual updates are coalesced into animation frames. A [`FrameScheduler`]
//! keeps four FIFO lanes and asks its [`FrameHost`] for a frame whenever work
//! is queued:
//!
//! - `next`: runs at the start of a frame (bounded by its length at frame start).
//! - `read`: layout measurement, fully drained each frame.
//! - `write`: layout mutation, fully drained each frame.
//! - `idle`: runs only when explicitly triggered; used for deferred event
//!   dispatch.
//!
//! One-shot timers ([`FrameScheduler::set_timeout`]) back delayed work such as
//! delayed animations. Cancellation goes through the returned
//! [`Disposer`](plotline_disposer::Disposer).
//!
//! There is no process-wide scheduler. Create one per host and pass the handle
//! to whoever needs it.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use plotline_disposer::Dispose;
//! use plotline_scheduler::{FrameScheduler, ManualHost, SchedulerConfig};
//!
//! let host = ManualHost::new(SchedulerConfig::new().with_frame_interval(16.0));
//! let scheduler = FrameScheduler::new(host.clone());
//!
//! let fired = Rc::new(Cell::new(0));
//! let timer = {
//!     let fired = fired.clone();
//!     scheduler.set_timeout(20.0, move |_now| fired.set(fired.get() + 1))
//! };
//!
//! host.step(&scheduler); // t = 16
//! assert_eq!(fired.get(), 0);
//! host.step(&scheduler); // t = 32
//! assert_eq!(fired.get(), 1);
//!
//! // Disposing after the timer fired is a no-op.
//! timer.dispose().unwrap();
//! ```
//!
//! ## Hosts
//!
//! A host supplies the clock and decides when frames run. Browser-like hosts
//! call [`FrameScheduler::run_frame`] from an animation-frame callback;
//! [`ManualHost`] steps a simulated clock at
//! [`SchedulerConfig::frame_interval_ms`] and is used in tests.

#![no_std]

extern crate alloc;

mod host;
mod scheduler;
mod timer;

pub use host::{DEFAULT_FRAME_INTERVAL_MS, FrameHost, ManualHost, SchedulerConfig};
pub use scheduler::{FrameScheduler, FrameStats, Lane};
