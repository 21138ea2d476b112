// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame loop and its four lanes.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use plotline_disposer::Disposer;

use crate::host::FrameHost;
use crate::timer::TimerQueue;

/// A callback queued on one of the scheduler lanes.
///
/// The argument is the frame timestamp in milliseconds.
pub(crate) type FrameCallback = Box<dyn FnOnce(f64)>;

/// Identifies one of the scheduler's queues.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Runs first in a frame, bounded by its length when the frame starts.
    Next,
    /// Runs after `Next`; intended for layout measurement.
    Read,
    /// Runs after `Read`; intended for layout mutation.
    Write,
    /// Runs only when [`FrameScheduler::trigger_idle`] is called.
    Idle,
}

/// Number of callbacks run per lane by one call to
/// [`FrameScheduler::run_frame`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Callbacks run from the `next` lane.
    pub next: usize,
    /// Callbacks run from the `read` lane.
    pub read: usize,
    /// Callbacks run from the `write` lane.
    pub write: usize,
}

impl FrameStats {
    /// Total callbacks run in the frame.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.next + self.read + self.write
    }
}

#[derive(Default)]
struct Lanes {
    next: VecDeque<FrameCallback>,
    read: VecDeque<FrameCallback>,
    write: VecDeque<FrameCallback>,
    idle: VecDeque<FrameCallback>,
}

impl Lanes {
    fn lane_mut(&mut self, lane: Lane) -> &mut VecDeque<FrameCallback> {
        match lane {
            Lane::Next => &mut self.next,
            Lane::Read => &mut self.read,
            Lane::Write => &mut self.write,
            Lane::Idle => &mut self.idle,
        }
    }

    fn lane(&self, lane: Lane) -> &VecDeque<FrameCallback> {
        match lane {
            Lane::Next => &self.next,
            Lane::Read => &self.read,
            Lane::Write => &self.write,
            Lane::Idle => &self.idle,
        }
    }
}

pub(crate) struct Shared {
    host: Rc<dyn FrameHost>,
    lanes: RefCell<Lanes>,
    frame_pending: Cell<bool>,
    pub(crate) timers: RefCell<TimerQueue>,
}

/// Frame-synchronized batching queue.
///
/// `FrameScheduler` coalesces work into animation frames. Work is queued on
/// one of four FIFO lanes:
///
/// - [`next_frame`](Self::next_frame): runs at the start of the next frame.
///   Only the items present when the frame starts run in it; items queued
///   while it drains wait for the following frame.
/// - [`read_frame`](Self::read_frame): runs after `next`, fully drained,
///   including items queued by callbacks of the same drain.
/// - [`write_frame`](Self::write_frame): runs after `read`, fully drained.
/// - [`when_idle`](Self::when_idle): never run by the frame loop; drained by
///   [`trigger_idle`](Self::trigger_idle).
///
/// A single pending-frame flag ensures at most one frame is requested from the
/// [`FrameHost`] at a time. After a frame, the scheduler requests another one
/// if `next` or `read` still holds work, and otherwise goes idle.
///
/// The handle is cheap to clone; clones share the same queues. No borrow of
/// the queues is held while a callback runs, so callbacks may queue more work
/// on any lane.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use plotline_scheduler::{FrameScheduler, ManualHost};
///
/// let host = ManualHost::default();
/// let scheduler = FrameScheduler::new(host.clone());
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let push = |name: &'static str| {
///     let log = log.clone();
///     move |_now: f64| log.borrow_mut().push(name)
/// };
/// scheduler.write_frame(push("write"));
/// scheduler.read_frame(push("read"));
/// scheduler.next_frame(push("next"));
///
/// let stats = host.step(&scheduler).unwrap();
/// assert_eq!(stats.total(), 3);
/// assert_eq!(*log.borrow(), ["next", "read", "write"]);
/// ```
#[derive(Clone)]
pub struct FrameScheduler {
    shared: Rc<Shared>,
}

impl FrameScheduler {
    /// Creates a scheduler driven by `host`.
    #[must_use]
    pub fn new(host: impl FrameHost + 'static) -> Self {
        Self::with_host(Rc::new(host))
    }

    /// Creates a scheduler driven by a shared host.
    #[must_use]
    pub fn with_host(host: Rc<dyn FrameHost>) -> Self {
        Self {
            shared: Rc::new(Shared {
                host,
                lanes: RefCell::new(Lanes::default()),
                frame_pending: Cell::new(false),
                timers: RefCell::new(TimerQueue::default()),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<Shared> {
        Rc::downgrade(&self.shared)
    }

    /// Returns the host clock in milliseconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.shared.host.now()
    }

    /// Returns `true` if both handles refer to the same scheduler.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// Queues `f` to run at the start of the next frame.
    pub fn next_frame(&self, f: impl FnOnce(f64) + 'static) {
        self.enqueue(Lane::Next, Box::new(f));
        self.request_frame();
    }

    /// Queues `f` to run in the read phase of the next frame.
    pub fn read_frame(&self, f: impl FnOnce(f64) + 'static) {
        self.enqueue(Lane::Read, Box::new(f));
        self.request_frame();
    }

    /// Queues `f` to run in the write phase of the next frame.
    pub fn write_frame(&self, f: impl FnOnce(f64) + 'static) {
        self.enqueue(Lane::Write, Box::new(f));
        self.request_frame();
    }

    /// Queues `f` on the idle lane.
    ///
    /// Idle work does not request a frame; it runs on the next
    /// [`trigger_idle`](Self::trigger_idle).
    pub fn when_idle(&self, f: impl FnOnce(f64) + 'static) {
        self.enqueue(Lane::Idle, Box::new(f));
    }

    /// Returns `true` if a frame has been requested and has not run yet.
    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.shared.frame_pending.get()
    }

    /// Returns the number of callbacks waiting on `lane`.
    #[must_use]
    pub fn pending(&self, lane: Lane) -> usize {
        self.shared.lanes.borrow().lane(lane).len()
    }

    /// Runs one frame.
    ///
    /// Called by the host in response to [`FrameHost::request_frame`]. Every
    /// callback receives the timestamp read from the host when the frame
    /// started.
    pub fn run_frame(&self) -> FrameStats {
        let now = self.shared.host.now();
        let mut stats = FrameStats::default();

        let snapshot = self.pending(Lane::Next);
        for _ in 0..snapshot {
            let Some(callback) = self.pop(Lane::Next) else {
                break;
            };
            callback(now);
            stats.next += 1;
        }
        while let Some(callback) = self.pop(Lane::Read) {
            callback(now);
            stats.read += 1;
        }
        while let Some(callback) = self.pop(Lane::Write) {
            callback(now);
            stats.write += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            next = stats.next,
            read = stats.read,
            write = stats.write,
            "frame drained"
        );

        let rearm = self.pending(Lane::Next) > 0 || self.pending(Lane::Read) > 0;
        if rearm {
            self.shared.frame_pending.set(true);
            self.shared.host.request_frame();
        } else {
            self.shared.frame_pending.set(false);
        }
        stats
    }

    /// Runs the callbacks that were on the idle lane when this was called.
    ///
    /// Idle callbacks queued while the lane drains wait for the next trigger.
    /// Returns the number of callbacks run.
    pub fn trigger_idle(&self) -> usize {
        let now = self.shared.host.now();
        let snapshot = self.pending(Lane::Idle);
        let mut ran = 0;
        for _ in 0..snapshot {
            let Some(callback) = self.pop(Lane::Idle) else {
                break;
            };
            callback(now);
            ran += 1;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(ran, "idle lane triggered");
        ran
    }

    /// Schedules `f` to run once, `delay_ms` milliseconds from now.
    ///
    /// Timers fire from [`fire_timers`](Self::fire_timers). Disposing the
    /// returned handle cancels the timer if it has not fired yet. Negative
    /// and non-finite delays are treated as zero.
    pub fn set_timeout(&self, delay_ms: f64, f: impl FnOnce(f64) + 'static) -> Disposer {
        let delay = if delay_ms.is_finite() && delay_ms > 0.0 {
            delay_ms
        } else {
            0.0
        };
        let deadline = self.now() + delay;
        let id = self
            .shared
            .timers
            .borrow_mut()
            .insert(deadline, Box::new(f));
        self.shared.host.request_timer(deadline);

        let shared = self.downgrade();
        Disposer::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.timers.borrow_mut().cancel(id);
            }
        })
    }

    /// Fires every timer whose deadline has passed.
    ///
    /// Timers scheduled by a firing callback are not run in the same call,
    /// even with a zero delay. Returns the number of timers fired.
    pub fn fire_timers(&self) -> usize {
        let now = self.shared.host.now();
        let limit = self.shared.timers.borrow().next_id();
        let mut fired = 0;
        loop {
            let due = self.shared.timers.borrow_mut().pop_due(now, limit);
            let Some(callback) = due else {
                break;
            };
            callback(now);
            fired += 1;
        }
        #[cfg(feature = "tracing")]
        if fired > 0 {
            tracing::debug!(fired, remaining = self.timer_count(), "timers fired");
        }
        fired
    }

    /// Returns the number of timers that have neither fired nor been
    /// cancelled.
    #[must_use]
    pub fn timer_count(&self) -> usize {
        self.shared.timers.borrow().len()
    }

    /// Returns the earliest pending timer deadline.
    #[must_use]
    pub fn next_timer_deadline(&self) -> Option<f64> {
        self.shared.timers.borrow().next_deadline()
    }

    fn enqueue(&self, lane: Lane, callback: FrameCallback) {
        self.shared.lanes.borrow_mut().lane_mut(lane).push_back(callback);
    }

    fn pop(&self, lane: Lane) -> Option<FrameCallback> {
        self.shared.lanes.borrow_mut().lane_mut(lane).pop_front()
    }

    fn request_frame(&self) {
        if !self.shared.frame_pending.replace(true) {
            self.shared.host.request_frame();
        }
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("next", &self.pending(Lane::Next))
            .field("read", &self.pending(Lane::Read))
            .field("write", &self.pending(Lane::Write))
            .field("idle", &self.pending(Lane::Idle))
            .field("frame_pending", &self.is_frame_pending())
            .field("timers", &self.timer_count())
            .finish_non_exhaustive()
    }
}
