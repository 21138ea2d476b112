// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host integration: clocks and frame requests.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use crate::scheduler::{FrameScheduler, FrameStats};

/// Frame interval used when the host has no animation-frame source (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// The environment a [`FrameScheduler`] runs in.
///
/// The scheduler never blocks and never spawns anything. It asks the host for
/// a frame, and the host later calls [`FrameScheduler::run_frame`] (typically
/// from an animation-frame callback, or from a timer at
/// [`DEFAULT_FRAME_INTERVAL_MS`] when no such callback exists).
pub trait FrameHost {
    /// Returns the current time in milliseconds.
    ///
    /// The origin is arbitrary but must be monotonic.
    fn now(&self) -> f64;

    /// Asks the host to call [`FrameScheduler::run_frame`] once, soon.
    ///
    /// The scheduler only calls this while no frame is pending, so hosts do
    /// not need to deduplicate requests.
    fn request_frame(&self);

    /// Asks the host to call [`FrameScheduler::fire_timers`] at or after
    /// `deadline` (milliseconds, same clock as [`now`](Self::now)).
    ///
    /// Hosts that poll timers on every frame can ignore this.
    fn request_timer(&self, deadline: f64) {
        let _ = deadline;
    }
}

/// Configuration for hosts that drive frames themselves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Time between frames in milliseconds.
    pub frame_interval_ms: f64,
}

impl SchedulerConfig {
    /// Creates the default configuration (60 frames per second).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }

    /// Sets the frame interval in milliseconds.
    #[must_use]
    pub const fn with_frame_interval(mut self, frame_interval_ms: f64) -> Self {
        self.frame_interval_ms = frame_interval_ms;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct ManualState {
    now: Cell<f64>,
    frame_requested: Cell<bool>,
    frame_requests: Cell<u32>,
    config: SchedulerConfig,
}

/// A deterministic host with a hand-driven clock.
///
/// `ManualHost` records frame requests instead of acting on them. The caller
/// advances time and runs frames explicitly, which makes it suitable for
/// headless embedding and tests.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use plotline_scheduler::{FrameScheduler, ManualHost, SchedulerConfig};
///
/// let host = ManualHost::new(SchedulerConfig::new().with_frame_interval(10.0));
/// let scheduler = FrameScheduler::new(host.clone());
///
/// let seen = Rc::new(Cell::new(None));
/// {
///     let seen = seen.clone();
///     scheduler.write_frame(move |now| seen.set(Some(now)));
/// }
/// assert!(host.frame_requested());
///
/// host.step(&scheduler);
/// assert_eq!(seen.get(), Some(10.0));
/// assert!(!host.frame_requested());
/// ```
#[derive(Clone)]
pub struct ManualHost {
    state: Rc<ManualState>,
}

impl ManualHost {
    /// Creates a host whose clock starts at zero.
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            state: Rc::new(ManualState {
                now: Cell::new(0.0),
                frame_requested: Cell::new(false),
                frame_requests: Cell::new(0),
                config,
            }),
        }
    }

    /// Returns the configuration this host was created with.
    #[must_use]
    pub fn config(&self) -> SchedulerConfig {
        self.state.config
    }

    /// Sets the clock to `now` milliseconds.
    pub fn set_now(&self, now: f64) {
        self.state.now.set(now);
    }

    /// Moves the clock forward by `ms` milliseconds.
    pub fn advance(&self, ms: f64) {
        self.state.now.set(self.state.now.get() + ms);
    }

    /// Returns `true` if the scheduler asked for a frame that has not run yet.
    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.state.frame_requested.get()
    }

    /// Returns how many frames the scheduler has requested so far.
    #[must_use]
    pub fn frame_requests(&self) -> u32 {
        self.state.frame_requests.get()
    }

    /// Advances one frame interval, fires due timers and runs the requested
    /// frame, if any.
    pub fn step(&self, scheduler: &FrameScheduler) -> Option<FrameStats> {
        self.advance(self.state.config.frame_interval_ms);
        scheduler.fire_timers();
        if self.state.frame_requested.replace(false) {
            Some(scheduler.run_frame())
        } else {
            None
        }
    }

    /// Steps until no frame is requested and no timer is pending, or until
    /// `max_steps` steps have run. Returns the number of steps taken.
    pub fn run_until_idle(&self, scheduler: &FrameScheduler, max_steps: usize) -> usize {
        let mut steps = 0;
        while steps < max_steps && (self.frame_requested() || scheduler.timer_count() > 0) {
            self.step(scheduler);
            steps += 1;
        }
        steps
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl FrameHost for ManualHost {
    fn now(&self) -> f64 {
        self.state.now.get()
    }

    fn request_frame(&self) {
        self.state.frame_requested.set(true);
        self.state
            .frame_requests
            .set(self.state.frame_requests.get() + 1);
    }
}

impl fmt::Debug for ManualHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualHost")
            .field("now", &self.state.now.get())
            .field("frame_requested", &self.state.frame_requested.get())
            .field("frame_requests", &self.state.frame_requests.get())
            .field("config", &self.state.config)
            .finish()
    }
}
