// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The registry of running animations.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use plotline_scheduler::FrameScheduler;
use smallvec::SmallVec;

use crate::animation::Animation;
use crate::option::AnimationOption;
use crate::property::Animatable;

struct Shared {
    scheduler: FrameScheduler,
    running: RefCell<Vec<Animation>>,
    armed: Cell<bool>,
}

/// Drives running animations once per frame.
///
/// While at least one animation runs, the animator keeps a callback queued on
/// the scheduler's `next` lane, and each frame it advances every running
/// animation to the frame time. When the last one finishes it stops asking
/// for frames.
///
/// Clones share the same registry.
#[derive(Clone)]
pub struct Animator {
    shared: Rc<Shared>,
}

impl Animator {
    /// Creates an animator driven by `scheduler`.
    #[must_use]
    pub fn new(scheduler: FrameScheduler) -> Self {
        Self {
            shared: Rc::new(Shared {
                scheduler,
                running: RefCell::new(Vec::new()),
                armed: Cell::new(false),
            }),
        }
    }

    /// The scheduler this animator runs on.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.shared.scheduler
    }

    /// The scheduler's current time in milliseconds.
    #[must_use]
    #[inline]
    pub fn now(&self) -> f64 {
        self.shared.scheduler.now()
    }

    /// Creates an animation of `options` on `target` and starts it.
    pub fn animate<T: Animatable + 'static>(
        &self,
        target: &Rc<RefCell<T>>,
        options: Vec<AnimationOption>,
        duration: f64,
    ) -> Animation {
        let animation = Animation::new(self, target, options, duration);
        animation.start();
        animation
    }

    /// Number of animations currently advancing.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.shared.running.borrow().len()
    }

    /// Returns `true` if `animation` is advancing on this animator.
    #[must_use]
    pub fn is_running(&self, animation: &Animation) -> bool {
        self.shared
            .running
            .borrow()
            .iter()
            .any(|a| a.ptr_eq(animation))
    }

    /// Returns `true` if both handles share one registry.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    pub(crate) fn register(&self, animation: &Animation) {
        {
            let mut running = self.shared.running.borrow_mut();
            if !running.iter().any(|a| a.ptr_eq(animation)) {
                running.push(animation.clone());
            }
        }
        self.arm();
    }

    pub(crate) fn unregister(&self, animation: &Animation) {
        self.shared
            .running
            .borrow_mut()
            .retain(|a| !a.ptr_eq(animation));
    }

    fn arm(&self) {
        if self.shared.armed.replace(true) {
            return;
        }
        let weak = Rc::downgrade(&self.shared);
        self.shared.scheduler.next_frame(move |now| {
            if let Some(shared) = weak.upgrade() {
                shared.armed.set(false);
                Self { shared }.tick(now);
            }
        });
    }

    fn tick(&self, now: f64) {
        let running: SmallVec<[Animation; 8]> =
            self.shared.running.borrow().iter().cloned().collect();
        for animation in &running {
            animation.update(now);
        }
        if !self.shared.running.borrow().is_empty() {
            self.arm();
        }
    }
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("running", &self.running_count())
            .field("armed", &self.shared.armed.get())
            .finish_non_exhaustive()
    }
}
