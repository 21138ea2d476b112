// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotline Animation: frame-driven property interpolation.
//!
//! An [`Animation`] moves one or more named properties of a target from
//! their current values to new ones over a duration, shaped by an
//! [easing](easing) function. An [`Animator`] advances every running
//! animation on the scheduler's `next` lane.
//!
//! - [`PropertyAccess`]: read and write properties by name.
//! - [`Animatable`]: a property owner that also tracks its animations.
//! - [`Value`]: numbers, percents, colors and points interpolate; other
//!   values switch at the halfway mark.
//! - [`AnimationOption`]: one property to animate, with optional explicit
//!   start value, child object and custom interpolation.
//! - [`AnimationEvent`]: started, progress, ended and stopped
//!   notifications.
//!
//! Animations support delays, pausing, looping, and stopping or ending
//! early. Starting an animation takes its properties away from any other
//! running animation on the same target.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use plotline_animation::{
//!     Animatable, Animation, AnimationOption, Animator, PropertyAccess, Value, easing,
//! };
//! use plotline_scheduler::{FrameScheduler, ManualHost, SchedulerConfig};
//!
//! #[derive(Default)]
//! struct Dot {
//!     x: f64,
//!     animations: Vec<Animation>,
//! }
//!
//! impl PropertyAccess for Dot {
//!     fn get_property(&self, name: &str) -> Option<Value> {
//!         (name == "x").then_some(Value::Number(self.x))
//!     }
//!     fn set_property(&mut self, name: &str, value: Value) {
//!         if let ("x", Value::Number(x)) = (name, value) {
//!             self.x = x;
//!         }
//!     }
//! }
//!
//! impl Animatable for Dot {
//!     fn animations(&self) -> &[Animation] {
//!         &self.animations
//!     }
//!     fn animations_mut(&mut self) -> &mut Vec<Animation> {
//!         &mut self.animations
//!     }
//! }
//!
//! let host = ManualHost::new(SchedulerConfig::new().with_frame_interval(10.0));
//! let animator = Animator::new(FrameScheduler::new(host.clone()));
//! let dot = Rc::new(RefCell::new(Dot::default()));
//!
//! let slide = Animation::new(&animator, &dot, vec![AnimationOption::new("x", 100.0)], 100.0);
//! slide.easing(easing::linear).start();
//!
//! host.step(animator.scheduler()); // t = 10
//! assert_eq!(dot.borrow().x, 10.0);
//!
//! host.run_until_idle(animator.scheduler(), 100);
//! assert_eq!(dot.borrow().x, 100.0);
//! assert!(slide.is_finished());
//! ```

#![no_std]

extern crate alloc;

mod animation;
mod animator;
pub mod easing;
mod option;
mod property;
mod value;

pub use animation::{Animation, AnimationEvent, AnimationEventKind};
pub use animator::Animator;
pub use option::{AnimationOption, UpdateFn};
pub use property::{Animatable, PropertyAccess};
pub use value::{Value, lerp_color, lerp_f64};
