// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation state machine.

use alloc::borrow::Cow;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use plotline_disposer::{Dispose, DisposeError, MutableValueDisposer};
use plotline_events::{Event, EventDispatcher};
use smallvec::SmallVec;

use crate::animator::Animator;
use crate::easing;
use crate::option::{AnimationOption, UpdateFn};
use crate::property::{Animatable, PropertyAccess};
use crate::value::Value;

/// Lifecycle notifications, each carrying the progress at the time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnimationEvent {
    /// The animation (re)started, including each loop.
    Started {
        /// Always `0.0`.
        progress: f64,
    },
    /// New values were written.
    Progress {
        /// Eased progress.
        progress: f64,
    },
    /// The animation reached its end and will not loop again.
    Ended {
        /// Always `1.0`.
        progress: f64,
    },
    /// The animation was stopped before reaching its end.
    Stopped {
        /// Progress when stopped.
        progress: f64,
    },
}

/// Kinds of [`AnimationEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimationEventKind {
    /// [`AnimationEvent::Started`].
    Started,
    /// [`AnimationEvent::Progress`].
    Progress,
    /// [`AnimationEvent::Ended`].
    Ended,
    /// [`AnimationEvent::Stopped`].
    Stopped,
}

impl Event for AnimationEvent {
    type Kind = AnimationEventKind;

    fn kind(&self) -> AnimationEventKind {
        match self {
            Self::Started { .. } => AnimationEventKind::Started,
            Self::Progress { .. } => AnimationEventKind::Progress,
            Self::Ended { .. } => AnimationEventKind::Ended,
            Self::Stopped { .. } => AnimationEventKind::Stopped,
        }
    }
}

impl AnimationEvent {
    /// The progress carried by the event.
    #[must_use]
    pub fn progress(&self) -> f64 {
        match *self {
            Self::Started { progress }
            | Self::Progress { progress }
            | Self::Ended { progress }
            | Self::Stopped { progress } => progress,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Created,
    Delayed,
    Running,
    Paused,
    Finished,
}

/// How an option's value moves, chosen once per start.
#[derive(Clone)]
enum Interpolation {
    Number,
    Percent,
    Color,
    Point,
    Custom(UpdateFn),
}

struct Active {
    option: AnimationOption,
    from: Value,
    interpolation: Interpolation,
}

impl Active {
    fn value_at(&self, progress: f64) -> Value {
        let to = &self.option.to;
        match &self.interpolation {
            Interpolation::Custom(update) => update(&self.from, to, progress),
            Interpolation::Number
            | Interpolation::Percent
            | Interpolation::Color
            | Interpolation::Point => self
                .from
                .lerp(to, progress)
                .unwrap_or_else(|| to.clone()),
        }
    }
}

/// An option that cannot be interpolated and switches at the midpoint.
struct Discrete {
    option: AnimationOption,
}

impl Discrete {
    fn value_at(&self, progress: f64) -> Option<Value> {
        if progress >= 0.5 {
            Some(self.option.to.clone())
        } else {
            self.option.from.clone()
        }
    }
}

struct State {
    options: Vec<AnimationOption>,
    active: Vec<Active>,
    discrete: Vec<Discrete>,
    duration: f64,
    easing: Rc<dyn Fn(f64) -> f64>,
    start_time: f64,
    elapsed: f64,
    progress: f64,
    loops: Option<u32>,
    started: bool,
    phase: Phase,
}

struct Inner {
    target: Weak<RefCell<dyn Animatable>>,
    animator: Animator,
    state: RefCell<State>,
    events: EventDispatcher<AnimationEvent>,
    delay: MutableValueDisposer<()>,
    disposed: Cell<bool>,
}

type Write = (Option<Rc<RefCell<dyn PropertyAccess>>>, Cow<'static, str>, Value);

/// A running interpolation of one or more properties.
///
/// An animation is bound to a target when it is created. Starting it reads
/// the missing start values off the target, decides how each property
/// moves, takes over any property another running animation on the same
/// target was driving, and registers with the [`Animator`]. From then on
/// every frame writes new values until the animation ends.
///
/// At most one animation drives a given property of a given object: the one
/// started last.
///
/// `Animation` is a cheap handle; clones refer to the same animation.
///
/// # Panics
///
/// Values are written with the target mutably borrowed. A target whose
/// `set_property` reaches back into its own `RefCell` panics.
#[derive(Clone)]
pub struct Animation {
    inner: Rc<Inner>,
}

impl Animation {
    /// Creates a stopped animation of `options` on `target`.
    ///
    /// `duration` is in milliseconds; a negative or NaN duration is treated
    /// as zero, which ends the animation as soon as it starts. The easing
    /// defaults to [`easing::cubic_out`] and the animation plays once.
    pub fn new<T: Animatable + 'static>(
        animator: &Animator,
        target: &Rc<RefCell<T>>,
        options: Vec<AnimationOption>,
        duration: f64,
    ) -> Self {
        let target: Rc<RefCell<dyn Animatable>> = target.clone();
        Self {
            inner: Rc::new(Inner {
                target: Rc::downgrade(&target),
                animator: animator.clone(),
                state: RefCell::new(State {
                    options,
                    active: Vec::new(),
                    discrete: Vec::new(),
                    duration: if duration > 0.0 { duration } else { 0.0 },
                    easing: Rc::new(easing::cubic_out),
                    start_time: 0.0,
                    elapsed: 0.0,
                    progress: 0.0,
                    loops: Some(0),
                    started: false,
                    phase: Phase::Created,
                }),
                events: EventDispatcher::new(),
                delay: MutableValueDisposer::new(),
                disposed: Cell::new(false),
            }),
        }
    }

    /// Sets the easing function.
    pub fn easing(&self, easing: impl Fn(f64) -> f64 + 'static) -> &Self {
        self.inner.state.borrow_mut().easing = Rc::new(easing);
        self
    }

    /// Plays the animation `count` more times after the first run, or
    /// forever when `count` is `None`.
    pub fn loop_count(&self, count: Option<u32>) -> &Self {
        self.inner.state.borrow_mut().loops = count;
        self
    }

    /// Lifecycle events.
    #[must_use]
    pub fn events(&self) -> &EventDispatcher<AnimationEvent> {
        &self.inner.events
    }

    /// The animator driving this animation.
    #[must_use]
    pub fn animator(&self) -> &Animator {
        &self.inner.animator
    }

    /// Duration in milliseconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.inner.state.borrow().duration
    }

    /// The last eased progress written.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.inner.state.borrow().progress
    }

    /// The properties this animation drives.
    #[must_use]
    pub fn options(&self) -> Vec<AnimationOption> {
        self.inner.state.borrow().options.clone()
    }

    /// Returns `true` once the animation ended, was stopped or killed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    /// Returns `true` while a [`delay`](Self::delay) is pending.
    #[must_use]
    pub fn is_delayed(&self) -> bool {
        self.phase() == Phase::Delayed
    }

    /// Returns `true` while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase() == Phase::Paused
    }

    /// Returns `true` while advancing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Returns `true` if both handles refer to the same animation.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn phase(&self) -> Phase {
        self.inner.state.borrow().phase
    }

    fn set_phase(&self, phase: Phase) {
        self.inner.state.borrow_mut().phase = phase;
    }

    fn emit(&self, event: AnimationEvent) {
        if self.inner.events.is_enabled(event.kind()) {
            let _ = self.inner.events.dispatch_immediately(&event);
        }
    }

    /// Starts (or restarts) from progress zero.
    ///
    /// Any animation on the same target that drives one of this animation's
    /// properties gives that property up first. Starting a disposed
    /// animation, or one whose target is gone, does nothing.
    pub fn start(&self) -> &Self {
        if self.inner.disposed.get() {
            return self;
        }
        let _ = self.inner.delay.reset();
        let Some(target) = self.inner.target.upgrade() else {
            self.kill();
            return self;
        };

        self.stop_same_animations();
        self.attach(&target);

        let now = self.inner.animator.now();
        let immediate = {
            let target = target.borrow();
            let mut state = self.inner.state.borrow_mut();
            let (active, discrete) = classify(&*target, &mut state.options);
            state.active = active;
            state.discrete = discrete;
            state.start_time = now;
            state.elapsed = 0.0;
            state.progress = 0.0;
            state.started = true;
            state.phase = Phase::Running;
            state.duration <= 0.0 || (state.active.is_empty() && state.discrete.is_empty())
        };

        self.apply_static_options();
        #[cfg(feature = "tracing")]
        tracing::debug!(duration = self.duration(), "animation started");
        self.inner.animator.register(self);
        self.emit(AnimationEvent::Started { progress: 0.0 });
        if immediate {
            self.end();
        }
        self
    }

    /// Starts after `ms` milliseconds.
    ///
    /// Until then the animation is delayed: it does not take over
    /// properties from other animations, and others do not take over its
    /// properties. A non-positive or NaN delay starts immediately.
    pub fn delay(&self, ms: f64) -> &Self {
        if self.inner.disposed.get() {
            return self;
        }
        if ms.is_nan() || ms <= 0.0 {
            return self.start();
        }
        self.inner.animator.unregister(self);
        if let Some(target) = self.inner.target.upgrade() {
            self.attach(&target);
        }
        self.set_phase(Phase::Delayed);

        let weak = Rc::downgrade(&self.inner);
        let timer = self.inner.animator.scheduler().set_timeout(ms, move |_now| {
            if let Some(inner) = weak.upgrade() {
                Self { inner }.start();
            }
        });
        let _ = self.inner.delay.set(None, Some(timer));
        self
    }

    /// Freezes the animation where it is. A pending delay is cancelled.
    pub fn pause(&self) -> &Self {
        if matches!(self.phase(), Phase::Running | Phase::Delayed) {
            let _ = self.inner.delay.reset();
            self.inner.animator.unregister(self);
            self.set_phase(Phase::Paused);
        }
        self
    }

    /// Continues a paused animation from where it was paused.
    ///
    /// An animation paused before it ever started starts now.
    pub fn resume(&self) -> &Self {
        if self.phase() != Phase::Paused {
            return self;
        }
        let started = self.inner.state.borrow().started;
        if !started {
            return self.start();
        }
        let now = self.inner.animator.now();
        {
            let mut state = self.inner.state.borrow_mut();
            state.start_time = now - state.elapsed;
            state.phase = Phase::Running;
        }
        self.inner.animator.register(self);
        self
    }

    /// Finishes early, leaving properties at their current values, and
    /// emits [`AnimationEvent::Stopped`].
    pub fn stop(&self) {
        if self.is_finished() {
            return;
        }
        let progress = self.progress();
        self.kill();
        self.emit(AnimationEvent::Stopped { progress });
    }

    /// Finishes early without emitting anything.
    pub fn kill(&self) {
        if self.is_finished() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(progress = self.progress(), "animation killed");
        self.set_phase(Phase::Finished);
        self.detach();
    }

    /// Jumps to the end.
    ///
    /// With loops remaining the animation restarts instead. Otherwise the
    /// end values are written, the animation finishes and
    /// [`AnimationEvent::Ended`] is emitted. An animation with zero duration
    /// or nothing to animate never loops.
    pub fn end(&self) {
        if self.is_finished() || self.inner.disposed.get() {
            return;
        }
        let restart = {
            let mut state = self.inner.state.borrow_mut();
            let can_loop = state.duration > 0.0 && !state.options.is_empty();
            match state.loops {
                _ if !can_loop => false,
                None => true,
                Some(0) => false,
                Some(n) => {
                    state.loops = Some(n - 1);
                    true
                }
            }
        };
        if restart {
            #[cfg(feature = "tracing")]
            tracing::debug!("animation looping");
            self.start();
            return;
        }

        self.set_progress(1.0);
        self.set_phase(Phase::Finished);
        self.detach();
        #[cfg(feature = "tracing")]
        tracing::debug!("animation ended");
        self.emit(AnimationEvent::Ended { progress: 1.0 });
    }

    /// Writes the values for eased `progress` and emits
    /// [`AnimationEvent::Progress`].
    ///
    /// Interpolated properties land exactly on their end value at `1.0`.
    /// Properties that cannot be interpolated hold their start value below
    /// `0.5` and switch to the end value from there on.
    pub fn set_progress(&self, progress: f64) {
        let writes: SmallVec<[Write; 4]> = {
            let mut state = self.inner.state.borrow_mut();
            state.progress = progress;
            let active = state.active.iter().map(|a| {
                (
                    a.option.child.clone(),
                    a.option.property.clone(),
                    a.value_at(progress),
                )
            });
            let discrete = state.discrete.iter().filter_map(|d| {
                d.value_at(progress)
                    .map(|v| (d.option.child.clone(), d.option.property.clone(), v))
            });
            active.chain(discrete).collect()
        };
        self.write(writes);
        self.emit(AnimationEvent::Progress { progress });
    }

    /// Writes the values of the options that cannot be interpolated for the
    /// current progress, without emitting anything.
    ///
    /// A discrete option with an explicit start value takes it as soon as
    /// the animation starts rather than on the first frame.
    fn apply_static_options(&self) {
        let writes: SmallVec<[Write; 4]> = {
            let state = self.inner.state.borrow();
            state
                .discrete
                .iter()
                .filter_map(|d| {
                    d.value_at(state.progress)
                        .map(|v| (d.option.child.clone(), d.option.property.clone(), v))
                })
                .collect()
        };
        self.write(writes);
    }

    fn write(&self, writes: SmallVec<[Write; 4]>) {
        let target = self.inner.target.upgrade();
        for (child, property, value) in writes {
            match (child, &target) {
                (Some(child), _) => child.borrow_mut().set_property(&property, value),
                (None, Some(target)) => target.borrow_mut().set_property(&property, value),
                (None, None) => {}
            }
        }
    }

    /// Advances to time `now` (milliseconds on the animator's clock).
    ///
    /// Called by the [`Animator`] once per frame; does nothing unless the
    /// animation is running. Reaching the full duration ends the animation.
    pub fn update(&self, now: f64) {
        let (fraction, easing) = {
            let mut state = self.inner.state.borrow_mut();
            if state.phase != Phase::Running {
                return;
            }
            let elapsed = (now - state.start_time).clamp(0.0, state.duration);
            state.elapsed = elapsed;
            let fraction = if state.duration > 0.0 {
                elapsed / state.duration
            } else {
                1.0
            };
            (fraction, state.easing.clone())
        };

        let mut progress = easing(fraction);
        if fraction >= 1.0 || !progress.is_finite() {
            progress = 1.0;
        }
        self.set_progress(progress);

        // Rounded so that floating point error cannot stall the last frame.
        if (fraction * 1e6).round() / 1e6 >= 1.0 {
            self.end();
        }
    }

    /// Takes this animation's properties away from the other animations on
    /// the same target.
    ///
    /// Delayed and finished animations are left alone. An animation left
    /// with nothing to drive is killed. Returns the number killed.
    pub fn stop_same_animations(&self) -> usize {
        let Some(target) = self.inner.target.upgrade() else {
            return 0;
        };
        let others: SmallVec<[Self; 4]> = target
            .borrow()
            .animations()
            .iter()
            .filter(|a| !a.ptr_eq(self))
            .cloned()
            .collect();
        let mine = self.options();
        let mut killed = 0;
        for other in others {
            if matches!(other.phase(), Phase::Delayed | Phase::Finished) {
                continue;
            }
            if other.give_up(&mine) {
                other.kill();
                killed += 1;
            }
        }
        killed
    }

    /// Drops every option colliding with `taken`; returns `true` if none
    /// remain.
    fn give_up(&self, taken: &[AnimationOption]) -> bool {
        let mut state = self.inner.state.borrow_mut();
        let collides = |option: &AnimationOption| taken.iter().any(|t| t.same_path(option));
        let before = state.options.len();
        state.options.retain(|o| !collides(o));
        state.active.retain(|a| !collides(&a.option));
        state.discrete.retain(|d| !collides(&d.option));
        #[cfg(feature = "tracing")]
        {
            let removed = before - state.options.len();
            if removed > 0 {
                tracing::trace!(removed, "animation gave up properties");
            }
        }
        before > 0 && state.options.is_empty()
    }

    fn attach(&self, target: &Rc<RefCell<dyn Animatable>>) {
        let mut target = target.borrow_mut();
        if !target.animations().iter().any(|a| a.ptr_eq(self)) {
            target.animations_mut().push(self.clone());
        }
    }

    fn detach(&self) {
        let _ = self.inner.delay.reset();
        self.inner.animator.unregister(self);
        if let Some(target) = self.inner.target.upgrade() {
            target
                .borrow_mut()
                .animations_mut()
                .retain(|a| !a.ptr_eq(self));
        }
    }
}

/// Resolves start values and decides how each option moves.
///
/// Options already at their end value are dropped for good.
fn classify<P: PropertyAccess + ?Sized>(
    target: &P,
    options: &mut Vec<AnimationOption>,
) -> (Vec<Active>, Vec<Discrete>) {
    for option in options.iter_mut() {
        if option.from.is_none() {
            option.from = option.read(target, option.property());
        }
    }
    options.retain(|o| o.from.as_ref() != Some(&o.to));

    let mut active = Vec::new();
    let mut discrete = Vec::new();
    for option in options.iter() {
        match plan(target, option) {
            Some((from, interpolation)) => active.push(Active {
                option: option.clone(),
                from,
                interpolation,
            }),
            None => discrete.push(Discrete {
                option: option.clone(),
            }),
        }
    }
    (active, discrete)
}

fn plan<P: PropertyAccess + ?Sized>(
    target: &P,
    option: &AnimationOption,
) -> Option<(Value, Interpolation)> {
    let from = option.from.clone()?;
    if let Some(update) = &option.update {
        return Some((from, Interpolation::Custom(update.clone())));
    }
    match (&option.to, from) {
        (Value::Number(_), from @ Value::Number(_)) => Some((from, Interpolation::Number)),
        (Value::Number(_), Value::Percent(_)) => {
            let pixels = option.read(target, &hybrid_name("pixel", option.property()))?;
            let pixels = pixels.as_number()?;
            Some((Value::Number(pixels), Interpolation::Number))
        }
        (Value::Percent(_), from @ Value::Percent(_)) => Some((from, Interpolation::Percent)),
        (Value::Percent(_), Value::Number(_)) => {
            let relative = option.read(target, &hybrid_name("relative", option.property()))?;
            let relative = relative.as_number()?;
            Some((Value::Percent(relative * 100.0), Interpolation::Percent))
        }
        (Value::Color(_), from @ Value::Color(_)) => Some((from, Interpolation::Color)),
        (Value::Point(_), from @ Value::Point(_)) => Some((from, Interpolation::Point)),
        _ => None,
    }
}

/// `("pixel", "width")` becomes `"pixelWidth"`.
fn hybrid_name(prefix: &str, property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => String::from(prefix),
    }
}

impl PartialEq for Animation {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Dispose for Animation {
    /// Kills the animation, cancels a pending delay and disposes the event
    /// dispatcher.
    fn dispose(&self) -> Result<(), DisposeError> {
        if self.inner.disposed.replace(true) {
            return Ok(());
        }
        self.kill();
        let errors: Vec<DisposeError> = [self.inner.delay.dispose(), self.inner.events.dispose()]
            .into_iter()
            .filter_map(Result::err)
            .collect();
        DisposeError::combine(errors)
    }

    fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.state.try_borrow() {
            Ok(state) => f
                .debug_struct("Animation")
                .field("phase", &state.phase)
                .field("progress", &state.progress)
                .field("duration", &state.duration)
                .field("loops", &state.loops)
                .field("options", &state.options)
                .finish_non_exhaustive(),
            Err(_) => f.debug_struct("Animation").finish_non_exhaustive(),
        }
    }
}
