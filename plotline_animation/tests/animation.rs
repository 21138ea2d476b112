// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration tests for the animation lifecycle on a simulated clock.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use peniko::Color;
use plotline_animation::{
    Animatable, Animation, AnimationEvent, AnimationEventKind, AnimationOption, Animator,
    PropertyAccess, Value, easing,
};
use plotline_disposer::{Dispose, Disposer};
use plotline_events::Handler;
use plotline_scheduler::{FrameScheduler, ManualHost, SchedulerConfig};

#[derive(Default)]
struct Node {
    props: HashMap<String, Value>,
    animations: Vec<Animation>,
}

impl PropertyAccess for Node {
    fn get_property(&self, name: &str) -> Option<Value> {
        self.props.get(name).cloned()
    }

    fn set_property(&mut self, name: &str, value: Value) {
        self.props.insert(name.to_string(), value);
    }
}

impl Animatable for Node {
    fn animations(&self) -> &[Animation] {
        &self.animations
    }

    fn animations_mut(&mut self) -> &mut Vec<Animation> {
        &mut self.animations
    }
}

fn node(props: &[(&str, Value)]) -> Rc<RefCell<Node>> {
    let mut node = Node::default();
    for (name, value) in props {
        node.props.insert((*name).to_string(), value.clone());
    }
    Rc::new(RefCell::new(node))
}

fn prop(node: &Rc<RefCell<Node>>, name: &str) -> Option<Value> {
    node.borrow().get_property(name)
}

/// A 10 ms frame clock starting at zero.
fn rig() -> (ManualHost, Animator) {
    let host = ManualHost::new(SchedulerConfig::new().with_frame_interval(10.0));
    let animator = Animator::new(FrameScheduler::new(host.clone()));
    (host, animator)
}

fn steps(host: &ManualHost, animator: &Animator, n: usize) {
    for _ in 0..n {
        host.step(animator.scheduler());
    }
}

fn linear(
    animator: &Animator,
    target: &Rc<RefCell<Node>>,
    options: Vec<AnimationOption>,
    duration: f64,
) -> Animation {
    let animation = Animation::new(animator, target, options, duration);
    animation.easing(easing::linear);
    animation
}

fn count(animation: &Animation, kind: AnimationEventKind) -> (Rc<Cell<u32>>, Disposer) {
    let seen = Rc::new(Cell::new(0));
    let disposer = {
        let seen = seen.clone();
        animation
            .events()
            .on(
                kind,
                Handler::new(move |_: &AnimationEvent| seen.set(seen.get() + 1)),
                None,
                true,
            )
            .unwrap()
    };
    (seen, disposer)
}

#[test]
fn end_writes_the_exact_end_value() {
    let (_host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let animation = linear(
        &animator,
        &target,
        vec![AnimationOption::new("x", 100.0).from(0.0)],
        1000.0,
    );
    let (ended, _sub) = count(&animation, AnimationEventKind::Ended);
    animation.start();
    animation.end();

    assert_eq!(prop(&target, "x"), Some(Value::Number(100.0)));
    assert!(animation.is_finished());
    assert_eq!(ended.get(), 1);
    assert!(target.borrow().animations.is_empty());
    assert_eq!(animator.running_count(), 0);
}

#[test]
fn frames_advance_with_the_clock_and_finish_exactly() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let animation = linear(&animator, &target, vec![AnimationOption::new("x", 0.3)], 100.0);
    animation.start();
    assert!(animator.is_running(&animation));

    steps(&host, &animator, 5);
    let Some(Value::Number(x)) = prop(&target, "x") else {
        panic!("x is not a number");
    };
    assert!((x - 0.15).abs() < 1e-12);

    host.run_until_idle(animator.scheduler(), 100);
    assert_eq!(prop(&target, "x"), Some(Value::Number(0.3)));
    assert!(animation.is_finished());
    assert!(!host.frame_requested());
}

#[test]
fn starting_on_the_same_property_kills_the_older_animation() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let a = linear(&animator, &target, vec![AnimationOption::new("x", 100.0)], 1000.0);
    a.start();
    steps(&host, &animator, 2);

    let b = linear(&animator, &target, vec![AnimationOption::new("x", 0.0)], 1000.0);
    b.start();
    assert!(a.is_finished());
    assert!(!b.is_finished());
    assert_eq!(target.borrow().animations, [b.clone()]);
    assert!(!animator.is_running(&a));
}

#[test]
fn partial_overlap_only_removes_the_shared_property() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0)), ("y", Value::Number(0.0))]);
    let a = linear(
        &animator,
        &target,
        vec![AnimationOption::new("x", 100.0), AnimationOption::new("y", 100.0)],
        100.0,
    );
    a.start();
    let b = linear(&animator, &target, vec![AnimationOption::new("x", -100.0)], 100.0);
    b.start();

    assert!(!a.is_finished());
    let remaining = a.options();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].property(), "y");

    steps(&host, &animator, 5);
    assert_eq!(prop(&target, "x"), Some(Value::Number(-50.0)));
    assert_eq!(prop(&target, "y"), Some(Value::Number(50.0)));
}

#[test]
fn delayed_animations_are_exempt_until_they_start() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let delayed = linear(&animator, &target, vec![AnimationOption::new("x", 100.0)], 100.0);
    delayed.delay(50.0);
    assert!(delayed.is_delayed());

    let running = linear(&animator, &target, vec![AnimationOption::new("x", 10.0)], 1000.0);
    running.start();
    assert!(!delayed.is_finished());

    steps(&host, &animator, 5);
    assert!(!delayed.is_delayed());
    assert!(delayed.is_running());
    assert!(running.is_finished());
}

#[test]
fn delay_defers_start_and_pause_cancels_it() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let animation = linear(&animator, &target, vec![AnimationOption::new("x", 100.0)], 100.0);
    let (started, _sub) = count(&animation, AnimationEventKind::Started);
    animation.delay(50.0);

    steps(&host, &animator, 4);
    assert_eq!(started.get(), 0);
    steps(&host, &animator, 1);
    assert_eq!(started.get(), 1);
    steps(&host, &animator, 5);
    assert_eq!(prop(&target, "x"), Some(Value::Number(50.0)));

    let cancelled = linear(&animator, &target, vec![AnimationOption::new("y", 1.0)], 10.0);
    cancelled.delay(20.0).pause();
    steps(&host, &animator, 5);
    assert!(cancelled.is_paused());
    assert_eq!(prop(&target, "y"), None);
    assert_eq!(animator.scheduler().timer_count(), 0);
}

#[test]
fn loops_restart_from_zero() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let animation = linear(&animator, &target, vec![AnimationOption::new("x", 10.0)], 100.0);
    let (started, _s) = count(&animation, AnimationEventKind::Started);
    let (ended, _e) = count(&animation, AnimationEventKind::Ended);
    animation.loop_count(Some(2)).start();

    steps(&host, &animator, 15);
    assert_eq!(started.get(), 2);
    assert_eq!(prop(&target, "x"), Some(Value::Number(5.0)));

    host.run_until_idle(animator.scheduler(), 100);
    assert_eq!(started.get(), 3);
    assert_eq!(ended.get(), 1);
    assert_eq!(prop(&target, "x"), Some(Value::Number(10.0)));
}

#[test]
fn non_interpolable_values_switch_at_the_midpoint() {
    let (host, animator) = rig();
    let target = node(&[("visible", Value::Bool(false)), ("label", "a".into())]);
    let animation = linear(
        &animator,
        &target,
        vec![
            AnimationOption::new("visible", true),
            AnimationOption::new("label", "b"),
        ],
        100.0,
    );
    animation.start();

    steps(&host, &animator, 4);
    assert_eq!(prop(&target, "visible"), Some(Value::Bool(false)));
    assert_eq!(prop(&target, "label"), Some("a".into()));
    steps(&host, &animator, 1);
    assert_eq!(prop(&target, "visible"), Some(Value::Bool(true)));
    assert_eq!(prop(&target, "label"), Some("b".into()));
}

#[test]
fn explicit_start_of_a_discrete_option_is_written_on_start() {
    let (host, animator) = rig();
    let target = node(&[("label", "current".into())]);
    let animation = linear(
        &animator,
        &target,
        vec![AnimationOption::new("label", "end").from("begin")],
        100.0,
    );
    let (progressed, _guard) = count(&animation, AnimationEventKind::Progress);

    animation.start();
    assert_eq!(prop(&target, "label"), Some("begin".into()));
    assert_eq!(progressed.get(), 0);

    steps(&host, &animator, 5);
    assert_eq!(prop(&target, "label"), Some("end".into()));
}

#[test]
fn number_target_over_percent_reads_the_pixel_hybrid() {
    let (host, animator) = rig();
    let target = node(&[
        ("width", Value::Percent(50.0)),
        ("pixelWidth", Value::Number(200.0)),
    ]);
    linear(&animator, &target, vec![AnimationOption::new("width", 400.0)], 100.0).start();
    steps(&host, &animator, 5);
    assert_eq!(prop(&target, "width"), Some(Value::Number(300.0)));
}

#[test]
fn percent_target_over_number_reads_the_relative_hybrid() {
    let (host, animator) = rig();
    let target = node(&[
        ("width", Value::Number(120.0)),
        ("relativeWidth", Value::Number(0.5)),
    ]);
    linear(
        &animator,
        &target,
        vec![AnimationOption::new("width", Value::Percent(100.0))],
        100.0,
    )
    .start();
    steps(&host, &animator, 5);
    assert_eq!(prop(&target, "width"), Some(Value::Percent(75.0)));
}

#[test]
fn missing_hybrid_falls_back_to_switching() {
    let (host, animator) = rig();
    let target = node(&[("height", Value::Percent(50.0))]);
    linear(&animator, &target, vec![AnimationOption::new("height", 10.0)], 100.0).start();
    steps(&host, &animator, 2);
    assert_eq!(prop(&target, "height"), Some(Value::Percent(50.0)));
    steps(&host, &animator, 3);
    assert_eq!(prop(&target, "height"), Some(Value::Number(10.0)));
}

#[test]
fn colors_and_children() {
    let (host, animator) = rig();
    let black = Color::new([0.0, 0.0, 0.0, 1.0]);
    let white = Color::new([1.0, 1.0, 1.0, 1.0]);
    let target = node(&[("fill", Value::Color(black))]);
    let label = node(&[("x", Value::Number(0.0))]);

    linear(
        &animator,
        &target,
        vec![
            AnimationOption::new("fill", white),
            AnimationOption::new("x", 20.0).child(label.clone()),
        ],
        100.0,
    )
    .start();
    steps(&host, &animator, 5);

    assert_eq!(
        prop(&target, "fill"),
        Some(Value::Color(Color::new([0.5, 0.5, 0.5, 1.0])))
    );
    assert_eq!(prop(&label, "x"), Some(Value::Number(10.0)));
    assert_eq!(prop(&target, "x"), None);
}

#[test]
fn custom_interpolation() {
    let (host, animator) = rig();
    let target = node(&[]);
    linear(
        &animator,
        &target,
        vec![
            AnimationOption::new("state", "done")
                .from("idle")
                .update_with(|_, to, p| if p < 1.0 { "moving".into() } else { to.clone() }),
        ],
        20.0,
    )
    .start();
    steps(&host, &animator, 1);
    assert_eq!(prop(&target, "state"), Some("moving".into()));
    steps(&host, &animator, 1);
    assert_eq!(prop(&target, "state"), Some("done".into()));
}

#[test]
fn pause_freezes_and_resume_continues() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let animation = linear(&animator, &target, vec![AnimationOption::new("x", 100.0)], 100.0);
    animation.start();
    steps(&host, &animator, 3);
    animation.pause();
    steps(&host, &animator, 3);
    assert_eq!(prop(&target, "x"), Some(Value::Number(30.0)));

    animation.resume();
    steps(&host, &animator, 1);
    assert_eq!(prop(&target, "x"), Some(Value::Number(40.0)));
}

#[test]
fn stop_leaves_values_and_reports_progress() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let animation = linear(&animator, &target, vec![AnimationOption::new("x", 100.0)], 100.0);
    let progress = Rc::new(Cell::new(f64::NAN));
    let _sub = {
        let progress = progress.clone();
        animation
            .events()
            .on(
                AnimationEventKind::Stopped,
                Handler::new(move |e: &AnimationEvent| progress.set(e.progress())),
                None,
                true,
            )
            .unwrap()
    };
    animation.start();
    steps(&host, &animator, 2);
    animation.stop();
    steps(&host, &animator, 5);

    assert!(animation.is_finished());
    assert_eq!(progress.get(), 0.2);
    assert_eq!(prop(&target, "x"), Some(Value::Number(20.0)));
}

#[test]
fn dispose_kills_and_releases() {
    let (host, animator) = rig();
    let target = node(&[("x", Value::Number(0.0))]);
    let animation = linear(&animator, &target, vec![AnimationOption::new("x", 100.0)], 100.0);
    animation.delay(30.0);
    animation.dispose().unwrap();

    assert!(animation.is_disposed());
    assert!(animation.is_finished());
    assert!(target.borrow().animations.is_empty());
    assert_eq!(animator.scheduler().timer_count(), 0);

    animation.start();
    steps(&host, &animator, 5);
    assert_eq!(prop(&target, "x"), Some(Value::Number(0.0)));
}
