// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use plotline_animation::{
    Animatable, Animation, AnimationOption, Animator, PropertyAccess, Value, easing,
};
use plotline_scheduler::{FrameScheduler, ManualHost, SchedulerConfig};

#[derive(Default)]
struct Dot {
    x: f64,
    y: f64,
    animations: Vec<Animation>,
}

impl PropertyAccess for Dot {
    fn get_property(&self, name: &str) -> Option<Value> {
        match name {
            "x" => Some(Value::Number(self.x)),
            "y" => Some(Value::Number(self.y)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("x", Value::Number(x)) => self.x = x,
            ("y", Value::Number(y)) => self.y = y,
            _ => {}
        }
    }
}

impl Animatable for Dot {
    fn animations(&self) -> &[Animation] {
        &self.animations
    }

    fn animations_mut(&mut self) -> &mut Vec<Animation> {
        &mut self.animations
    }
}

struct Rig {
    host: ManualHost,
    animator: Animator,
    dots: Vec<Rc<RefCell<Dot>>>,
}

fn rig(dots: usize) -> Rig {
    let host = ManualHost::new(SchedulerConfig::new().with_frame_interval(16.0));
    let animator = Animator::new(FrameScheduler::new(host.clone()));
    let dots = (0..dots).map(|_| Rc::new(RefCell::new(Dot::default()))).collect();
    Rig {
        host,
        animator,
        dots,
    }
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("plotline_animation");
    group.sample_size(50);

    for &n in &[16_usize, 256] {
        group.bench_function(format!("run_to_end(dots={n}, 500ms)"), |b| {
            b.iter_batched(
                || {
                    let rig = rig(n);
                    for dot in &rig.dots {
                        let _ = rig.animator.animate(
                            dot,
                            vec![AnimationOption::new("x", 100.0), AnimationOption::new("y", 50.0)],
                            500.0,
                        );
                    }
                    rig
                },
                |rig| {
                    let steps = rig.host.run_until_idle(rig.animator.scheduler(), 1_000);
                    black_box((steps, rig.dots.len()))
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("restart_collisions(dots={n})"), |b| {
            b.iter_batched(
                || {
                    let rig = rig(n);
                    for dot in &rig.dots {
                        let _ = rig
                            .animator
                            .animate(dot, vec![AnimationOption::new("x", 100.0)], 500.0);
                    }
                    rig.host.step(rig.animator.scheduler());
                    rig
                },
                |rig| {
                    for dot in &rig.dots {
                        let _ = rig
                            .animator
                            .animate(dot, vec![AnimationOption::new("x", 0.0)], 500.0);
                    }
                    black_box(rig.animator.running_count())
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.bench_function("easing/cubic_in_out", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..=100 {
                sum += easing::cubic_in_out(black_box(f64::from(i) / 100.0));
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_frames);
criterion_main!(benches);
