// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use plotline_events::{Event, EventDispatcher, Handler};
use plotline_scheduler::{FrameScheduler, ManualHost};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Kind {
    Hit,
    Miss,
}

struct Ping(Kind);

impl Event for Ping {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        self.0
    }
}

fn dispatcher_with(listeners: usize, sink: &Rc<Cell<u64>>) -> EventDispatcher<Ping> {
    let events = EventDispatcher::new();
    for i in 0..listeners {
        let sink = sink.clone();
        let kind = if i % 2 == 0 { Kind::Hit } else { Kind::Miss };
        let _ = events
            .on(
                kind,
                Handler::new(move |_: &Ping| sink.set(sink.get() + 1)),
                None,
                true,
            )
            .expect("fresh dispatcher accepts listeners");
    }
    events
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("plotline_events");
    let sink = Rc::new(Cell::new(0_u64));

    for &listeners in &[1_usize, 16, 256] {
        let events = dispatcher_with(listeners, &sink);
        group.bench_function(BenchmarkId::new("dispatch_immediately", listeners), |b| {
            b.iter(|| {
                let _ = events.dispatch_immediately(black_box(&Ping(Kind::Hit)));
            });
        });
        group.bench_function(BenchmarkId::new("is_enabled", listeners), |b| {
            b.iter(|| black_box(events.is_enabled(black_box(Kind::Miss))));
        });
    }

    let events = dispatcher_with(16, &sink);
    group.bench_function("dispatch_deferred_then_idle(16)", |b| {
        let host = ManualHost::default();
        let scheduler = FrameScheduler::new(host);
        b.iter(|| {
            for _ in 0..32 {
                let _ = events.dispatch(Ping(Kind::Hit), &scheduler);
            }
            black_box(scheduler.trigger_idle());
        });
    });

    group.bench_function("countdown_gate(16)", |b| {
        b.iter(|| {
            let _ = events.disable_type_for(Kind::Hit, 4);
            for _ in 0..8 {
                let _ = events.dispatch_immediately(&Ping(Kind::Hit));
            }
        });
    });

    group.finish();
    black_box(sink.get());
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
