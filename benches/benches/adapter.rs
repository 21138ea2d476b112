// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use plotline_adapter::{Adapter, AdapterFn, AdapterKey, AdapterTarget, GlobalAdapter};

struct Column {
    value: f64,
}

impl AdapterTarget for Column {}

const HEIGHT: AdapterKey<f64> = AdapterKey::new("height");
const OTHER: AdapterKey<f64> = AdapterKey::new("other");

fn adapter_with(callbacks: usize, global: Option<GlobalAdapter>) -> Adapter<Column> {
    let mut adapter = match global {
        Some(global) => Adapter::with_global(global),
        None => Adapter::new(),
    };
    for i in 0..callbacks {
        #[allow(clippy::cast_possible_truncation, reason = "bench sizes are small")]
        let priority = (i % 7) as i32;
        let key = if i % 2 == 0 { HEIGHT } else { OTHER };
        adapter.add(
            key,
            AdapterFn::new(move |h: f64, column: &Column, _| h + column.value * 0.5),
            priority,
        );
    }
    adapter
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("plotline_adapter");
    let column = Column { value: 2.0 };

    for &callbacks in &[0_usize, 4, 32] {
        let adapter = adapter_with(callbacks, None);
        group.bench_function(BenchmarkId::new("apply_instance", callbacks), |b| {
            b.iter(|| black_box(adapter.apply(&column, HEIGHT, black_box(10.0))));
        });

        let theme = GlobalAdapter::new();
        for priority in 0..4 {
            theme.add_all::<Column, _>(HEIGHT, AdapterFn::new(|h: f64, _, _| h * 1.01), priority);
        }
        let adapter = adapter_with(callbacks, Some(theme));
        group.bench_function(BenchmarkId::new("apply_with_global", callbacks), |b| {
            b.iter(|| black_box(adapter.apply(&column, HEIGHT, black_box(10.0))));
        });
    }

    let adapter = adapter_with(32, None);
    group.bench_function("is_enabled(32)", |b| {
        b.iter(|| black_box(adapter.is_enabled(&column, black_box(HEIGHT))));
    });

    group.finish();
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);
