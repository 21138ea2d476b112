// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use plotline_collections::{List, ListEvent, ListEventKind, SortedList, order};
use plotline_events::Handler;

/// Deterministic pseudo-random input, same stream on every run.
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG constants.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 32) as u32
    }
}

fn random_values(n: usize, seed: u64) -> Vec<u32> {
    let mut rng = Lcg(seed);
    (0..n).map(|_| rng.next_u32() % 10_000).collect()
}

fn bench_sorted_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("plotline_collections/sorted_list");
    group.sample_size(50);

    for &n in &[128_usize, 1024, 8192] {
        let values = random_values(n, 0x5eed);
        group.bench_function(format!("insert_random(n={n})"), |b| {
            b.iter_batched(
                || SortedList::new(|a: &u32, b: &u32| a.cmp(b)),
                |mut list| {
                    for &v in &values {
                        list.insert(v);
                    }
                    black_box(list.len())
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("remove_half(n={n})"), |b| {
            b.iter_batched(
                || {
                    let mut list = SortedList::new(|a: &u32, b: &u32| a.cmp(b));
                    list.set_all(values.iter().copied());
                    list
                },
                |mut list| {
                    for v in values.iter().step_by(2) {
                        list.remove(v);
                    }
                    black_box(list.len())
                },
                BatchSize::LargeInput,
            );
        });
    }

    let mut sorted: Vec<u32> = random_values(8192, 7);
    sorted.sort_unstable();
    group.bench_function("sorted_index(n=8192)", |b| {
        b.iter(|| {
            let needle = black_box(5_000_u32);
            black_box(order::sorted_index(&sorted, |v| v.cmp(&needle)))
        });
    });

    group.finish();
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("plotline_collections/list");
    group.sample_size(50);

    let values = random_values(1024, 42);
    let seen = Rc::new(Cell::new(0_usize));

    for observed in [false, true] {
        let label = if observed { "observed" } else { "unobserved" };
        let make = {
            let seen = seen.clone();
            move || {
                let list: List<u32> = List::new();
                if observed {
                    let seen = seen.clone();
                    let _ = list.events().on(
                        ListEventKind::Inserted,
                        Handler::new(move |_: &ListEvent<u32>| seen.set(seen.get() + 1)),
                        None,
                        true,
                    );
                }
                list
            }
        };

        group.bench_function(format!("push(n=1024, {label})"), |b| {
            b.iter_batched(
                &make,
                |mut list| {
                    for &v in &values {
                        list.push(v);
                    }
                    black_box(list.len())
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("set_all(n=1024, {label})"), |b| {
            b.iter_batched(
                &make,
                |mut list| {
                    list.set_all(values.iter().copied());
                    black_box(list.len())
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
    black_box(seen.get());
}

criterion_group!(benches, bench_sorted_list, bench_list);
criterion_main!(benches);
