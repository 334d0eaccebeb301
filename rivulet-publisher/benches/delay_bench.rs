// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use futures::{FutureExt, StreamExt};
use rivulet_core::VirtualTimer;
use rivulet_publisher::prelude::*;
use std::hint::black_box;
use std::time::Duration;

// Cost of the operator itself: the virtual clock is advanced by hand, nothing sleeps.
pub fn bench_delay_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("delay_elements_overhead");
    let sizes = [11usize, 1_000];

    for &size in &sizes {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, &size| {
            bencher.iter(|| {
                let timer = VirtualTimer::new();
                let mut publisher = Box::pin(
                    from_iter(0..size)
                        .delay_elements_with_timer(Duration::from_secs(1), timer.clone()),
                );

                let mut emitted = 0;
                loop {
                    match publisher.next().now_or_never() {
                        Some(Some(item)) => {
                            black_box(item);
                            emitted += 1;
                        }
                        Some(None) => break,
                        None => {
                            timer.advance_to_next();
                        }
                    }
                }
                black_box(emitted)
            });
        });
    }

    group.finish();
}
