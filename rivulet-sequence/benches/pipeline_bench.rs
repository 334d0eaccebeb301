// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use rivulet_sequence::Sequence;
use std::hint::black_box;

// Lazy pipeline against the same chain run eagerly, which allocates per stage.
pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_map_reduce");
    let sizes = [100usize, 10_000];

    for &size in &sizes {
        let numbers: Sequence<u64> = (0..size as u64).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("lazy", size), &numbers, |bencher, numbers| {
            bencher.iter(|| {
                let total = numbers
                    .pipeline()
                    .filter(|n| n % 2 == 0)
                    .map(|n| n * 3)
                    .reduce(0u64, |acc, n| acc + n);
                black_box(total)
            });
        });

        group.bench_with_input(BenchmarkId::new("eager", size), &numbers, |bencher, numbers| {
            bencher.iter(|| {
                let total = numbers
                    .filter(|n| n % 2 == 0)
                    .map(|n| n * 3)
                    .reduce(0u64, |acc, n| acc + n);
                black_box(total)
            });
        });
    }

    group.finish();
}
