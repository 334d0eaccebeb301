// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{criterion_group, criterion_main};

mod pipeline_bench;

use fold_bench::bench_fold;
use pipeline_bench::bench_pipeline;

criterion_group!(benches, bench_fold, bench_pipeline);
criterion_main!(benches);
