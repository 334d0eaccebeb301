// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{criterion_group, criterion_main};

mod delay_bench;

use combine_bench::bench_combine;
use delay_bench::bench_delay_elements;

criterion_group!(benches, bench_combine, bench_delay_elements);
criterion_main!(benches);
