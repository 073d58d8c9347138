//! Benchmarks for whole-tone sweep rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tonepad::synthesize;

const SAMPLE_RATE: u32 = 48_000;
const DURATIONS: &[f64] = &[0.1, 0.5, 1.0];

pub fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/sweep");

    for &seconds in DURATIONS {
        // Steady tone - one sin() per frame
        group.bench_with_input(BenchmarkId::new("steady", seconds), &seconds, |b, &s| {
            b.iter(|| synthesize(black_box(SAMPLE_RATE), black_box(s), black_box(10.0), false))
        });

        // Phase ramp - extra divide and multiply per frame
        group.bench_with_input(BenchmarkId::new("fade", seconds), &seconds, |b, &s| {
            b.iter(|| synthesize(black_box(SAMPLE_RATE), black_box(s), black_box(10.0), true))
        });
    }

    group.finish();
}
