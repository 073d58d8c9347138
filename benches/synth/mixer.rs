//! Benchmarks for the realtime one-shot mixer.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use rtrb::RingBuffer;
use tonepad::{io::mixer::OneShotMixer, synthesize};

use crate::BLOCK_SIZES;

const CHANNELS: usize = 2;
const OVERLAPS: &[usize] = &[1, 4, 16];

fn loaded_mixer(shots: usize) -> OneShotMixer {
    let (mut tx, rx) = RingBuffer::new(32);
    let (retired_tx, _retired_rx) = RingBuffer::new(32);
    let tone = synthesize(48_000, 0.1, 10.0, true).expect("valid tone");
    for _ in 0..shots {
        tx.push(tone.clone()).expect("ring has room");
    }
    OneShotMixer::new(rx, retired_tx, CHANNELS)
}

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/mixer");

    for &size in BLOCK_SIZES {
        let mut out = vec![0.0f32; size * CHANNELS];

        for &shots in OVERLAPS {
            group.bench_with_input(
                BenchmarkId::new(format!("{shots}_shots"), size),
                &size,
                |b, _| {
                    b.iter_batched(
                        || loaded_mixer(shots),
                        |mut mixer| {
                            mixer.render(black_box(&mut out));
                            mixer
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }

    group.finish();
}
