//! Benchmarks for synthesis and playback plumbing.

mod mixer;
mod sweep;

pub use mixer::bench_mixer;
pub use sweep::bench_sweep;
