//! Offline signal generation.
//!
//! Everything here is a pure function of its inputs: no device, no clock, no
//! shared state. Callers decide when and where the rendered buffers play.

/// One-shot sine sweep with an optional phase ramp.
pub mod sweep;

pub use sweep::{approx_frequency_hz, frame_count, progress, synthesize, SynthesisParams};
