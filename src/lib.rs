pub mod control; // Slider/checkbox state holders
pub mod demo; // Trigger controller: controls → synthesis → sink
pub mod dsp;
pub mod error;
pub mod io; // Audio buffers and playback sinks

pub use demo::{ToneDemo, TriggerReport};
pub use dsp::sweep::{synthesize, SynthesisParams};
pub use error::{PlaybackError, SynthesisError, TriggerError};
pub use io::AudioBuffer;

/// Largest device block the mixer renders in one pass.
pub const MAX_BLOCK_SIZE: usize = 2048;
/// Output channels carried by every synthesized buffer.
pub const BUFFER_CHANNELS: usize = 2;
