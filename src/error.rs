//! Error types for synthesis, playback and the trigger path.

use thiserror::Error;

/// Errors raised before any sample is rendered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    /// An input would make the waveform undefined (division by zero, NaN, overflow).
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl SynthesisError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SynthesisError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Errors raised by a playback sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform has no usable audio output. Fatal for the session.
    #[error("audio output unsupported on this platform: {0}")]
    UnsupportedPlatform(String),
    /// The buffer was rendered for a different rate than the device runs at.
    #[error("buffer sample rate {buffer} Hz does not match device rate {device} Hz")]
    SampleRateMismatch { buffer: u32, device: u32 },
    /// Too many one-shots are waiting for the audio thread.
    #[error("playback queue is full")]
    QueueFull,
    /// A running output stream failed after startup.
    #[error("output stream error: {0}")]
    Stream(String),
}

/// Failure of a single start trigger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriggerError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}
