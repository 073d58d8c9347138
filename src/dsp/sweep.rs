use crate::{error::SynthesisError, io::AudioBuffer};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Sine Sweep With Phase Ramp
==========================

This module renders the one-shot tone the pad plays on every start press.
It is a single loop over frames; everything interesting is in what goes
inside the sine.

Vocabulary
----------

  frame       One sample index across all channels. A one-second buffer at
              48 kHz has 48000 frames.

  shape       A divisor on the frame index. The sine argument advances by
              1/shape radians per frame, so a larger shape means a lower
              pitch. It is NOT a frequency in Hz:

                  approx Hz = sample_rate / (2π · shape)

              shape = 10 at 48 kHz ≈ 764 Hz.

  progress    A per-frame scalar in [0, 1). With fade off it is pinned at
              1.0. With fade on it ramps linearly: i / frame_count.


The Formula
-----------

    value[i] = sin( (i / shape) · progress[i] )

Progress multiplies the sine ARGUMENT, not the output. That makes the fade
a phase effect rather than an amplitude envelope:

    fade off:  sin(i / shape)                  steady tone
    fade on:   sin(i² / (shape · frame_count)) chirp rising from DC

With fade on the instantaneous frequency is d/di of the argument:

    ω(i) = 2i / (shape · frame_count)

so the tone starts at 0 Hz and sweeps up to roughly twice the fade-off
pitch by the end of the buffer. Amplitude stays at full scale the whole
time. An amplitude envelope would be `sin(i / shape) · progress`, which
is a different sound.


Frame Count
-----------

    frame_count = round(sample_rate · duration_seconds)

Rounding is half away from zero. Both inputs are positive, so that matches
ordinary "round half up". Duration 1.0 is not special-cased.


Validation
----------

Every input is checked before the buffer is allocated, so a rejected call
never yields a partially filled buffer:

    shape           finite and nonzero (it is a divisor)
    sample_rate     nonzero
    duration        finite and > 0
    frame_count     at most isize::MAX / 4 (one f32 channel)

Negative shapes are valid: they flip the sign of the argument.
*/

/// Default divisor, matching the slider's resting position.
pub const DEFAULT_SHAPE: f64 = 10.0;
/// Default tone length in seconds.
pub const DEFAULT_DURATION: f64 = 1.0;

/// Inputs for one render of the sweep.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParams {
    pub sample_rate: u32,
    pub duration_seconds: f64,
    pub shape: f64,
    pub fade: bool,
}

impl SynthesisParams {
    /// Start from the defaults (1 s, shape 10, no fade) at the given rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            duration_seconds: DEFAULT_DURATION,
            shape: DEFAULT_SHAPE,
            fade: false,
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    pub fn shape(mut self, shape: f64) -> Self {
        self.shape = shape;
        self
    }

    pub fn fade(mut self, fade: bool) -> Self {
        self.fade = fade;
        self
    }

    /// Render these parameters into a fresh buffer.
    pub fn render(&self) -> Result<AudioBuffer, SynthesisError> {
        synthesize(
            self.sample_rate,
            self.duration_seconds,
            self.shape,
            self.fade,
        )
    }
}

/// Largest frame count a single `f32` channel can hold.
pub const MAX_FRAMES: usize = isize::MAX as usize / std::mem::size_of::<f32>();

/// Number of frames for a buffer of `duration_seconds` at `sample_rate`.
pub fn frame_count(sample_rate: u32, duration_seconds: f64) -> Result<usize, SynthesisError> {
    if sample_rate == 0 {
        return Err(SynthesisError::invalid(
            "sample_rate",
            0.0,
            "must be greater than zero",
        ));
    }
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(SynthesisError::invalid(
            "duration_seconds",
            duration_seconds,
            "must be finite and greater than zero",
        ));
    }

    let frames = (sample_rate as f64 * duration_seconds).round();
    if frames > MAX_FRAMES as f64 {
        return Err(SynthesisError::invalid(
            "duration_seconds",
            duration_seconds,
            "frame count overflows",
        ));
    }

    Ok(frames as usize)
}

/// Phase ramp at `index`: `index / frame_count` when fading, otherwise 1.0.
#[inline]
pub fn progress(index: usize, frame_count: usize, fade: bool) -> f64 {
    if fade {
        index as f64 / frame_count as f64
    } else {
        1.0
    }
}

/// Perceived pitch of the un-faded tone, for display.
pub fn approx_frequency_hz(sample_rate: u32, shape: f64) -> f64 {
    sample_rate as f64 / (std::f64::consts::TAU * shape.abs())
}

/// Render the sweep into a two-channel buffer.
///
/// Both channels carry the same mono signal. Fails with
/// [`SynthesisError::InvalidParameter`] before allocating if any input would
/// make the waveform undefined.
pub fn synthesize(
    sample_rate: u32,
    duration_seconds: f64,
    shape: f64,
    fade: bool,
) -> Result<AudioBuffer, SynthesisError> {
    if !shape.is_finite() || shape == 0.0 {
        return Err(SynthesisError::invalid(
            "shape",
            shape,
            "must be finite and nonzero",
        ));
    }
    let frames = frame_count(sample_rate, duration_seconds)?;

    let mut left: Vec<f32> = Vec::new();
    left.try_reserve_exact(frames).map_err(|_| {
        SynthesisError::invalid(
            "duration_seconds",
            duration_seconds,
            "buffer cannot be allocated",
        )
    })?;
    for i in 0..frames {
        let phase = i as f64 / shape;
        let value = (phase * progress(i, frames, fade)).sin();
        left.push(value as f32);
    }
    let mut right: Vec<f32> = Vec::new();
    right.try_reserve_exact(frames).map_err(|_| {
        SynthesisError::invalid(
            "duration_seconds",
            duration_seconds,
            "buffer cannot be allocated",
        )
    })?;
    right.extend_from_slice(&left);

    Ok(AudioBuffer::from_channels(sample_rate, [left, right]))
}
