// Purpose - audio buffers and the sinks that play them

#[cfg(feature = "rtrb")]
pub mod mixer;
pub mod playback;

use crate::BUFFER_CHANNELS;

/// Two equal-length channels of samples at a fixed rate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: [Vec<f32>; BUFFER_CHANNELS],
}

impl AudioBuffer {
    /// Build from two channels. The longer one is truncated so both match.
    pub fn from_channels(sample_rate: u32, channels: [Vec<f32>; BUFFER_CHANNELS]) -> Self {
        let [mut left, mut right] = channels;
        let frames = left.len().min(right.len());
        left.truncate(frames);
        right.truncate(frames);

        Self {
            sample_rate,
            channels: [left, right],
        }
    }

    /// Mono signal copied onto both channels.
    pub fn from_mono(sample_rate: u32, samples: Vec<f32>) -> Self {
        let right = samples.clone();
        Self {
            sample_rate,
            channels: [samples, right],
        }
    }

    pub fn silent(sample_rate: u32, frames: usize) -> Self {
        Self::from_mono(sample_rate, vec![0.0; frames])
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Samples of channel `index` (0 = left, 1 = right).
    ///
    /// Panics if `index >= 2`.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<f32>; BUFFER_CHANNELS] {
        &self.channels
    }

    pub fn into_channels(self) -> [Vec<f32>; BUFFER_CHANNELS] {
        self.channels
    }

    /// Largest absolute sample across both channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|c| c.iter())
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    /// Add frames starting at `start_frame` into an interleaved device buffer.
    ///
    /// Device channel `c` takes buffer channel `min(c, 1)`: a mono device hears
    /// the left channel and extra device channels repeat the right one.
    /// Returns how many frames were mixed.
    pub fn mix_interleaved(&self, start_frame: usize, out: &mut [f32], out_channels: usize) -> usize {
        if out_channels == 0 || start_frame >= self.frames() {
            return 0;
        }

        let out_frames = out.len() / out_channels;
        let count = (self.frames() - start_frame).min(out_frames);

        for frame in 0..count {
            let src = start_frame + frame;
            let dst = frame * out_channels;
            for ch in 0..out_channels {
                let source = &self.channels[ch.min(BUFFER_CHANNELS - 1)];
                out[dst + ch] += source[src];
            }
        }

        count
    }
}
