//! Playback sinks: where rendered buffers go to be heard.

use crate::{error::PlaybackError, io::AudioBuffer};

/// Anything that can take a finished buffer and play it once.
///
/// `play` is fire and forget. It returns as soon as the buffer is queued;
/// there is no completion signal.
pub trait PlaybackSink {
    fn play(&mut self, buffer: AudioBuffer, sample_rate: u32) -> Result<(), PlaybackError>;

    /// Rate buffers must be rendered at to play on this sink.
    fn sample_rate(&self) -> u32;
}

impl<S: PlaybackSink + ?Sized> PlaybackSink for Box<S> {
    fn play(&mut self, buffer: AudioBuffer, sample_rate: u32) -> Result<(), PlaybackError> {
        (**self).play(buffer, sample_rate)
    }

    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }
}

/// Sink that keeps every buffer instead of playing it.
#[derive(Debug, Default)]
pub struct MemorySink {
    sample_rate: u32,
    played: Vec<AudioBuffer>,
    fail_with: Option<PlaybackError>,
}

impl MemorySink {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            played: Vec::new(),
            fail_with: None,
        }
    }

    /// Reject every `play` call with `err`.
    pub fn failing(mut self, err: PlaybackError) -> Self {
        self.fail_with = Some(err);
        self
    }

    /// Stop rejecting `play` calls.
    pub fn recover(&mut self) {
        self.fail_with = None;
    }

    pub fn played(&self) -> &[AudioBuffer] {
        &self.played
    }
}

impl PlaybackSink for MemorySink {
    fn play(&mut self, buffer: AudioBuffer, sample_rate: u32) -> Result<(), PlaybackError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        check_rate(sample_rate, self.sample_rate)?;
        self.played.push(buffer);
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

fn check_rate(buffer: u32, device: u32) -> Result<(), PlaybackError> {
    if buffer != device {
        return Err(PlaybackError::SampleRateMismatch { buffer, device });
    }
    Ok(())
}

/// Error for a device that cannot be brought up at all.
///
/// Every failure while opening the output (device, config, stream build,
/// stream start) lands here, so callers see one variant for "no audio".
#[cfg_attr(not(feature = "rtrb"), allow(dead_code))]
pub(crate) fn startup_failure(stage: &str, err: impl std::fmt::Display) -> PlaybackError {
    PlaybackError::UnsupportedPlatform(format!("{stage}: {err}"))
}

#[cfg(feature = "rtrb")]
pub use device::{CpalSink, QUEUE_CAPACITY};

#[cfg(feature = "rtrb")]
mod device {
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{FromSample, Sample, SampleFormat, SizedSample};
    use rtrb::{Consumer, Producer, RingBuffer};

    use super::{check_rate, startup_failure, PlaybackSink};
    use crate::{error::PlaybackError, io::mixer::OneShotMixer, io::AudioBuffer, MAX_BLOCK_SIZE};

    /// Capacity of the queue to the audio thread (and of the return queue).
    pub const QUEUE_CAPACITY: usize = 32;

    /// Default output device, opened once for the whole session.
    ///
    /// Holds one running stream; each `play` hands a buffer to the stream's
    /// mixer. Must stay on the thread that opened it.
    pub struct CpalSink {
        _stream: cpal::Stream,
        tx: Producer<AudioBuffer>,
        retired: Consumer<AudioBuffer>,
        sample_rate: u32,
        channels: usize,
    }

    impl CpalSink {
        /// Open the default host's default output device and start streaming.
        ///
        /// Any failure here means the platform cannot play audio at all and is
        /// reported as [`PlaybackError::UnsupportedPlatform`].
        pub fn open() -> Result<Self, PlaybackError> {
            let host = cpal::default_host();
            let device = host
                .default_output_device()
                .ok_or_else(|| startup_failure("no output device", host.id().name()))?;
            let supported = device
                .default_output_config()
                .map_err(|e| startup_failure("failed to fetch default output config", e))?;

            let sample_format = supported.sample_format();
            let config: cpal::StreamConfig = supported.into();
            let sample_rate = config.sample_rate.0;
            let channels = config.channels as usize;
            if channels == 0 || sample_rate == 0 {
                return Err(PlaybackError::UnsupportedPlatform(format!(
                    "device reports {channels} channels at {sample_rate} Hz"
                )));
            }

            let (tx, rx) = RingBuffer::<AudioBuffer>::new(QUEUE_CAPACITY);
            let (retired_tx, retired) = RingBuffer::<AudioBuffer>::new(QUEUE_CAPACITY);
            let mixer = OneShotMixer::new(rx, retired_tx, channels);

            let stream = match sample_format {
                SampleFormat::F32 => build_stream::<f32>(&device, &config, mixer),
                SampleFormat::I16 => build_stream::<i16>(&device, &config, mixer),
                SampleFormat::U16 => build_stream::<u16>(&device, &config, mixer),
                other => return Err(startup_failure("unsupported sample format", other)),
            }
            .map_err(|e| startup_failure("failed to build output stream", e))?;
            stream
                .play()
                .map_err(|e| startup_failure("failed to start output stream", e))?;

            tracing::info!(
                sample_rate,
                channels,
                format = %sample_format,
                "opened output device"
            );

            Ok(Self {
                _stream: stream,
                tx,
                retired,
                sample_rate,
                channels,
            })
        }

        pub fn channels(&self) -> usize {
            self.channels
        }

        /// Free buffers the audio thread has finished with.
        pub fn collect_finished(&mut self) -> usize {
            let mut freed = 0;
            while self.retired.pop().is_ok() {
                freed += 1;
            }
            freed
        }
    }

    impl PlaybackSink for CpalSink {
        fn play(&mut self, buffer: AudioBuffer, sample_rate: u32) -> Result<(), PlaybackError> {
            check_rate(sample_rate, self.sample_rate)?;
            self.collect_finished();

            let frames = buffer.frames();
            self.tx.push(buffer).map_err(|_| PlaybackError::QueueFull)?;
            tracing::debug!(frames, "queued one-shot");
            Ok(())
        }

        fn sample_rate(&self) -> u32 {
            self.sample_rate
        }
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        mut mixer: OneShotMixer,
    ) -> Result<cpal::Stream, cpal::BuildStreamError>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = config.channels as usize;
        // Buffer reused by audio callback
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE * channels];

        device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for chunk in data.chunks_mut(render_buf.len()) {
                    let block = &mut render_buf[..chunk.len()];
                    mixer.render(block);
                    for (out, &s) in chunk.iter_mut().zip(block.iter()) {
                        *out = T::from_sample(s);
                    }
                }
            },
            |err| tracing::error!("output stream error: {err}"),
            None,
        )
    }
}
