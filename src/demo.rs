//! Trigger controller - wires controls, synthesis and a playback sink

use crate::{
    control::{ControlSnapshot, Controls},
    dsp::sweep::{synthesize, DEFAULT_DURATION},
    error::TriggerError,
    io::playback::PlaybackSink,
};

/// Summary of one successful start trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerReport {
    pub frames: usize,
    pub shape: f64,
    pub fade: bool,
    pub peak: f32,
}

/// The pad: owns the controls and the sink, renders a tone per start press.
pub struct ToneDemo<S: PlaybackSink> {
    controls: Controls,
    sink: S,
    duration_seconds: f64,
    preview: Vec<f32>,
    triggers: u64,
}

impl<S: PlaybackSink> ToneDemo<S> {
    pub fn new(sink: S) -> Self {
        Self {
            controls: Controls::new(),
            sink,
            duration_seconds: DEFAULT_DURATION,
            preview: Vec::new(),
            triggers: 0,
        }
    }

    /// Set the tone length in seconds
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sample_rate(&self) -> u32 {
        self.sink.sample_rate()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Handle one start press: sample the controls, render, queue playback.
    ///
    /// Does not wait for playback. A failure leaves the pad ready for the
    /// next press.
    pub fn start(&mut self) -> Result<TriggerReport, TriggerError> {
        let ControlSnapshot { shape, fade } = self.controls.sample();
        let sample_rate = self.sink.sample_rate();

        let buffer = synthesize(sample_rate, self.duration_seconds, shape, fade).map_err(|e| {
            tracing::warn!(shape, fade, "synthesis rejected: {e}");
            e
        })?;

        let report = TriggerReport {
            frames: buffer.frames(),
            shape,
            fade,
            peak: buffer.peak(),
        };
        let preview = buffer.channel(0).to_vec();

        self.sink.play(buffer, sample_rate).map_err(|e| {
            tracing::warn!("playback rejected: {e}");
            e
        })?;

        self.preview = preview;
        self.triggers += 1;
        tracing::info!(shape, fade, frames = report.frames, "started tone");

        Ok(report)
    }

    /// Left channel of the last tone that was handed to the sink.
    pub fn last_preview(&self) -> &[f32] {
        &self.preview
    }

    pub fn trigger_count(&self) -> u64 {
        self.triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::PlaybackError, io::playback::MemorySink, SynthesisError};

    #[test]
    fn start_plays_one_buffer_at_sink_rate() {
        let mut demo = ToneDemo::new(MemorySink::new(1_000));

        let report = demo.start().unwrap();

        assert_eq!(report.frames, 1_000);
        assert_eq!(report.shape, 10.0);
        assert!(!report.fade);
        assert_eq!(demo.sink().played().len(), 1);
        assert_eq!(demo.sink().played()[0].sample_rate(), 1_000);
        assert_eq!(demo.last_preview(), demo.sink().played()[0].channel(0));
        assert_eq!(demo.trigger_count(), 1);
    }

    #[test]
    fn start_reads_latest_control_values() {
        let mut demo = ToneDemo::new(MemorySink::new(100)).with_duration(0.5);
        demo.controls_mut().nudge_shape(3);
        demo.controls_mut().nudge_shape(2);
        demo.controls_mut().toggle_fade();

        let report = demo.start().unwrap();

        assert_eq!(report.shape, 15.0);
        assert!(report.fade);
        assert_eq!(report.frames, 50);
        let expected = synthesize(100, 0.5, 15.0, true).unwrap();
        assert_eq!(demo.sink().played()[0], expected);
    }

    #[test]
    fn rapid_triggers_produce_independent_buffers() {
        let mut demo = ToneDemo::new(MemorySink::new(200));
        demo.start().unwrap();
        demo.controls_mut().set_shape(40.0);
        demo.start().unwrap();
        demo.start().unwrap();

        let played = demo.sink().played();
        assert_eq!(played.len(), 3);
        assert_ne!(played[0], played[1]);
        assert_eq!(played[1], played[2]);
    }

    #[test]
    fn failed_playback_does_not_block_later_triggers() {
        let sink = MemorySink::new(100).failing(PlaybackError::QueueFull);
        let mut demo = ToneDemo::new(sink);

        let err = demo.start().unwrap_err();
        assert_eq!(err, TriggerError::Playback(PlaybackError::QueueFull));
        assert_eq!(demo.trigger_count(), 0);
        assert!(demo.last_preview().is_empty());

        demo.sink.recover();
        assert!(demo.start().is_ok());
        assert_eq!(demo.trigger_count(), 1);
    }

    #[test]
    fn invalid_duration_is_reported_without_playback() {
        let mut demo = ToneDemo::new(MemorySink::new(100)).with_duration(0.0);

        let err = demo.start().unwrap_err();

        assert!(matches!(
            err,
            TriggerError::Synthesis(SynthesisError::InvalidParameter {
                name: "duration_seconds",
                ..
            })
        ));
        assert!(demo.sink().played().is_empty());
    }
}
