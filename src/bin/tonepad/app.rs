//! Tonepad - application builder and runner

use color_eyre::eyre::{Result as EyreResult, WrapErr};

use super::ui::UiApp;

use tonepad::{
    control::Controls,
    dsp::sweep::{DEFAULT_DURATION, DEFAULT_SHAPE},
    io::playback::CpalSink,
    ToneDemo,
};

/// Main application builder
pub struct Tonepad {
    shape: f64,
    fade: bool,
    duration: f64,
}

impl Tonepad {
    /// Create a new Tonepad with the slider at rest and fade off
    pub fn new() -> Self {
        Self {
            shape: DEFAULT_SHAPE,
            fade: false,
            duration: DEFAULT_DURATION,
        }
    }

    /// Initial slider position
    pub fn shape(mut self, shape: f64) -> Self {
        self.shape = shape;
        self
    }

    /// Initial checkbox state
    pub fn fade(mut self, fade: bool) -> Self {
        self.fade = fade;
        self
    }

    /// Tone length in seconds
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Run the application (takes over the terminal until quit)
    pub fn run(self) -> EyreResult<()> {
        // Open the device before taking over the terminal
        let sink = CpalSink::open().wrap_err("audio output is not available")?;

        let mut controls = Controls::new();
        controls.set_shape(self.shape);
        controls.set_fade(self.fade);
        controls.on_shape_change(|shape| tracing::debug!(shape, "slider moved"));
        controls.on_fade_change(|fade| tracing::debug!(fade, "fade toggled"));

        let demo = ToneDemo::new(sink)
            .with_duration(self.duration)
            .with_controls(controls);

        tracing::info!(
            sample_rate = demo.sample_rate(),
            duration = self.duration,
            "tonepad ready"
        );

        let mut terminal = ratatui::init();
        let res = UiApp::new(demo).run(&mut terminal);
        ratatui::restore();
        res
    }
}

impl Default for Tonepad {
    fn default() -> Self {
        Self::new()
    }
}
