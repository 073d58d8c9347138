//! Control state for the pad: the shape slider and the fade checkbox.
//!
//! Each control is a last-value cell. UI events overwrite it, and the start
//! trigger reads both cells at once. Nothing is queued: a burst of slider
//! moves between two presses only leaves the final value behind.

pub mod param;

pub use param::Param;

use crate::dsp::sweep::DEFAULT_SHAPE;

/// Bounds and step for the shape slider.
///
/// Synthesis accepts any finite nonzero shape; the range only applies to
/// values entered through the slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    /// Clamp `value` into the range. Never panics, even on a malformed range.
    pub fn clamp(&self, value: f64) -> f64 {
        let range = self.normalized();
        value.clamp(range.min, range.max)
    }

    /// A well-formed copy of this range.
    ///
    /// Reversed bounds are swapped. A NaN bound falls back to the default
    /// range, and a step that is not finite and positive falls back to the
    /// default step.
    pub fn normalized(&self) -> Self {
        let fallback = Self::default();
        let (min, max) = if self.min.is_nan() || self.max.is_nan() {
            (fallback.min, fallback.max)
        } else if self.min > self.max {
            (self.max, self.min)
        } else {
            (self.min, self.max)
        };
        let step = if self.step.is_finite() && self.step > 0.0 {
            self.step
        } else {
            fallback.step
        };
        Self { min, max, step }
    }

    /// Position of `value` within the range, 0.0 at `min` to 1.0 at `max`.
    pub fn ratio(&self, value: f64) -> f64 {
        let range = self.normalized();
        if range.max <= range.min {
            return 0.0;
        }
        ((range.clamp(value) - range.min) / (range.max - range.min)).clamp(0.0, 1.0)
    }
}

impl Default for SliderRange {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

/// Values read from the controls at the moment of a trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSnapshot {
    pub shape: f64,
    pub fade: bool,
}

pub struct Controls {
    shape: Param<f64>,
    fade: Param<bool>,
    range: SliderRange,
}

impl Controls {
    pub fn new() -> Self {
        Self {
            shape: Param::new(DEFAULT_SHAPE),
            fade: Param::new(false),
            range: SliderRange::default(),
        }
    }

    pub fn with_range(mut self, range: SliderRange) -> Self {
        let range = range.normalized();
        self.range = range;
        let current = self.shape.get();
        self.shape.set(range.clamp(current));
        self
    }

    pub fn range(&self) -> SliderRange {
        self.range
    }

    /// Set the slider. Values outside the range are clamped.
    pub fn set_shape(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.shape.set(self.range.clamp(value));
    }

    /// Move the slider by whole steps (negative moves down).
    pub fn nudge_shape(&mut self, steps: i32) {
        let next = self.shape.get() + steps as f64 * self.range.step;
        self.set_shape(next);
    }

    pub fn set_fade(&mut self, fade: bool) {
        self.fade.set(fade);
    }

    pub fn toggle_fade(&mut self) {
        let flipped = !self.fade.get();
        self.fade.set(flipped);
    }

    pub fn shape(&self) -> f64 {
        self.shape.get()
    }

    pub fn fade(&self) -> bool {
        self.fade.get()
    }

    /// Register a callback for every slider change.
    pub fn on_shape_change(&mut self, observer: impl FnMut(f64) + 'static) {
        self.shape.observe(observer);
    }

    /// Register a callback for every checkbox change.
    pub fn on_fade_change(&mut self, observer: impl FnMut(bool) + 'static) {
        self.fade.observe(observer);
    }

    pub fn sample(&self) -> ControlSnapshot {
        ControlSnapshot {
            shape: self.shape.get(),
            fade: self.fade.get(),
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}
