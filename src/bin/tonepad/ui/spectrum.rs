//! Spectrum preview widget
//!
//! One FFT per preview window, taken when a tone is triggered or the window
//! is scrolled. The draw loop only replays the stored bands.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, FftPlanner};

/// Log-spaced bands drawn across the chart
const BANDS: usize = 48;
/// Level of a band with no energy
const FLOOR_DB: f64 = -120.0;
/// Lowest band edge (Hz)
const LOW_EDGE_HZ: f64 = 20.0;

/// Band levels for one preview window: `(center_hz, level_db)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumPreview {
    bands: Vec<(f64, f64)>,
}

impl SpectrumPreview {
    /// Every band at the floor, centered for `sample_rate`.
    pub fn silent(sample_rate: u32) -> Self {
        let bands = band_edges(sample_rate)
            .windows(2)
            .map(|edge| ((edge[0] * edge[1]).sqrt(), FLOOR_DB))
            .collect();
        Self { bands }
    }

    /// Analyze `window` as one `fft_len`-point frame.
    ///
    /// Longer input is cut at `fft_len`, shorter input is padded with silence.
    pub fn analyze(window: &[f32], sample_rate: u32, fft_len: usize) -> Self {
        if window.is_empty() || fft_len == 0 {
            return Self::silent(sample_rate);
        }

        let taper = fft_len.saturating_sub(1).max(1) as f32;
        let mut frame: Vec<Complex<f32>> = (0..fft_len)
            .map(|i| {
                let hann = 0.5 - 0.5 * (std::f32::consts::TAU * i as f32 / taper).cos();
                Complex::new(window.get(i).copied().unwrap_or(0.0) * hann, 0.0)
            })
            .collect();
        FftPlanner::new()
            .plan_fft_forward(fft_len)
            .process(&mut frame);

        let hz_per_bin = sample_rate as f64 / fft_len as f64;
        let usable = &frame[..(fft_len / 2).max(1)];
        let bands = band_edges(sample_rate)
            .windows(2)
            .map(|edge| {
                let center = (edge[0] * edge[1]).sqrt();
                (center, band_level(usable, hz_per_bin, edge[0], edge[1]))
            })
            .collect();
        Self { bands }
    }

    pub fn bands(&self) -> &[(f64, f64)] {
        &self.bands
    }

    /// Center of the strongest band above the floor.
    pub fn peak_hz(&self) -> Option<f64> {
        self.bands
            .iter()
            .filter(|(_, db)| *db > FLOOR_DB)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(hz, _)| *hz)
    }
}

/// `BANDS + 1` edges, geometric from 20 Hz up to Nyquist (capped at 20 kHz).
fn band_edges(sample_rate: u32) -> Vec<f64> {
    let top = (sample_rate as f64 / 2.0).clamp(LOW_EDGE_HZ + 1.0, 20_000.0);
    let growth = (top / LOW_EDGE_HZ).powf(1.0 / BANDS as f64);
    (0..=BANDS)
        .map(|k| LOW_EDGE_HZ * growth.powi(k as i32))
        .collect()
}

/// Mean power of the bins inside `[low, high)`, or of the nearest bin when
/// the band is narrower than one bin.
fn band_level(bins: &[Complex<f32>], hz_per_bin: f64, low: f64, high: f64) -> f64 {
    if hz_per_bin <= 0.0 {
        return FLOOR_DB;
    }
    let last = bins.len() - 1;
    let first = ((low / hz_per_bin).ceil() as usize).min(last);
    let end = ((high / hz_per_bin).ceil() as usize).min(bins.len());
    let power = if end > first {
        bins[first..end].iter().map(|c| c.norm_sqr() as f64).sum::<f64>() / (end - first) as f64
    } else {
        let nearest = ((((low * high).sqrt()) / hz_per_bin).round() as usize).min(last);
        bins[nearest].norm_sqr() as f64
    };
    if power > 0.0 {
        (10.0 * power.log10()).max(FLOOR_DB)
    } else {
        FLOOR_DB
    }
}

/// Render the spectrum widget, frequency on a log axis.
pub fn render_spectrum(frame: &mut Frame, area: Rect, preview: &SpectrumPreview) {
    let points: Vec<(f64, f64)> = preview
        .bands()
        .iter()
        .map(|&(hz, db)| (hz.log10(), db))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points);

    let low = LOW_EDGE_HZ.log10();
    let high = points.last().map(|(x, _)| *x).unwrap_or(low + 1.0).max(low + 1e-3);
    let top_db = points
        .iter()
        .map(|(_, db)| *db)
        .fold(-100.0, f64::max)
        .max(0.0)
        + 10.0;

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([low, high])
                .labels(vec!["20 Hz", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, top_db])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonepad::synthesize;

    #[test]
    fn steady_tone_peaks_near_its_pitch() {
        // shape 10 at 48 kHz sits around 764 Hz
        let tone = synthesize(48_000, 0.1, 10.0, false).unwrap();
        let preview = SpectrumPreview::analyze(tone.channel(0), 48_000, 4096);

        let peak = preview.peak_hz().unwrap();
        assert!((600.0..950.0).contains(&peak), "peak at {peak} Hz");
    }

    #[test]
    fn empty_window_is_silent() {
        let preview = SpectrumPreview::analyze(&[], 8_000, 256);

        assert_eq!(preview, SpectrumPreview::silent(8_000));
        assert!(preview.bands().iter().all(|(_, db)| *db == FLOOR_DB));
        assert_eq!(preview.peak_hz(), None);
    }

    #[test]
    fn short_window_is_padded() {
        let preview = SpectrumPreview::analyze(&[0.5; 100], 8_000, 1024);

        assert_eq!(preview.bands().len(), BANDS);
        assert!(preview.peak_hz().is_some());
    }

    #[test]
    fn bands_rise_from_twenty_hertz() {
        let edges = band_edges(44_100);

        assert_eq!(edges.len(), BANDS + 1);
        assert!((edges[0] - 20.0).abs() < 1e-9);
        assert!((edges[BANDS] - 20_000.0).abs() < 1e-6);
        assert!(edges.windows(2).all(|w| w[1] > w[0]));
    }
}
