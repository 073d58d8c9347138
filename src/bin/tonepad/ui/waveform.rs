//! Waveform preview widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render a window of the last tone, starting at frame `offset`
pub fn render_waveform(frame: &mut Frame, area: Rect, window: &[f32], offset: usize) {
    let title = if window.is_empty() {
        " Waveform (press Space) ".to_string()
    } else {
        format!(" Waveform  frames {}..{} ", offset, offset + window.len())
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    // Downsample to roughly two points per column
    let target = (area.width.max(1) as usize) * 2;
    let step = window.len().div_ceil(target).max(1);
    let data: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .step_by(step)
        .map(|(i, &sample)| ((offset + i) as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let x_end = (offset + window.len().max(1)) as f64;
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([offset as f64, x_end])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
