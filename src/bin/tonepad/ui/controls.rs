//! Control row - shape slider, fade checkbox and start button

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use tonepad::{control::Controls, dsp::sweep::approx_frequency_hz};

/// Render the control row
pub fn render_controls(frame: &mut Frame, area: Rect, controls: &Controls, sample_rate: u32) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),    // Slider
            Constraint::Length(14), // Checkbox
            Constraint::Length(11), // Button
        ])
        .split(area);

    let shape = controls.shape();
    let range = controls.range();

    let slider = Gauge::default()
        .block(Block::default().title(" Shape ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(range.ratio(shape))
        .label(format!(
            "{:.0}  (~{:.0} Hz)",
            shape,
            approx_frequency_hz(sample_rate, shape)
        ));
    frame.render_widget(slider, chunks[0]);

    let mark = if controls.fade() { "x" } else { " " };
    let checkbox = Paragraph::new(format!("[{}] fade", mark))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(checkbox, chunks[1]);

    let button = Paragraph::new(" Start ")
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, chunks[2]);
}
