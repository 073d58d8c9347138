//! Header bar widget - shows device rate, trigger count and last result

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tonepad::TriggerReport;

/// Outcome of the most recent start press
#[derive(Debug, Clone)]
pub enum Status {
    Idle,
    Played(TriggerReport),
    Failed(String),
}

/// Render the header bar
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    sample_rate: u32,
    triggers: u64,
    status: &Status,
) {
    let block = Block::default().title(" tonepad ").borders(Borders::ALL);

    // Format sample rate nicely (e.g., 48000 -> "48.0kHz")
    let sample_rate_khz = sample_rate as f32 / 1000.0;

    let status_span = match status {
        Status::Idle => Span::styled("Ready", Style::default().fg(Color::DarkGray)),
        Status::Played(report) => Span::styled(
            format!(
                "▶ {} frames  shape {:.0}  fade {}  peak {:.2}",
                report.frames,
                report.shape,
                if report.fade { "on" } else { "off" },
                report.peak
            ),
            Style::default().fg(Color::Green),
        ),
        Status::Failed(message) => {
            Span::styled(format!("✗ {}", message), Style::default().fg(Color::Red))
        }
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {:.1}kHz  ", sample_rate_khz),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Tones: {}  ", triggers),
            Style::default().fg(Color::White),
        ),
        status_span,
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
