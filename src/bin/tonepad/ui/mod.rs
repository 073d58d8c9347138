//! TUI module for tonepad
//!
//! Renders the controls and a preview of the last tone, and turns key
//! presses into control changes and start triggers.

mod controls;
mod header;
mod spectrum;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;
use tonepad::{io::playback::PlaybackSink, ToneDemo};

use controls::render_controls;
use header::{render_header, Status};
use spectrum::{render_spectrum, SpectrumPreview};
use waveform::render_waveform;

/// Frames shown in the preview window (also the FFT size)
const VIEW_LEN: usize = 1024;
/// Slider steps per PageUp/PageDown
const COARSE_STEPS: i32 = 10;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Nudge(i32),
    ToggleFade,
    Start,
    ScrollView(i32),
    Quit,
}

/// Map a key to an action. Unbound keys map to `None`.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Nudge(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Nudge(1)),
        KeyCode::PageDown => Some(Action::Nudge(-COARSE_STEPS)),
        KeyCode::PageUp => Some(Action::Nudge(COARSE_STEPS)),
        KeyCode::Char('f') | KeyCode::Char('c') => Some(Action::ToggleFade),
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char('[') => Some(Action::ScrollView(-1)),
        KeyCode::Char(']') => Some(Action::ScrollView(1)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Preview window starting at `offset`, cut short at the end of the buffer.
fn view_slice(preview: &[f32], offset: usize) -> &[f32] {
    let start = offset.min(preview.len());
    let end = (start + VIEW_LEN).min(preview.len());
    &preview[start..end]
}

/// UI application state
pub struct UiApp<S: PlaybackSink> {
    demo: ToneDemo<S>,
    /// Band levels of the current preview window
    spectrum: SpectrumPreview,
    /// First frame of the preview window
    view_offset: usize,
    status: Status,
    should_quit: bool,
}

impl<S: PlaybackSink> UiApp<S> {
    pub fn new(demo: ToneDemo<S>) -> Self {
        let spectrum = SpectrumPreview::silent(demo.sample_rate());
        Self {
            demo,
            spectrum,
            view_offset: 0,
            status: Status::Idle,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (redraws at least every 100ms)
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = action_for(key.code) {
                            self.apply(action);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Nudge(steps) => self.demo.controls_mut().nudge_shape(steps),
            Action::ToggleFade => self.demo.controls_mut().toggle_fade(),
            Action::Start => self.start(),
            Action::ScrollView(dir) => self.scroll(dir),
            Action::Quit => self.should_quit = true,
        }
    }

    fn start(&mut self) {
        self.status = match self.demo.start() {
            Ok(report) => {
                self.refresh_spectrum();
                Status::Played(report)
            }
            Err(err) => {
                tracing::error!("start failed: {err}");
                Status::Failed(err.to_string())
            }
        };
    }

    /// Move the preview window by half its length.
    fn scroll(&mut self, dir: i32) {
        let step = VIEW_LEN / 2;
        let last = self.demo.last_preview().len().saturating_sub(VIEW_LEN);
        self.view_offset = if dir < 0 {
            self.view_offset.saturating_sub(step)
        } else {
            (self.view_offset + step).min(last)
        };
        self.refresh_spectrum();
    }

    fn refresh_spectrum(&mut self) {
        self.spectrum =
            SpectrumPreview::analyze(self.view(), self.demo.sample_rate(), VIEW_LEN);
    }

    fn view(&self) -> &[f32] {
        view_slice(self.demo.last_preview(), self.view_offset)
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: header, controls, waveform, spectrum, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Length(3),  // Controls
                Constraint::Min(6),     // Waveform
                Constraint::Length(10), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        render_header(
            frame,
            chunks[0],
            self.demo.sample_rate(),
            self.demo.trigger_count(),
            &self.status,
        );
        render_controls(frame, chunks[1], self.demo.controls(), self.demo.sample_rate());
        render_waveform(frame, chunks[2], self.view(), self.view_offset);
        render_spectrum(frame, chunks[3], &self.spectrum);

        let help = Paragraph::new(
            " [←/→] Shape  [PgUp/PgDn] Coarse  [F] Fade  [Space] Start  [ [ ] ] Scroll  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonepad::io::playback::MemorySink;

    fn app() -> UiApp<MemorySink> {
        UiApp::new(ToneDemo::new(MemorySink::new(8_000)))
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for(KeyCode::Left), Some(Action::Nudge(-1)));
        assert_eq!(action_for(KeyCode::PageUp), Some(Action::Nudge(10)));
        assert_eq!(action_for(KeyCode::Char('f')), Some(Action::ToggleFade));
        assert_eq!(action_for(KeyCode::Enter), Some(Action::Start));
        assert_eq!(action_for(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Char('z')), None);
    }

    #[test]
    fn start_action_plays_and_reports() {
        let mut app = app();
        app.apply(Action::Nudge(2));
        app.apply(Action::Start);

        assert_eq!(app.demo.sink().played().len(), 1);
        assert!(matches!(app.status, Status::Played(report) if report.shape == 12.0));
        assert_eq!(app.view().len(), VIEW_LEN);
    }

    #[test]
    fn spectrum_follows_trigger_and_scroll() {
        let mut app = app();
        assert_eq!(app.spectrum, SpectrumPreview::silent(8_000));

        app.apply(Action::Start);
        let first = app.spectrum.clone();
        assert!(first.peak_hz().is_some());

        app.apply(Action::ScrollView(1));
        assert_eq!(
            app.spectrum,
            SpectrumPreview::analyze(app.view(), 8_000, VIEW_LEN)
        );
    }

    #[test]
    fn scroll_stays_inside_preview() {
        let mut app = app();
        app.apply(Action::Start);

        for _ in 0..100 {
            app.apply(Action::ScrollView(1));
        }
        assert_eq!(app.view_offset, 8_000 - VIEW_LEN);

        app.apply(Action::ScrollView(-1));
        assert_eq!(app.view_offset, 8_000 - VIEW_LEN - VIEW_LEN / 2);
    }
}
