use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use pomo::pomodoro::Pomodoro;

/// Play/pause toggle and stop button
pub struct PlaybackControls {
    pub is_running: bool,
    pub has_session: bool,
}

impl From<&Pomodoro> for PlaybackControls {
    fn from(pomodoro: &Pomodoro) -> Self {
        Self {
            is_running: pomodoro.is_running(),
            has_session: pomodoro.session().is_some(),
        }
    }
}

impl Widget for PlaybackControls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let play_pause = if self.is_running {
            Span::styled("⏸ Pause (space)", bold.fg(Color::Yellow))
        } else {
            Span::styled("▶ Play (space)", bold.fg(Color::Green))
        };

        let stop_style = if self.has_session {
            bold.fg(Color::Red)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        Paragraph::new(Line::from(vec![
            play_pause,
            Span::raw("    "),
            Span::styled("■ Stop (s)", stop_style),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(area, buf);
    }
}
