use chrono::{DateTime, Local, TimeDelta};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use pomo::{
    duration::{minutes_to_duration, seconds_to_duration},
    pomodoro::{Pomodoro, SessionLabel},
};

/// Title, countdown, paused marker and progress bar of the current session.
/// Renders nothing until a session has been started.
pub struct SessionStatus<'a> {
    pub pomodoro: &'a Pomodoro,
    /// Clock used to show when a running session ends; `None` hides the line.
    pub ends_at: Option<DateTime<Local>>,
}

fn label_color(label: SessionLabel) -> Color {
    match label {
        SessionLabel::Focusing => Color::Red,
        SessionLabel::OnBreak => Color::Green,
    }
}

impl Widget for SessionStatus<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.pomodoro.has_started() {
            return;
        }
        let Some(session) = self.pomodoro.session() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // remaining
                Constraint::Length(1), // paused / ends at
                Constraint::Length(3), // progress bar
                Constraint::Min(0),
            ])
            .split(area);

        let color = label_color(session.label);
        let bold = Style::default().add_modifier(Modifier::BOLD);

        Paragraph::new(Span::styled(
            format!(
                "{} for {} minutes",
                session.label,
                minutes_to_duration(session.duration)
            ),
            bold.fg(color),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(format!(
            "{} remaining",
            seconds_to_duration(session.time_remaining)
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        if !self.pomodoro.is_running() {
            Paragraph::new(Span::styled("PAUSED", bold.fg(Color::Yellow)))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        } else if let Some(now) = self.ends_at {
            let end = now + TimeDelta::seconds(i64::from(session.time_remaining));
            Paragraph::new(Span::styled(
                format!("ends at {}", end.format("%H:%M")),
                Style::default().add_modifier(Modifier::DIM),
            ))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
        }

        let percentage = self.pomodoro.progress_percentage().clamp(0.0, 100.0);
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(color))
            .ratio(percentage / 100.0)
            .label(format!("{percentage:.0}%"))
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;

    fn render(pomodoro: &Pomodoro) -> Vec<String> {
        let area = Rect::new(0, 0, 60, 8);
        let mut buffer = Buffer::empty(area);
        SessionStatus {
            pomodoro,
            ends_at: None,
        }
        .render(area, &mut buffer);
        buffer_lines(&buffer)
    }

    #[test]
    fn test_nothing_rendered_before_first_play() {
        let lines = render(&Pomodoro::new());
        assert!(lines.iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_nothing_rendered_after_stop() {
        let mut pomodoro = Pomodoro::new();
        pomodoro.play_pause();
        pomodoro.stop();
        let lines = render(&pomodoro);
        assert!(lines.iter().all(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_break_session_title_and_countdown() {
        let mut pomodoro = Pomodoro::new();
        pomodoro.play_pause();
        for _ in 0..1501 {
            pomodoro.tick();
        }
        let lines = render(&pomodoro);

        assert!(lines[0].contains("On Break for 00:05 minutes"));
        assert!(lines[1].contains("04:59 remaining"));
    }

    #[test]
    fn test_progress_label_follows_percentage() {
        let mut pomodoro = Pomodoro::new();
        pomodoro.play_pause();
        for _ in 0..750 {
            pomodoro.tick();
        }
        let lines = render(&pomodoro);
        assert!(lines.iter().any(|l| l.contains("50%")));
    }

    #[test]
    fn test_label_colors() {
        assert_eq!(label_color(SessionLabel::Focusing), Color::Red);
        assert_eq!(label_color(SessionLabel::OnBreak), Color::Green);
    }
}
