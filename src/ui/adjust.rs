use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use pomo::{duration::minutes_to_duration, pomodoro::Pomodoro};

/// Focus and break duration readouts with their adjust keys.
/// Inert while the timer runs.
pub struct DurationControls {
    pub focus_duration: u32,
    pub break_duration: u32,
    pub locked: bool,
}

impl From<&Pomodoro> for DurationControls {
    fn from(pomodoro: &Pomodoro) -> Self {
        Self {
            focus_duration: pomodoro.focus_duration(),
            break_duration: pomodoro.break_duration(),
            locked: pomodoro.is_running(),
        }
    }
}

impl DurationControls {
    fn line(&self, label: &str, minutes: u32, keys: &str) -> Line<'static> {
        let key_style = if self.locked {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        Line::from(vec![
            Span::raw(format!("{label} Duration: {}", minutes_to_duration(minutes))),
            Span::raw("   "),
            Span::styled(keys.to_string(), key_style),
        ])
    }
}

impl Widget for DurationControls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            self.line("Focus", self.focus_duration, "[-] [+]"),
            self.line("Break", self.break_duration, "[[] []]"),
        ];

        let style = if self.locked {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };

        Paragraph::new(lines)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("Durations"))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;

    #[test]
    fn test_durations_render_as_hours_and_minutes() {
        let area = Rect::new(0, 0, 50, 4);
        let mut buffer = Buffer::empty(area);
        DurationControls {
            focus_duration: 60,
            break_duration: 15,
            locked: false,
        }
        .render(area, &mut buffer);

        let lines = buffer_lines(&buffer);
        assert!(lines[1].contains("Focus Duration: 01:00"));
        assert!(lines[2].contains("Break Duration: 00:15"));
    }

    #[test]
    fn test_locked_while_running() {
        let mut pomodoro = Pomodoro::new();
        assert!(!DurationControls::from(&pomodoro).locked);

        pomodoro.play_pause();
        assert!(DurationControls::from(&pomodoro).locked);

        pomodoro.play_pause();
        assert!(!DurationControls::from(&pomodoro).locked);
    }
}
