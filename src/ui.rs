pub mod adjust;
pub mod controls;
pub mod status;

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
    Frame,
};

use pomo::{app::App, pomodoro::Pomodoro};

use crate::ui::{adjust::DurationControls, controls::PlaybackControls, status::SessionStatus};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// Whole-screen view over a timer snapshot
pub struct PomodoroView<'a> {
    pub pomodoro: &'a Pomodoro,
    pub show_end_time: bool,
    pub now: DateTime<Local>,
}

impl Widget for PomodoroView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(4), // durations
                Constraint::Length(3), // play / pause / stop
                Constraint::Min(0),    // session status
                Constraint::Length(1), // key help
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "pomodoro",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        DurationControls::from(self.pomodoro).render(chunks[1], buf);
        PlaybackControls::from(self.pomodoro).render(chunks[2], buf);
        SessionStatus {
            pomodoro: self.pomodoro,
            ends_at: self.show_end_time.then_some(self.now),
        }
        .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            "(space/enter) play/pause | (s)top | focus (-/+) | break ([/]) | (q)uit",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }
}

pub fn ui<N: pomo::notify::Notifier>(app: &App<N>, f: &mut Frame) {
    let view = PomodoroView {
        pomodoro: &app.pomodoro,
        show_end_time: app.config.show_end_time,
        now: Local::now(),
    };
    f.render_widget(view, f.area());
}

#[cfg(test)]
pub(crate) fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(area.x + x, area.y + y)].symbol())
                .collect::<String>()
        })
        .collect()
}
