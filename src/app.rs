use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};

use crate::config::Config;
use crate::notify::Notifier;
use crate::pomodoro::{Pomodoro, TickOutcome};

/// Something the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    PlayPause,
    Stop,
    IncreaseFocus,
    DecreaseFocus,
    IncreaseBreak,
    DecreaseBreak,
    Quit,
}

impl Intent {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            // ctrl+c to quit
            return (key.code == KeyCode::Char('c')).then_some(Intent::Quit);
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Enter => Some(Intent::PlayPause),
            KeyCode::Char('s') => Some(Intent::Stop),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Intent::IncreaseFocus),
            KeyCode::Char('-') => Some(Intent::DecreaseFocus),
            KeyCode::Char(']') => Some(Intent::IncreaseBreak),
            KeyCode::Char('[') => Some(Intent::DecreaseBreak),
            KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
            _ => None,
        }
    }
}

/// Owns the timer and routes intents and ticks into it
pub struct App<N: Notifier = Box<dyn Notifier>> {
    pub pomodoro: Pomodoro,
    pub config: Config,
    pub should_quit: bool,
    notifier: N,
}

impl<N: Notifier> App<N> {
    pub fn new(config: Config, notifier: N) -> Self {
        Self {
            pomodoro: Pomodoro::new(),
            config,
            should_quit: false,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The tick delay the runner should use right now: the configured
    /// period while running, inactive otherwise.
    pub fn tick_delay(&self) -> Option<Duration> {
        self.pomodoro
            .is_running()
            .then(|| self.config.tick_interval())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match Intent::from_key(key) {
            Some(intent) => {
                self.apply(intent);
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, intent: Intent) {
        let changed = match intent {
            Intent::PlayPause => {
                self.pomodoro.play_pause();
                true
            }
            Intent::Stop => {
                let had_session = self.pomodoro.session().is_some();
                self.pomodoro.stop();
                had_session
            }
            Intent::IncreaseFocus => self.pomodoro.increase_focus(),
            Intent::DecreaseFocus => self.pomodoro.decrease_focus(),
            Intent::IncreaseBreak => self.pomodoro.increase_break(),
            Intent::DecreaseBreak => self.pomodoro.decrease_break(),
            Intent::Quit => {
                self.should_quit = true;
                true
            }
        };

        if changed {
            debug!(
                "{:?} -> {:?} (focus {}m, break {}m)",
                intent,
                self.pomodoro.phase(),
                self.pomodoro.focus_duration(),
                self.pomodoro.break_duration()
            );
        }
    }

    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.pomodoro.tick();
        if let TickOutcome::Transitioned { finished, next } = &outcome {
            info!(
                "{} finished after {} minutes, {} for {} minutes",
                finished.label, finished.duration, next.label, next.duration
            );
            self.notifier.session_changed(finished, next);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::pomodoro::{Phase, SessionLabel};
    use assert_matches::assert_matches;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn test_app() -> App<RecordingNotifier> {
        App::new(Config::default(), RecordingNotifier::default())
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(Intent::from_key(key(' ')), Some(Intent::PlayPause));
        assert_eq!(Intent::from_key(key('p')), Some(Intent::PlayPause));
        assert_eq!(Intent::from_key(key('s')), Some(Intent::Stop));
        assert_eq!(Intent::from_key(key('+')), Some(Intent::IncreaseFocus));
        assert_eq!(Intent::from_key(key('=')), Some(Intent::IncreaseFocus));
        assert_eq!(Intent::from_key(key('-')), Some(Intent::DecreaseFocus));
        assert_eq!(Intent::from_key(key(']')), Some(Intent::IncreaseBreak));
        assert_eq!(Intent::from_key(key('[')), Some(Intent::DecreaseBreak));
        assert_eq!(Intent::from_key(key('q')), Some(Intent::Quit));
        assert_eq!(
            Intent::from_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Intent::Quit)
        );
        assert_eq!(
            Intent::from_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Intent::PlayPause)
        );
        assert_eq!(Intent::from_key(key('x')), None);
    }

    #[test]
    fn test_ctrl_c_quits_other_ctrl_keys_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(Intent::from_key(ctrl_c), Some(Intent::Quit));
        assert_eq!(Intent::from_key(ctrl_s), None);
    }

    #[test]
    fn test_tick_delay_follows_running_state() {
        let mut app = test_app();
        assert_eq!(app.tick_delay(), None);

        app.apply(Intent::PlayPause);
        assert_eq!(app.tick_delay(), Some(Duration::from_secs(1)));

        app.apply(Intent::PlayPause);
        assert_eq!(app.tick_delay(), None);

        app.apply(Intent::PlayPause);
        app.apply(Intent::Stop);
        assert_eq!(app.tick_delay(), None);
    }

    #[test]
    fn test_tick_delay_uses_configured_period() {
        let config = Config {
            tick_millis: 20,
            ..Config::default()
        };
        let mut app = App::new(config, RecordingNotifier::default());
        app.apply(Intent::PlayPause);
        assert_eq!(app.tick_delay(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_notifier_fires_once_per_transition() {
        let mut app = test_app();
        app.apply(Intent::DecreaseBreak);
        app.apply(Intent::DecreaseBreak);
        app.apply(Intent::DecreaseBreak);
        app.apply(Intent::DecreaseBreak);
        assert_eq!(app.pomodoro.break_duration(), 1);
        app.apply(Intent::PlayPause);

        for _ in 0..1499 {
            assert_matches!(app.on_tick(), TickOutcome::Counted);
        }
        assert!(app.notifier().transitions.is_empty());

        assert_matches!(app.on_tick(), TickOutcome::Transitioned { .. });
        assert_eq!(
            app.notifier().transitions,
            vec![(SessionLabel::Focusing, SessionLabel::OnBreak)]
        );

        for _ in 0..60 {
            app.on_tick();
        }
        assert_eq!(
            app.notifier().transitions,
            vec![
                (SessionLabel::Focusing, SessionLabel::OnBreak),
                (SessionLabel::OnBreak, SessionLabel::Focusing),
            ]
        );
    }

    #[test]
    fn test_ticks_ignored_while_paused() {
        let mut app = test_app();
        app.handle_key(key(' '));
        app.on_tick();
        app.handle_key(key(' '));
        assert_eq!(app.pomodoro.phase(), Phase::Paused);

        assert_matches!(app.on_tick(), TickOutcome::Idle);
        assert_eq!(app.pomodoro.session().unwrap().time_remaining, 1499);
    }

    #[test]
    fn test_handle_key_routes_adjustments() {
        let mut app = test_app();
        assert!(app.handle_key(key('+')));
        assert!(app.handle_key(key(']')));
        assert_eq!(app.pomodoro.focus_duration(), 30);
        assert_eq!(app.pomodoro.break_duration(), 6);

        assert!(!app.handle_key(key('z')));
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut app = test_app();
        assert!(!app.should_quit);
        app.handle_key(key('q'));
        assert!(app.should_quit);
    }
}
