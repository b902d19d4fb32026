use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clap::ValueEnum;
use log::{debug, warn};
use rodio::{source::SineWave, OutputStream, Sink, Source};
use serde::{Deserialize, Serialize};

use crate::pomodoro::{Session, SessionLabel};

/// Notes of the session-change chime: frequency in Hz, length in ms
const CHIME: &[(f32, u64)] = &[(880.0, 140), (1320.0, 220)];
const CHIME_VOLUME: f32 = 0.25;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    /// ring the terminal bell
    #[default]
    Bell,
    /// play a short chime on the default audio output
    Sound,
    /// stay quiet
    Off,
}

/// Side effect fired when one session hands over to the next.
///
/// Fire-and-forget: implementations never report failure to the timer.
pub trait Notifier {
    fn session_changed(&mut self, finished: &Session, next: &Session);
}

impl Notifier for Box<dyn Notifier> {
    fn session_changed(&mut self, finished: &Session, next: &Session) {
        (**self).session_changed(finished, next)
    }
}

/// Writes BEL to the terminal
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn session_changed(&mut self, _finished: &Session, _next: &Session) {
        let mut stdout = io::stdout();
        if let Err(err) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!("terminal bell failed: {err}");
        }
    }
}

/// One note of the chime as a finite source
pub fn chime_note(frequency: f32, millis: u64) -> impl Source<Item = f32> + Send + 'static {
    SineWave::new(frequency)
        .take_duration(Duration::from_millis(millis))
        .amplify(CHIME_VOLUME)
}

/// Length of the whole chime
pub fn chime_duration() -> Duration {
    CHIME
        .iter()
        .map(|&(frequency, millis)| chime_note(frequency, millis).total_duration())
        .sum::<Option<Duration>>()
        .unwrap_or_default()
}

/// Plays the chime to the end on the calling thread
fn play_chime() -> Result<(), String> {
    let (_stream, handle) = OutputStream::try_default()
        .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
    let sink =
        Sink::try_new(&handle).map_err(|e| format!("Failed to create audio sink: {}", e))?;
    for &(frequency, millis) in CHIME {
        sink.append(chime_note(frequency, millis));
    }
    sink.sleep_until_end();
    Ok(())
}

/// Plays the chime on a detached thread; rings the bell instead when no
/// audio output is available
#[derive(Debug, Default)]
pub struct SystemSound;

impl Notifier for SystemSound {
    fn session_changed(&mut self, finished: &Session, next: &Session) {
        let (finished, next) = (*finished, *next);
        let spawned = thread::Builder::new()
            .name("chime".to_string())
            .spawn(move || match play_chime() {
                Ok(()) => debug!("chime played for {}", next.label),
                Err(err) => {
                    warn!("{err}, falling back to the terminal bell");
                    TerminalBell.session_changed(&finished, &next);
                }
            });
        if let Err(err) = spawned {
            warn!("could not start the chime thread: {err}");
        }
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn session_changed(&mut self, _finished: &Session, _next: &Session) {}
}

/// Remembers every handover; used for headless runs and tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub transitions: Vec<(SessionLabel, SessionLabel)>,
}

impl Notifier for RecordingNotifier {
    fn session_changed(&mut self, finished: &Session, next: &Session) {
        self.transitions.push((finished.label, next.label));
    }
}

pub fn notifier_for(kind: NotificationKind) -> Box<dyn Notifier> {
    match kind {
        NotificationKind::Bell => Box::new(TerminalBell),
        NotificationKind::Sound => Box::new(SystemSound),
        NotificationKind::Off => Box::new(Silent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_collects_labels() {
        let mut notifier = RecordingNotifier::default();
        let focus = Session::new(SessionLabel::Focusing, 25);
        let brk = Session::new(SessionLabel::OnBreak, 5);

        notifier.session_changed(&focus, &brk);
        notifier.session_changed(&brk, &focus);

        assert_eq!(
            notifier.transitions,
            vec![
                (SessionLabel::Focusing, SessionLabel::OnBreak),
                (SessionLabel::OnBreak, SessionLabel::Focusing),
            ]
        );
    }

    #[test]
    fn test_notification_kind_serde() {
        let kind: NotificationKind = serde_json::from_str("\"sound\"").unwrap();
        assert_eq!(kind, NotificationKind::Sound);
        assert_eq!(serde_json::to_string(&NotificationKind::Off).unwrap(), "\"off\"");
        assert_eq!(NotificationKind::default(), NotificationKind::Bell);
    }

    #[test]
    fn test_notification_kind_display() {
        assert_eq!(NotificationKind::Bell.to_string(), "bell");
        assert_eq!(NotificationKind::Sound.to_string(), "sound");
        assert_eq!(NotificationKind::Off.to_string(), "off");
    }

    #[test]
    fn test_chime_is_short_and_finite() {
        assert_eq!(
            chime_note(880.0, 140).total_duration(),
            Some(Duration::from_millis(140))
        );
        assert_eq!(chime_duration(), Duration::from_millis(360));
    }

    #[test]
    fn test_chime_samples_stay_within_volume() {
        let samples: Vec<f32> = chime_note(440.0, 10).collect();
        assert!(!samples.is_empty());
        assert!(samples.iter().all(|s| s.abs() <= CHIME_VOLUME + f32::EPSILON));
    }

    #[test]
    fn test_silent_notifier_is_callable() {
        let mut notifier = notifier_for(NotificationKind::Off);
        let focus = Session::new(SessionLabel::Focusing, 25);
        notifier.session_changed(&focus, &focus.next(25, 5));
    }
}
