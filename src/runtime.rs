use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// How long the runner blocks for input while no interval is active
pub const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                // Windows reports releases too; only presses are intents
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Repeating timer that fires while its delay is set.
///
/// `None` (or a zero delay) means inactive: nothing is scheduled and any
/// pending firing is dropped. The callback is handed to [`Interval::fire`]
/// on every poll instead of being stored, so whatever closure the caller
/// holds at that moment is the one that runs.
#[derive(Debug, Clone)]
pub struct Interval {
    delay: Option<Duration>,
    next_due: Option<Instant>,
}

impl Interval {
    pub fn new(delay: Option<Duration>) -> Self {
        let mut interval = Self {
            delay: None,
            next_due: None,
        };
        interval.set_delay(delay, Instant::now());
        interval
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Change the delay. Only a different value reschedules; setting the same
    /// delay again leaves the pending firing where it is.
    pub fn set_delay(&mut self, delay: Option<Duration>, now: Instant) {
        let delay = delay.filter(|d| !d.is_zero());
        if delay == self.delay {
            return;
        }
        self.delay = delay;
        self.next_due = delay.map(|d| now + d);
    }

    /// Drop the pending firing. Nothing fires until a new delay is set.
    pub fn cancel(&mut self) {
        self.delay = None;
        self.next_due = None;
    }

    /// Time left before the next firing, `None` while inactive.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Run `callback` once if the interval is due at `now`. Returns whether it ran.
    pub fn fire<F: FnOnce()>(&mut self, now: Instant, callback: F) -> bool {
        let (Some(delay), Some(due)) = (self.delay, self.next_due) else {
            return false;
        };
        if now < due {
            return false;
        }

        // A lagging loop gets one firing, not a burst
        let next = due + delay;
        self.next_due = Some(if next <= now { now + delay } else { next });

        callback();
        true
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    interval: Interval,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self {
            event_source,
            interval: Interval::new(None),
        }
    }

    /// Activate ticking with `delay`, or stop it with `None`.
    pub fn set_interval(&mut self, delay: Option<Duration>) {
        self.interval.set_delay(delay, Instant::now());
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Teardown: no tick fires after this.
    pub fn shutdown(&mut self) {
        self.interval.cancel();
    }

    /// Blocks until an input event arrives or the interval is due.
    /// Returns `None` if nothing happened within the wait.
    pub fn step(&mut self) -> Option<AppEvent> {
        let now = Instant::now();
        let wait = self.interval.time_until_due(now).unwrap_or(IDLE_WAIT);

        match self.event_source.recv_timeout(wait) {
            Ok(ev) => return Some(ev),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => std::thread::sleep(wait),
        }

        let mut ticked = false;
        self.interval.fire(Instant::now(), || ticked = true);
        ticked.then_some(AppEvent::Tick)
    }
}
