pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

pub const MIN_FOCUS_MINUTES: u32 = 5;
pub const MAX_FOCUS_MINUTES: u32 = 60;
pub const FOCUS_STEP_MINUTES: u32 = 5;

pub const MIN_BREAK_MINUTES: u32 = 1;
pub const MAX_BREAK_MINUTES: u32 = 15;
pub const BREAK_STEP_MINUTES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionLabel {
    #[strum(serialize = "Focusing")]
    Focusing,
    #[strum(serialize = "On Break")]
    OnBreak,
}

/// One contiguous focus or break phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub label: SessionLabel,
    /// Minutes configured when the session began.
    pub duration: u32,
    /// Seconds left, floored at zero.
    pub time_remaining: u32,
}

impl Session {
    pub fn new(label: SessionLabel, duration: u32) -> Self {
        Self {
            label,
            duration,
            time_remaining: duration * 60,
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.duration * 60
    }

    /// Elapsed share of the session: 0 at the start, 100 once the countdown hits zero.
    pub fn progress_percentage(&self) -> f64 {
        let total = self.total_seconds();
        if total == 0 {
            return 100.0;
        }
        100.0 * (1.0 - self.time_remaining as f64 / total as f64)
    }

    /// The session that follows this one when it times out, sized from the
    /// durations configured right now.
    pub fn next(&self, focus_duration: u32, break_duration: u32) -> Session {
        match self.label {
            SessionLabel::Focusing => Session::new(SessionLabel::OnBreak, break_duration),
            SessionLabel::OnBreak => Session::new(SessionLabel::Focusing, focus_duration),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// What a single tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Idle,
    /// The countdown moved one second.
    Counted,
    /// The countdown reached zero and the next session replaced `finished`.
    Transitioned { finished: Session, next: Session },
}

/// The timer state machine. Performs no I/O; callers react to the
/// [`TickOutcome`] returned from [`Pomodoro::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pomodoro {
    is_running: bool,
    session: Option<Session>,
    has_started: bool,
    focus_duration: u32,
    break_duration: u32,
    progress_percentage: f64,
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self {
            is_running: false,
            session: None,
            has_started: false,
            focus_duration: DEFAULT_FOCUS_MINUTES,
            break_duration: DEFAULT_BREAK_MINUTES,
            progress_percentage: 0.0,
        }
    }
}

impl Pomodoro {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (self.is_running, self.session.is_some()) {
            (true, _) => Phase::Running,
            (false, true) => Phase::Paused,
            (false, false) => Phase::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn focus_duration(&self) -> u32 {
        self.focus_duration
    }

    pub fn break_duration(&self) -> u32 {
        self.break_duration
    }

    pub fn progress_percentage(&self) -> f64 {
        self.progress_percentage
    }

    /// Start a fresh focus session, resume a paused one, or pause a running one.
    pub fn play_pause(&mut self) {
        if self.is_running {
            self.is_running = false;
            return;
        }

        if self.session.is_none() {
            self.session = Some(Session::new(SessionLabel::Focusing, self.focus_duration));
        }
        self.is_running = true;
        self.has_started = true;
    }

    /// Full reset: drops the session and restores the default durations.
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn increase_focus(&mut self) -> bool {
        let next = self.focus_duration + FOCUS_STEP_MINUTES;
        self.adjust_focus(next)
    }

    pub fn decrease_focus(&mut self) -> bool {
        match self.focus_duration.checked_sub(FOCUS_STEP_MINUTES) {
            Some(next) => self.adjust_focus(next),
            None => false,
        }
    }

    pub fn increase_break(&mut self) -> bool {
        let next = self.break_duration + BREAK_STEP_MINUTES;
        self.adjust_break(next)
    }

    pub fn decrease_break(&mut self) -> bool {
        match self.break_duration.checked_sub(BREAK_STEP_MINUTES) {
            Some(next) => self.adjust_break(next),
            None => false,
        }
    }

    fn adjust_focus(&mut self, minutes: u32) -> bool {
        if self.is_running || !(MIN_FOCUS_MINUTES..=MAX_FOCUS_MINUTES).contains(&minutes) {
            return false;
        }
        self.focus_duration = minutes;
        true
    }

    fn adjust_break(&mut self, minutes: u32) -> bool {
        if self.is_running || !(MIN_BREAK_MINUTES..=MAX_BREAK_MINUTES).contains(&minutes) {
            return false;
        }
        self.break_duration = minutes;
        true
    }

    /// Advance the countdown by one second.
    ///
    /// When the countdown reaches zero the session is replaced in the same
    /// tick, so the next session starts full and no second is lost at the
    /// boundary. The stored progress therefore never reads 100; the full
    /// session is only visible through [`Session::progress_percentage`].
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };

        session.time_remaining = session.time_remaining.saturating_sub(1);
        self.progress_percentage = session.progress_percentage();

        if session.time_remaining > 0 {
            return TickOutcome::Counted;
        }

        let finished = *session;
        let next = finished.next(self.focus_duration, self.break_duration);
        *session = next;
        self.progress_percentage = next.progress_percentage();

        TickOutcome::Transitioned { finished, next }
    }
}
