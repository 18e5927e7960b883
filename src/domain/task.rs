use std::time::Instant;
use uuid::Uuid;

/// Runtime phase of a task's timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// Per-task stopwatch.
///
/// `base_seconds` is the committed elapsed total; it only changes on
/// `stop`, `reset`, or an idle manual edit. While running, the displayed
/// value is derived from the clock and never written back until stop.
#[derive(Debug, Clone)]
pub struct Timer {
    phase: Phase,
    base_seconds: u64,
    started_at: Option<Instant>,
}

impl Timer {
    pub fn new(base_seconds: u64) -> Self {
        Self {
            phase: Phase::Idle,
            base_seconds,
            started_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn base_seconds(&self) -> u64 {
        self.base_seconds
    }

    /// Begin accumulating; no-op unless idle
    pub fn start(&mut self, now: Instant) {
        if self.phase == Phase::Idle {
            self.started_at = Some(now);
            self.phase = Phase::Running;
        }
    }

    /// Commit the run into `base_seconds` and return the new total;
    /// no-op unless running
    pub fn stop(&mut self, now: Instant) -> u64 {
        if let Some(started) = self.started_at.take() {
            self.base_seconds += now.saturating_duration_since(started).as_secs();
            self.phase = Phase::Idle;
        }
        self.base_seconds
    }

    /// Stop if running, then zero the committed total
    pub fn reset(&mut self, now: Instant) {
        self.stop(now);
        self.base_seconds = 0;
    }

    /// Overwrite the committed total; only honored while idle
    pub fn set_base(&mut self, seconds: u64) {
        if self.phase == Phase::Idle {
            self.base_seconds = seconds;
        }
    }

    /// Seconds to display right now: committed total plus the live run
    pub fn display_seconds(&self, now: Instant) -> u64 {
        match self.started_at {
            Some(started) => self.base_seconds + now.saturating_duration_since(started).as_secs(),
            None => self.base_seconds,
        }
    }
}

/// A task in the day's agenda
#[derive(Debug, Clone)]
pub struct Task {
    /// Stable id for internal references (not persisted)
    pub id: Uuid,
    pub title: String,
    /// Committed elapsed seconds; `None` means the field is unset
    pub duration: Option<u64>,
    pub timer: Timer,
}

impl Task {
    pub fn new(title: impl Into<String>, duration: Option<u64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            duration,
            timer: Timer::new(duration.unwrap_or(0)),
        }
    }

    /// Title for display and export; blank titles fall back to "Task N"
    /// (1-based position in the list)
    pub fn display_title(&self, index: usize) -> String {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            format!("Task {}", index + 1)
        } else {
            trimmed.to_string()
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.timer.start(now);
    }

    /// Stop the timer and commit the elapsed total into `duration`
    pub fn stop(&mut self, now: Instant) {
        let total = self.timer.stop(now);
        self.duration = Some(total);
    }

    /// Reset to an unset duration (stops the timer first if running)
    pub fn reset(&mut self, now: Instant) {
        self.timer.reset(now);
        self.duration = None;
    }

    /// Manual edit while idle: duration and timer base move together.
    /// While running the edit is ignored here; the caller keeps the typed
    /// text as a display override until the next stop.
    pub fn set_duration(&mut self, seconds: Option<u64>) {
        if !self.timer.is_running() {
            self.duration = seconds;
            self.timer.set_base(seconds.unwrap_or(0));
        }
    }

    /// Seconds the task's field should show right now
    pub fn display_seconds(&self, now: Instant) -> Option<u64> {
        if self.timer.is_running() {
            Some(self.timer.display_seconds(now))
        } else {
            self.duration
        }
    }
}
