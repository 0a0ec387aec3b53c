//! Focus countdown bound to a task.
//!
//! # Responsibility
//! - Model the tick-driven countdown state the timer widget displays.
//! - Report expiry exactly once so the caller can complete the bound task.
//!
//! # Invariants
//! - The core never schedules ticks; an external driver delivers them.
//! - Cancellation is simply ceasing to deliver ticks.

use crate::model::note::NoteId;

/// Default countdown length: 25 minutes.
pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;

/// Result of one delivered tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer is paused; nothing changed.
    Idle,
    /// One second elapsed; carries the remaining seconds.
    Running(u32),
    /// Countdown hit zero. The caller toggles completion for the bound
    /// task, if any, and the timer pauses itself.
    Expired { task: Option<NoteId> },
}

/// Countdown state for the focus-timer widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    remaining_secs: u32,
    running: bool,
    task: Option<NoteId>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    /// Creates a paused, unbound timer at the default duration.
    pub fn new() -> Self {
        Self {
            remaining_secs: DEFAULT_FOCUS_SECS,
            running: false,
            task: None,
        }
    }

    /// Binds a task and restarts the countdown, paused.
    pub fn bind(&mut self, id: NoteId) {
        self.task = Some(id);
        self.reset();
    }

    /// Starts or pauses the countdown; returns the new running state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Restores the default duration, paused. The binding is kept.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = DEFAULT_FOCUS_SECS;
    }

    /// Unbinds the task and pauses.
    pub fn close(&mut self) {
        self.running = false;
        self.task = None;
    }

    /// Consumes one elapsed-second signal.
    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return TimerTick::Expired { task: self.task };
        }
        TimerTick::Running(self.remaining_secs)
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn task(&self) -> Option<NoteId> {
        self.task
    }

    /// Renders the remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}
