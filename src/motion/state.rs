//! Run state of the motion scheduler.

use core::fmt;

/// Lifecycle of one oscillation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Nothing pending; `run()` is a no-op until the next `config()`.
    #[default]
    Idle,
    /// Configured but not yet polled; the reference time is latched on
    /// the first poll.
    Armed,
    /// Emitting steps.
    Running,
}

impl RunState {
    /// Get the state name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            RunState::Idle => "Idle",
            RunState::Armed => "Armed",
            RunState::Running => "Running",
        }
    }

    /// Whether steps are still owed.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, RunState::Idle)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
