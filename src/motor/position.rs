//! Position tracking.
//!
//! Steps counted from the start switch, which calibration sets as origin.

use crate::motion::Direction;

/// Carriage position in steps from the start switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    steps: u32,
}

impl Position {
    /// Position at the origin.
    #[inline]
    pub const fn new() -> Self {
        Self { steps: 0 }
    }

    /// Current position in steps.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Account for one completed step.
    ///
    /// Backward steps saturate at the origin; the start switch bounds the
    /// travel there.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        self.steps = match direction {
            Direction::Forward => self.steps.saturating_add(1),
            Direction::Backward => self.steps.saturating_sub(1),
        };
    }

    /// Set the current position as the new origin.
    #[inline]
    pub fn set_origin(&mut self) {
        self.steps = 0;
    }

    /// Whether the carriage sits at the origin.
    #[inline]
    pub fn is_at_origin(&self) -> bool {
        self.steps == 0
    }
}
