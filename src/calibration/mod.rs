//! Limit switch calibration.
//!
//! Measures the travel between the two limit switches with a blocking
//! three-leg search and leaves the carriage on the start switch, which
//! becomes the zero reference.

mod engine;
mod switches;

pub use engine::{calibrate_and_measure, return_to_start, seek_switch};
pub use switches::LimitSwitches;

/// Pulse interval for the fast calibration run at `begin()` (µs).
pub const FAST_INTERVAL_US: u32 = 40;

/// Pulse interval for `reset_values()` and `return_to_start()` (µs).
pub const SAFE_INTERVAL_US: u32 = 400;

/// Intervals below this may stall the motor (µs).
pub const MIN_RELIABLE_INTERVAL_US: u32 = 400;

/// Calibration parameters of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationSettings {
    /// Interval used by `begin()`.
    pub fast_interval_us: u32,
    /// Interval used by `reset_values()` and `return_to_start()`.
    pub safe_interval_us: u32,
    /// Per-leg step ceiling; `None` searches indefinitely.
    pub max_travel_steps: Option<u32>,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            fast_interval_us: FAST_INTERVAL_US,
            safe_interval_us: SAFE_INTERVAL_US,
            max_travel_steps: None,
        }
    }
}

/// Outcome of a calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationReport {
    /// Steps taken to first reach the start switch.
    pub approach_steps: u32,
    /// Steps from the start switch to the end switch.
    pub length_a: u32,
    /// Steps from the end switch back to the start switch.
    pub length_b: u32,
    /// Mean of both legs, truncated.
    pub total_length: u32,
}

impl CalibrationReport {
    /// Build a report from measured legs.
    pub fn from_legs(approach_steps: u32, length_a: u32, length_b: u32) -> Self {
        let total_length = ((length_a as u64 + length_b as u64) / 2) as u32;
        Self {
            approach_steps,
            length_a,
            length_b,
            total_length,
        }
    }

    /// Difference between the two legs, a rough measure of backlash.
    #[inline]
    pub fn leg_difference(&self) -> u32 {
        self.length_a.abs_diff(self.length_b)
    }
}
