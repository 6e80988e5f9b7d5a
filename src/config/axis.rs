//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::calibration::{CalibrationSettings, FAST_INTERVAL_US, SAFE_INTERVAL_US};
use crate::hal::DriverSettings;
use crate::motion::{
    SineTiming, DEFAULT_BIAS_US, DEFAULT_MIN_HALF_PERIOD_US, DEFAULT_TIME_SCALE, RADIANS_PER_DEGREE,
};

use super::units::{Microsteps, Milliamps};

/// Logic level a limit switch reports when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchLevel {
    /// Pressed reads high.
    High,
    /// Pressed reads low (normally-closed wiring pulled up).
    #[default]
    Low,
}

impl SwitchLevel {
    /// Whether the active level is high.
    #[inline]
    pub fn is_high(self) -> bool {
        matches!(self, SwitchLevel::High)
    }
}

/// Complete axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Level both limit switches report when pressed.
    #[serde(default)]
    pub switch_active_level: SwitchLevel,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Stepper driver defaults applied at `begin()`.
    #[serde(default)]
    pub driver: DriverConfig,

    /// Sinusoid timing constants.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Limit switch search parameters.
    #[serde(default)]
    pub calibration: CalibrationConfig,
}

/// `[axes.<name>.driver]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// RMS coil current.
    #[serde(rename = "current_ma")]
    pub current: Milliamps,

    /// Microstep divisor.
    pub microsteps: Microsteps,

    /// Enable the silent (stealthChop) chopper mode.
    pub silent_mode: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        let settings = DriverSettings::default();
        Self {
            current: settings.current,
            microsteps: settings.microsteps,
            silent_mode: settings.silent_mode,
        }
    }
}

impl DriverConfig {
    /// Driver settings described by this table.
    pub fn settings(&self) -> DriverSettings {
        DriverSettings {
            current: self.current,
            microsteps: self.microsteps,
            silent_mode: self.silent_mode,
        }
    }
}

/// `[axes.<name>.timing]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Divisor applied to elapsed milliseconds before the sine.
    pub time_scale: f32,

    /// Degrees-to-radians factor applied to the phase.
    pub radians_per_degree: f32,

    /// Constant added to every half-period, in microseconds.
    pub bias_us: i32,

    /// Half-period floor in microseconds.
    pub min_half_period_us: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            radians_per_degree: RADIANS_PER_DEGREE,
            bias_us: DEFAULT_BIAS_US,
            min_half_period_us: DEFAULT_MIN_HALF_PERIOD_US,
        }
    }
}

impl TimingConfig {
    /// Runtime timing described by this table.
    pub fn timing(&self) -> SineTiming {
        SineTiming {
            time_scale: self.time_scale,
            radians_per_degree: self.radians_per_degree,
            bias_us: self.bias_us,
            min_half_period_us: self.min_half_period_us,
        }
    }
}

/// `[axes.<name>.calibration]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Pulse interval used by `begin()`.
    pub fast_interval_us: u32,

    /// Pulse interval used by `reset_values()` and `return_to_start()`.
    pub safe_interval_us: u32,

    /// Give up on a switch after this many steps in one leg.
    pub max_travel_steps: Option<u32>,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            fast_interval_us: FAST_INTERVAL_US,
            safe_interval_us: SAFE_INTERVAL_US,
            max_travel_steps: None,
        }
    }
}

impl CalibrationConfig {
    /// Runtime calibration settings described by this table.
    pub fn settings(&self) -> CalibrationSettings {
        CalibrationSettings {
            fast_interval_us: self.fast_interval_us,
            safe_interval_us: self.safe_interval_us,
            max_travel_steps: self.max_travel_steps,
        }
    }
}
