//! Sinusoidal half-period computation.
//!
//! Each completed step recomputes the time the step line spends in one
//! logic phase:
//!
//! ```text
//! half = trunc(A * sin(f * rad_per_deg * elapsed_ms / time_scale)) + bias + A
//! ```
//!
//! With a non-negative amplitude the result never drops below `bias`.
//! Negative amplitudes can push it to zero or below, so the result is
//! raised to `min_half_period_us` before use.

use core::f32::consts::PI;

use libm::sinf;

/// Default divisor applied to elapsed milliseconds.
pub const DEFAULT_TIME_SCALE: f32 = 300.0;

/// Degrees-to-radians factor.
pub const RADIANS_PER_DEGREE: f32 = PI / 180.0;

/// Default constant added to every half-period (µs).
pub const DEFAULT_BIAS_US: i32 = 150;

/// Default half-period floor (µs).
pub const DEFAULT_MIN_HALF_PERIOD_US: u32 = 20;

/// Constants shaping the step interval sinusoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineTiming {
    /// Divisor applied to elapsed milliseconds before the sine.
    pub time_scale: f32,
    /// Degrees-to-radians factor applied to the phase.
    pub radians_per_degree: f32,
    /// Constant added to every half-period (µs).
    pub bias_us: i32,
    /// Half-period floor (µs).
    pub min_half_period_us: u32,
}

impl Default for SineTiming {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            radians_per_degree: RADIANS_PER_DEGREE,
            bias_us: DEFAULT_BIAS_US,
            min_half_period_us: DEFAULT_MIN_HALF_PERIOD_US,
        }
    }
}

impl SineTiming {
    /// Sinusoid term alone, truncated toward zero.
    pub fn modulation(&self, amplitude: i32, frequency: f32, elapsed_ms: u64) -> i32 {
        let phase = frequency * self.radians_per_degree * elapsed_ms as f32 / self.time_scale;
        (amplitude as f32 * sinf(phase)) as i32
    }

    /// Half-period before the floor is applied; may be zero or negative.
    pub fn raw_half_period(&self, amplitude: i32, frequency: f32, elapsed_ms: u64) -> i64 {
        self.modulation(amplitude, frequency, elapsed_ms) as i64
            + self.bias_us as i64
            + amplitude as i64
    }

    /// Raise a raw half-period to the configured floor.
    #[inline]
    pub fn clamp_half_period(&self, raw: i64) -> u32 {
        let floor = self.min_half_period_us.max(1);
        if raw < floor as i64 {
            floor
        } else {
            raw.min(u32::MAX as i64) as u32
        }
    }

    /// Half-period in microseconds for a run that started `elapsed_ms` ago.
    #[inline]
    pub fn half_period_us(&self, amplitude: i32, frequency: f32, elapsed_ms: u64) -> u32 {
        self.clamp_half_period(self.raw_half_period(amplitude, frequency, elapsed_ms))
    }
}
