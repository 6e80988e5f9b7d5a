//! Motion module for stepper-oscillate.
//!
//! Provides the sinusoidal step timing and the non-blocking scheduler that
//! turns it into step edges.

mod direction;
mod scheduler;
mod state;
mod waveform;

pub use direction::Direction;
pub use scheduler::{MotionScheduler, OscillationParams, StepEvent};
pub use state::RunState;
pub use waveform::{
    SineTiming, DEFAULT_BIAS_US, DEFAULT_MIN_HALF_PERIOD_US, DEFAULT_TIME_SCALE, RADIANS_PER_DEGREE,
};
