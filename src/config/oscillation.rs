//! Oscillation preset configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::error::{Error, MotionError, Result};
use crate::motion::Direction;

/// A named oscillation run from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OscillationConfig {
    /// Target axis name (must match an axis in config).
    pub axis: String<32>,

    /// Sinusoid frequency.
    pub frequency: f32,

    /// Sinusoid amplitude in microseconds.
    pub amplitude: i32,

    /// Steps emitted in each round.
    pub steps_per_round: u32,

    /// Direction of the first round.
    #[serde(default)]
    pub direction: Direction,

    /// Number of rounds; direction flips between rounds.
    #[serde(default = "default_rounds")]
    pub rounds: u32,
}

fn default_rounds() -> u32 {
    1
}

impl OscillationConfig {
    /// Total steps the run will emit.
    pub fn total_steps(&self) -> u64 {
        self.steps_per_round as u64 * self.rounds.max(1) as u64
    }

    /// Check the parameters describe a run the scheduler can execute.
    ///
    /// # Errors
    ///
    /// - `MotionError::InvalidFrequency` if the frequency is NaN or infinite
    /// - `MotionError::EmptyRound` if rounds are requested with zero steps
    pub fn check(&self) -> Result<()> {
        if !self.frequency.is_finite() {
            return Err(Error::Motion(MotionError::InvalidFrequency(self.frequency)));
        }

        if self.steps_per_round == 0 && self.rounds > 0 {
            return Err(Error::Motion(MotionError::EmptyRound {
                rounds: self.rounds,
            }));
        }

        Ok(())
    }
}
