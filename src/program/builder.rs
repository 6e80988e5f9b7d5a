//! Oscillation builder for programmatic preset creation.

use heapless::String;

use crate::config::OscillationConfig;
use crate::error::{Error, ProgramError, Result};
use crate::motion::Direction;

/// Builder for oscillation presets.
#[derive(Debug, Clone)]
pub struct OscillationBuilder {
    axis: Option<String<32>>,
    frequency: f32,
    amplitude: i32,
    steps_per_round: u32,
    direction: Direction,
    rounds: u32,
}

impl Default for OscillationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OscillationBuilder {
    /// Create a new builder: one forward round, flat sinusoid.
    pub fn new() -> Self {
        Self {
            axis: None,
            frequency: 0.0,
            amplitude: 0,
            steps_per_round: 0,
            direction: Direction::Forward,
            rounds: 1,
        }
    }

    /// Set the target axis name.
    pub fn axis(mut self, name: &str) -> Self {
        self.axis = String::try_from(name).ok();
        self
    }

    /// Set the sinusoid frequency.
    pub fn frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the sinusoid amplitude in microseconds.
    pub fn amplitude(mut self, amplitude: i32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set the steps in each round.
    pub fn steps_per_round(mut self, steps: u32) -> Self {
        self.steps_per_round = steps;
        self
    }

    /// Set the direction of the first round.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the number of rounds.
    pub fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Build the preset.
    ///
    /// # Errors
    ///
    /// - `ProgramError::InvalidName` if no axis was set
    /// - `MotionError` if the parameters fail [`OscillationConfig::check`]
    pub fn build(self) -> Result<OscillationConfig> {
        let axis = self.axis.ok_or_else(|| {
            Error::Program(ProgramError::InvalidName(
                String::try_from("axis not specified").unwrap_or_default(),
            ))
        })?;

        let preset = OscillationConfig {
            axis,
            frequency: self.frequency,
            amplitude: self.amplitude,
            steps_per_round: self.steps_per_round,
            direction: self.direction,
            rounds: self.rounds,
        };
        preset.check()?;

        Ok(preset)
    }
}
