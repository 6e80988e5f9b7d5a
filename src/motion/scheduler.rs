//! Non-blocking step scheduler.
//!
//! The scheduler owns the countdown and timing state of an oscillation run
//! but never touches a pin. Each [`poll`](MotionScheduler::poll) compares the
//! supplied timestamp with the last recorded step and reports at most one
//! event for the caller to apply.

use crate::hal::Timestamp;

use super::direction::Direction;
use super::state::RunState;
use super::waveform::SineTiming;

/// Parameters of one oscillation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillationParams {
    /// Sinusoid frequency.
    pub frequency: f32,
    /// Sinusoid amplitude in microseconds.
    pub amplitude: i32,
    /// Steps in each round.
    pub steps_per_round: u32,
    /// Direction of the first round.
    pub direction: Direction,
    /// Number of rounds.
    pub rounds: u32,
}

/// Something the caller must apply to the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepEvent {
    /// Assert the step line.
    StepHigh,
    /// Deassert the step line; one step has completed.
    StepLow,
    /// A round finished; drive the direction line to the new direction.
    RoundComplete(Direction),
    /// All rounds finished.
    Finished,
}

/// Runtime state of an oscillation run.
#[derive(Debug, Clone)]
pub struct MotionScheduler {
    timing: SineTiming,

    frequency: f32,
    amplitude: i32,

    /// Reload value for the per-round countdown.
    steps_per_round: u32,
    steps_remaining: u32,
    rounds_remaining: u32,
    direction: Direction,

    state: RunState,

    /// Step line asserted within the current pulse.
    step_high: bool,

    /// Run start, latched on the first poll.
    reference: Timestamp,

    /// Microsecond timestamp of the last completed step.
    last_step_us: u64,

    /// Current half-period in microseconds.
    half_period_us: u32,
}

impl MotionScheduler {
    /// Create an idle scheduler.
    pub fn new(timing: SineTiming) -> Self {
        Self {
            timing,
            frequency: 0.0,
            amplitude: 0,
            steps_per_round: 0,
            steps_remaining: 0,
            rounds_remaining: 0,
            direction: Direction::Forward,
            state: RunState::Idle,
            step_high: false,
            reference: Timestamp::default(),
            last_step_us: 0,
            half_period_us: 0,
        }
    }

    /// Arm a new run.
    ///
    /// Resets the run unconditionally, even mid-run. The reference time is
    /// latched on the next poll.
    pub fn arm(&mut self, params: OscillationParams) {
        if self.state == RunState::Running {
            warn!(
                "re-armed with {} steps of the current run outstanding",
                self.remaining_step_count()
            );
        }
        if params.steps_per_round == 0 {
            warn!("armed with zero steps per round; run will finish immediately");
        }

        self.frequency = params.frequency;
        self.amplitude = params.amplitude;
        self.set_step_count(params.steps_per_round);
        self.direction = params.direction;
        self.rounds_remaining = params.rounds;
        self.step_high = false;
        self.state = RunState::Armed;
    }

    /// Advance the state machine to `now`.
    ///
    /// Returns `None` when nothing is due. Never blocks.
    pub fn poll(&mut self, now: Timestamp) -> Option<StepEvent> {
        match self.state {
            RunState::Idle => return None,
            RunState::Armed => self.start(now),
            RunState::Running => {}
        }

        if self.steps_remaining == 0 {
            return Some(self.roll_over());
        }

        let elapsed = now.micros.saturating_sub(self.last_step_us);

        if !self.step_high {
            if elapsed > (self.half_period_us / 2) as u64 {
                self.step_high = true;
                return Some(StepEvent::StepHigh);
            }
        } else if elapsed > self.half_period_us as u64 {
            self.last_step_us = now.micros;
            self.step_high = false;
            self.steps_remaining -= 1;

            let elapsed_ms = now.millis.saturating_sub(self.reference.millis);
            self.half_period_us =
                self.timing
                    .half_period_us(self.amplitude, self.frequency, elapsed_ms);

            return Some(StepEvent::StepLow);
        }

        None
    }

    fn start(&mut self, now: Timestamp) {
        self.reference = now;
        self.last_step_us = now.micros;
        self.half_period_us = self.timing.half_period_us(self.amplitude, self.frequency, 0);
        self.state = RunState::Running;
        debug!("run started, half-period {} us", self.half_period_us);
    }

    fn roll_over(&mut self) -> StepEvent {
        if self.rounds_remaining > 1 && self.steps_per_round > 0 {
            self.steps_remaining = self.steps_per_round;
            self.direction = self.direction.reversed();
            self.rounds_remaining -= 1;
            trace!("round complete, {} rounds remaining", self.rounds_remaining);
            StepEvent::RoundComplete(self.direction)
        } else {
            self.rounds_remaining = 0;
            self.state = RunState::Idle;
            StepEvent::Finished
        }
    }

    /// Current run state.
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Whether a run is armed or in progress.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Whether the step line is currently asserted.
    #[inline]
    pub fn step_line_high(&self) -> bool {
        self.step_high
    }

    /// Steps left across all rounds.
    pub fn remaining_step_count(&self) -> u64 {
        if self.rounds_remaining > 1 {
            (self.rounds_remaining as u64 - 1) * self.steps_per_round as u64
                + self.steps_remaining as u64
        } else {
            self.steps_remaining as u64
        }
    }

    /// Steps left in the current round.
    #[inline]
    pub fn steps_remaining_in_round(&self) -> u32 {
        self.steps_remaining
    }

    /// Steps in each round.
    #[inline]
    pub fn steps_per_round(&self) -> u32 {
        self.steps_per_round
    }

    /// Rounds left, counting the current one.
    #[inline]
    pub fn rounds_remaining(&self) -> u32 {
        self.rounds_remaining
    }

    /// Direction of the current round.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sinusoid frequency.
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sinusoid amplitude.
    #[inline]
    pub fn amplitude(&self) -> i32 {
        self.amplitude
    }

    /// Half-period used for the current step.
    #[inline]
    pub fn half_period_us(&self) -> u32 {
        self.half_period_us
    }

    /// Timing constants.
    #[inline]
    pub fn timing(&self) -> &SineTiming {
        &self.timing
    }

    /// Replace the timing constants.
    pub fn set_timing(&mut self, timing: SineTiming) {
        self.timing = timing;
    }

    /// Set the sinusoid frequency.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    /// Set the sinusoid amplitude.
    pub fn set_amplitude(&mut self, amplitude: i32) {
        self.amplitude = amplitude;
    }

    /// Set the per-round step count; also resets the current countdown.
    pub fn set_step_count(&mut self, steps: u32) {
        self.steps_per_round = steps;
        self.steps_remaining = steps;
    }

    /// Set the direction of the current round.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Set the number of rounds left.
    pub fn set_rounds(&mut self, rounds: u32) {
        self.rounds_remaining = rounds;
    }
}

impl Default for MotionScheduler {
    fn default() -> Self {
        Self::new(SineTiming::default())
    }
}
