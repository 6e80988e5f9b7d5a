//! Oscillating stepper axis.
//!
//! Ties the driver adapter, the limit switches and the motion scheduler
//! together behind one owner.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::String;

use crate::calibration::{self, CalibrationReport, CalibrationSettings, LimitSwitches};
use crate::config::units::Microsteps;
use crate::error::{Error, MotorError, ProgramError, Result};
use crate::hal::{Clock, DriverSettings, StepperDriver};
use crate::motion::{Direction, MotionScheduler, OscillationParams, RunState, SineTiming, StepEvent};
use crate::program::ProgramRegistry;

use super::adapter::DriverAdapter;
use super::builder::AxisBuilder;
use super::position::Position;

/// Values restored by [`Axis::reset_values`] and applied by [`Axis::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisDefaults {
    /// Driver configuration.
    pub driver: DriverSettings,
    /// Sinusoid timing constants.
    pub timing: SineTiming,
}

/// A single stepper axis bounded by two limit switches.
///
/// Generic over:
/// - `STEP`, `DIR`, `EN`: output pins (`OutputPin`)
/// - `START`, `END`: limit switch inputs (`InputPin`)
/// - `DRV`: driver configuration channel (`StepperDriver`)
/// - `D`: busy-wait delay used by calibration (`DelayNs`)
/// - `C`: time source for the scheduler (`Clock`)
pub struct Axis<STEP, DIR, EN, START, END, DRV, D, C>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    START: InputPin,
    END: InputPin,
    DRV: StepperDriver,
    D: DelayNs,
    C: Clock,
{
    name: String<32>,
    adapter: DriverAdapter<STEP, DIR, EN, DRV>,
    switches: LimitSwitches<START, END>,
    delay: D,
    clock: C,
    scheduler: MotionScheduler,
    position: Position,

    /// Travel between the switches; zero until the first calibration.
    total_length: u32,

    defaults: AxisDefaults,
    calibration: CalibrationSettings,
    last_calibration: Option<CalibrationReport>,

    /// DIR write at a round boundary failed; retried before the next edge.
    direction_pending: bool,
}

impl<STEP, DIR, EN, START, END, DRV, D, C> Axis<STEP, DIR, EN, START, END, DRV, D, C>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    START: InputPin,
    END: InputPin,
    DRV: StepperDriver,
    D: DelayNs,
    C: Clock,
{
    /// Start building an axis.
    pub fn builder() -> AxisBuilder<STEP, DIR, EN, START, END, DRV, D, C> {
        AxisBuilder::new()
    }

    pub(crate) fn new(
        name: String<32>,
        adapter: DriverAdapter<STEP, DIR, EN, DRV>,
        switches: LimitSwitches<START, END>,
        delay: D,
        clock: C,
        defaults: AxisDefaults,
        calibration: CalibrationSettings,
    ) -> Self {
        Self {
            name,
            adapter,
            switches,
            delay,
            clock,
            scheduler: MotionScheduler::new(defaults.timing),
            position: Position::new(),
            total_length: 0,
            defaults,
            calibration,
            last_calibration: None,
            direction_pending: false,
        }
    }

    /// Bring the axis up.
    ///
    /// Configures the driver with the defaults, energizes the motor, faces
    /// forward and runs a fast calibration.
    pub fn begin(&mut self) -> Result<CalibrationReport> {
        self.ensure_not_running()?;
        info!("axis {}: starting", self.name.as_str());
        self.adapter.configure(self.defaults.driver)?;
        self.adapter.enable()?;
        self.set_direction(Direction::Forward)?;
        self.calibrate(self.calibration.fast_interval_us)
    }

    /// Restore default timing, microstepping and direction, then
    /// recalibrate at the safe interval.
    pub fn reset_values(&mut self) -> Result<CalibrationReport> {
        self.ensure_not_running()?;

        self.scheduler.set_timing(self.defaults.timing);
        self.set_microstep_factor(self.defaults.driver.microsteps)?;
        self.set_direction(Direction::Forward)?;
        self.calibrate(self.calibration.safe_interval_us)
    }

    /// Measure the travel between the switches.
    ///
    /// Blocks until all three legs complete. The carriage ends on the start
    /// switch, which becomes the origin, facing forward.
    ///
    /// # Errors
    ///
    /// - `MotorError::InvalidState` while a run is in progress
    /// - `CalibrationError` if a switch is not reached within the ceiling
    pub fn calibrate(&mut self, interval_us: u32) -> Result<CalibrationReport> {
        self.ensure_not_running()?;
        self.release_step_line()?;

        let report = calibration::calibrate_and_measure(
            &mut self.adapter,
            &mut self.switches,
            &mut self.delay,
            interval_us,
            self.calibration.max_travel_steps,
        )?;

        self.position.set_origin();
        self.total_length = report.total_length;
        self.scheduler.set_direction(self.adapter.direction());
        self.direction_pending = false;
        self.last_calibration = Some(report);
        Ok(report)
    }

    /// Drive back onto the start switch at the safe interval.
    ///
    /// Returns the steps emitted. Leaves the measured length untouched.
    pub fn return_to_start(&mut self) -> Result<u32> {
        self.ensure_not_running()?;
        self.release_step_line()?;

        let steps = calibration::return_to_start(
            &mut self.adapter,
            &mut self.switches,
            &mut self.delay,
            self.calibration.safe_interval_us,
            self.calibration.max_travel_steps,
        )?;

        self.position.set_origin();
        self.scheduler.set_direction(self.adapter.direction());
        self.direction_pending = false;
        Ok(steps)
    }

    /// Arm an oscillation run.
    ///
    /// Resets any run in progress. The first call to [`run`](Self::run)
    /// latches the start time.
    pub fn config(
        &mut self,
        frequency: f32,
        amplitude: i32,
        steps_per_round: u32,
        direction: Direction,
        rounds: u32,
    ) -> Result<()> {
        self.release_step_line()?;
        self.adapter.set_direction(direction)?;
        self.direction_pending = false;

        self.scheduler.arm(OscillationParams {
            frequency,
            amplitude,
            steps_per_round,
            direction,
            rounds,
        });

        info!(
            "axis {}: armed f={} A={} steps={} dir={} rounds={}",
            self.name.as_str(),
            frequency,
            amplitude,
            steps_per_round,
            direction,
            rounds
        );
        Ok(())
    }

    /// Arm a named oscillation preset.
    ///
    /// # Errors
    ///
    /// - `ProgramError::InvalidName` if the preset does not exist or
    ///   targets another axis
    /// - `MotionError` if the preset parameters are unusable
    pub fn arm_program(&mut self, name: &str, registry: &ProgramRegistry) -> Result<()> {
        let preset = match registry.get(name) {
            Some(p) => p,
            None => {
                let mut msg: String<64> = String::new();
                let _ = msg.push_str("oscillation '");
                let _ = msg.push_str(name);
                let _ = msg.push_str("' not found");
                return Err(Error::Program(ProgramError::InvalidName(msg)));
            }
        };

        if preset.axis.as_str() != self.name.as_str() {
            let mut msg: String<64> = String::new();
            let _ = msg.push_str("oscillation '");
            let _ = msg.push_str(name);
            let _ = msg.push_str("' is for axis '");
            let _ = msg.push_str(preset.axis.as_str());
            let _ = msg.push_str("'");
            return Err(Error::Program(ProgramError::InvalidName(msg)));
        }

        preset.check()?;
        self.config(
            preset.frequency,
            preset.amplitude,
            preset.steps_per_round,
            preset.direction,
            preset.rounds,
        )
    }

    /// Evaluate the scheduler once and apply its output to the pins.
    ///
    /// Never blocks. Returns the event applied, if any.
    ///
    /// If the direction change at a round boundary fails, the error is
    /// returned and the write is retried on every later call before any
    /// step edge is emitted.
    pub fn run(&mut self) -> Result<Option<StepEvent>> {
        if !self.scheduler.is_active() {
            return Ok(None);
        }

        if self.direction_pending {
            self.adapter.set_direction(self.scheduler.direction())?;
            self.direction_pending = false;
        }

        let now = self.clock.now();
        let event = self.scheduler.poll(now);

        match event {
            Some(StepEvent::StepHigh) => self.adapter.set_step_line(true)?,
            Some(StepEvent::StepLow) => {
                self.adapter.set_step_line(false)?;
                self.position.advance(self.adapter.direction());
            }
            Some(StepEvent::RoundComplete(direction)) => {
                if let Err(e) = self.adapter.set_direction(direction) {
                    warn!("axis {}: direction change failed, will retry", self.name.as_str());
                    self.direction_pending = true;
                    return Err(e);
                }
            }
            Some(StepEvent::Finished) => {
                info!("axis {}: run finished", self.name.as_str());
            }
            None => {}
        }

        Ok(event)
    }

    /// Energize the motor.
    pub fn enable(&mut self) -> Result<()> {
        self.adapter.enable()
    }

    /// De-energize the motor.
    pub fn disable(&mut self) -> Result<()> {
        self.adapter.disable()
    }

    fn ensure_not_running(&self) -> Result<()> {
        if self.scheduler.state() == RunState::Running {
            let state = String::try_from(RunState::Running.name()).unwrap_or_default();
            return Err(Error::Motor(MotorError::InvalidState(state)));
        }
        Ok(())
    }

    fn release_step_line(&mut self) -> Result<()> {
        if self.adapter.step_line_high() {
            self.adapter.set_step_line(false)?;
        }
        Ok(())
    }

    // Accessors

    /// Axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Travel between the switches in steps.
    #[inline]
    pub fn total_length(&self) -> u32 {
        self.total_length
    }

    /// Steps from the start switch.
    #[inline]
    pub fn current_position(&self) -> u32 {
        self.position.steps()
    }

    /// Microstep divisor last sent to the driver.
    #[inline]
    pub fn microstep_factor(&self) -> Microsteps {
        self.adapter.settings().microsteps
    }

    /// Sinusoid frequency.
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.scheduler.frequency()
    }

    /// Sinusoid amplitude.
    #[inline]
    pub fn amplitude(&self) -> i32 {
        self.scheduler.amplitude()
    }

    /// Steps left across all rounds.
    #[inline]
    pub fn remaining_step_count(&self) -> u64 {
        self.scheduler.remaining_step_count()
    }

    /// Current direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.adapter.direction()
    }

    /// Rounds left, counting the current one.
    #[inline]
    pub fn remaining_rounds(&self) -> u32 {
        self.scheduler.rounds_remaining()
    }

    /// Scheduler state.
    #[inline]
    pub fn run_state(&self) -> RunState {
        self.scheduler.state()
    }

    /// Half-period of the current step.
    #[inline]
    pub fn half_period_us(&self) -> u32 {
        self.scheduler.half_period_us()
    }

    /// Whether the step line is asserted.
    #[inline]
    pub fn step_line_high(&self) -> bool {
        self.adapter.step_line_high()
    }

    /// Result of the most recent calibration.
    #[inline]
    pub fn last_calibration(&self) -> Option<&CalibrationReport> {
        self.last_calibration.as_ref()
    }

    /// Settings last accepted by the driver.
    #[inline]
    pub fn driver_settings(&self) -> &DriverSettings {
        self.adapter.settings()
    }

    /// Values restored by `reset_values`.
    #[inline]
    pub fn defaults(&self) -> &AxisDefaults {
        &self.defaults
    }

    /// Calibration parameters.
    #[inline]
    pub fn calibration_settings(&self) -> &CalibrationSettings {
        &self.calibration
    }

    /// Scheduler timing constants.
    #[inline]
    pub fn timing(&self) -> &SineTiming {
        self.scheduler.timing()
    }

    // Mutators

    /// Set the sinusoid frequency.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.scheduler.set_frequency(frequency);
    }

    /// Set the sinusoid amplitude.
    pub fn set_amplitude(&mut self, amplitude: i32) {
        self.scheduler.set_amplitude(amplitude);
    }

    /// Change the microstep divisor and push it to the driver.
    pub fn set_microstep_factor(&mut self, microsteps: Microsteps) -> Result<()> {
        let settings = DriverSettings {
            microsteps,
            ..*self.adapter.settings()
        };
        self.adapter.configure(settings)
    }

    /// Set the per-round step count and reset the current round.
    pub fn set_step_count(&mut self, steps: u32) {
        self.scheduler.set_step_count(steps);
    }

    /// Write the direction pin now and make it the current round's
    /// direction.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        self.adapter.set_direction(direction)?;
        self.scheduler.set_direction(direction);
        self.direction_pending = false;
        Ok(())
    }

    /// Set the number of rounds left.
    pub fn set_rounds(&mut self, rounds: u32) {
        self.scheduler.set_rounds(rounds);
    }

    /// Replace the sinusoid timing constants.
    pub fn set_timing(&mut self, timing: SineTiming) {
        self.scheduler.set_timing(timing);
    }
}
