//! Builder pattern for Axis.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::String;

use crate::calibration::{CalibrationSettings, LimitSwitches};
use crate::config::units::{Microsteps, Milliamps};
use crate::config::{AxisConfig, SwitchLevel, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::hal::{Clock, StepperDriver};
use crate::motion::SineTiming;

use super::adapter::DriverAdapter;
use super::axis::{Axis, AxisDefaults};

/// Builder for creating Axis instances.
pub struct AxisBuilder<STEP, DIR, EN, START, END, DRV, D, C>
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
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    start_switch: Option<START>,
    end_switch: Option<END>,
    driver: Option<DRV>,
    delay: Option<D>,
    clock: Option<C>,
    name: Option<String<32>>,
    switch_active_level: SwitchLevel,
    invert_direction: bool,
    defaults: AxisDefaults,
    calibration: CalibrationSettings,
}

impl<STEP, DIR, EN, START, END, DRV, D, C> Default for AxisBuilder<STEP, DIR, EN, START, END, DRV, D, C>
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
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, START, END, DRV, D, C> AxisBuilder<STEP, DIR, EN, START, END, DRV, D, C>
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
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            start_switch: None,
            end_switch: None,
            driver: None,
            delay: None,
            clock: None,
            name: None,
            switch_active_level: SwitchLevel::default(),
            invert_direction: false,
            defaults: AxisDefaults::default(),
            calibration: CalibrationSettings::default(),
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the active-low EN pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the switch at the origin end of travel.
    pub fn start_switch(mut self, pin: START) -> Self {
        self.start_switch = Some(pin);
        self
    }

    /// Set the switch at the far end of travel.
    pub fn end_switch(mut self, pin: END) -> Self {
        self.end_switch = Some(pin);
        self
    }

    /// Set the driver configuration channel.
    pub fn driver(mut self, driver: DRV) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Set the delay provider used by calibration.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the scheduler's time source.
    pub fn clock(mut self, clock: C) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = String::try_from(name).ok();
        self
    }

    /// Set the level both switches report when pressed.
    pub fn switch_active_level(mut self, level: SwitchLevel) -> Self {
        self.switch_active_level = level;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the driver current applied at `begin()`.
    pub fn current(mut self, current: Milliamps) -> Self {
        self.defaults.driver.current = current;
        self
    }

    /// Set the default microstep divisor.
    pub fn microsteps(mut self, microsteps: Microsteps) -> Self {
        self.defaults.driver.microsteps = microsteps;
        self
    }

    /// Enable or disable the silent chopper mode.
    pub fn silent_mode(mut self, silent: bool) -> Self {
        self.defaults.driver.silent_mode = silent;
        self
    }

    /// Set the sinusoid timing constants.
    pub fn timing(mut self, timing: SineTiming) -> Self {
        self.defaults.timing = timing;
        self
    }

    /// Set the calibration parameters.
    pub fn calibration(mut self, settings: CalibrationSettings) -> Self {
        self.calibration = settings;
        self
    }

    /// Give up on a switch after `steps` steps in one calibration leg.
    pub fn max_travel_steps(mut self, steps: u32) -> Self {
        self.calibration.max_travel_steps = Some(steps);
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.name = Some(config.name.clone());
        self.switch_active_level = config.switch_active_level;
        self.invert_direction = config.invert_direction;
        self.defaults = AxisDefaults {
            driver: config.driver.settings(),
            timing: config.timing.timing(),
        };
        self.calibration = config.calibration.settings();
        self
    }

    /// Configure from SystemConfig by axis name.
    pub fn from_config(self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis_config = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(axis_config))
    }

    /// Build the Axis.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if a pin, the driver, the delay
    /// or the clock was not supplied.
    pub fn build(self) -> Result<Axis<STEP, DIR, EN, START, END, DRV, D, C>> {
        let step_pin = self.step_pin.ok_or(ConfigError::MissingField("step_pin"))?;
        let dir_pin = self.dir_pin.ok_or(ConfigError::MissingField("dir_pin"))?;
        let enable_pin = self.enable_pin.ok_or(ConfigError::MissingField("enable_pin"))?;
        let start_switch = self
            .start_switch
            .ok_or(ConfigError::MissingField("start_switch"))?;
        let end_switch = self.end_switch.ok_or(ConfigError::MissingField("end_switch"))?;
        let driver = self.driver.ok_or(ConfigError::MissingField("driver"))?;
        let delay = self.delay.ok_or(ConfigError::MissingField("delay"))?;
        let clock = self.clock.ok_or(ConfigError::MissingField("clock"))?;

        let name = self
            .name
            .unwrap_or_else(|| String::try_from("axis").unwrap_or_default());

        let adapter = DriverAdapter::new(step_pin, dir_pin, enable_pin, driver, self.invert_direction);
        let switches = LimitSwitches::new(start_switch, end_switch, self.switch_active_level);

        Ok(Axis::new(
            name,
            adapter,
            switches,
            delay,
            clock,
            self.defaults,
            self.calibration,
        ))
    }
}
