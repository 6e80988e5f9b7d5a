//! Driver adapter.
//!
//! Translates motion intents into pin writes and forwards static
//! configuration to the stepper driver chip.

use embedded_hal::digital::OutputPin;

use crate::error::{MotorError, Result};
use crate::hal::{DriverSettings, StepperDriver};
use crate::motion::Direction;

/// STEP/DIR/EN pins plus the driver's configuration channel.
///
/// The enable line is active-low, as on Trinamic and most step/dir
/// drivers.
pub struct DriverAdapter<STEP, DIR, EN, DRV>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DRV: StepperDriver,
{
    step_pin: STEP,
    dir_pin: DIR,
    enable_pin: EN,
    driver: DRV,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Last direction written to the DIR pin.
    direction: Direction,

    /// Last settings accepted by the driver.
    settings: DriverSettings,

    enabled: bool,
    step_high: bool,
}

impl<STEP, DIR, EN, DRV> DriverAdapter<STEP, DIR, EN, DRV>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DRV: StepperDriver,
{
    /// Wrap the pins and driver. Nothing is written until the first call.
    pub fn new(step_pin: STEP, dir_pin: DIR, enable_pin: EN, driver: DRV, invert_direction: bool) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            driver,
            invert_direction,
            direction: Direction::Forward,
            settings: DriverSettings::default(),
            enabled: false,
            step_high: false,
        }
    }

    /// Energize the motor (EN low).
    pub fn enable(&mut self) -> Result<()> {
        self.enable_pin.set_low().map_err(|_| MotorError::PinError)?;
        self.enabled = true;
        Ok(())
    }

    /// De-energize the motor (EN high).
    pub fn disable(&mut self) -> Result<()> {
        self.enable_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.enabled = false;
        Ok(())
    }

    /// Write the DIR pin and cache the direction.
    ///
    /// Always writes, even if the cached direction already matches.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        let pin_high = direction.is_forward() != self.invert_direction;

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.direction = direction;
        Ok(())
    }

    /// Drive the STEP line.
    pub fn set_step_line(&mut self, high: bool) -> Result<()> {
        if high {
            self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.step_pin.set_low().map_err(|_| MotorError::PinError)?;
        }
        self.step_high = high;
        Ok(())
    }

    /// Send current, microstep and chopper settings to the driver.
    pub fn configure(&mut self, settings: DriverSettings) -> Result<()> {
        self.driver.configure(&settings).map_err(|_e| {
            warn!("driver rejected configuration");
            MotorError::DriverConfig
        })?;

        debug!(
            "driver configured: {} mA, 1/{} microsteps, silent {}",
            settings.current.value(),
            settings.microsteps.value(),
            settings.silent_mode
        );
        self.settings = settings;
        Ok(())
    }

    /// Cached direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Settings last accepted by the driver.
    #[inline]
    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Whether the enable line was last driven active.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the step line was last driven high.
    #[inline]
    pub fn step_line_high(&self) -> bool {
        self.step_high
    }

    /// Give the pins and driver back.
    pub fn release(self) -> (STEP, DIR, EN, DRV) {
        (self.step_pin, self.dir_pin, self.enable_pin, self.driver)
    }
}
