//! Hardware capabilities not covered by embedded-hal.
//!
//! Pins and busy-wait delays come from embedded-hal 1.0 (`OutputPin`,
//! `InputPin`, `DelayNs`). Two more capabilities are needed: a free-running
//! clock for the non-blocking scheduler and the stepper driver's
//! configuration channel (SPI on a TMC5160, UART on a TMC2209, jumpers on a
//! plain step/dir driver).

use crate::config::units::{Microsteps, Milliamps};

/// A reading of the clock at both resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    /// Microseconds since an arbitrary epoch.
    pub micros: u64,
    /// Milliseconds since the same epoch.
    pub millis: u64,
}

impl Timestamp {
    /// Timestamp whose millisecond field is derived from `micros`.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Self {
            micros,
            millis: micros / 1000,
        }
    }
}

/// Monotonic time source.
///
/// The scheduler compares step intervals against the microsecond field of
/// `now` and feeds the millisecond field into the sinusoid phase. By
/// default both come from one `now_micros` reading. Boards with a separate
/// millisecond tick can override `now`.
pub trait Clock {
    /// Microseconds since an arbitrary, fixed epoch.
    fn now_micros(&mut self) -> u64;

    /// Milliseconds since the same epoch.
    fn now_millis(&mut self) -> u64 {
        self.now_micros() / 1000
    }

    /// Read both resolutions at one instant.
    fn now(&mut self) -> Timestamp {
        Timestamp::from_micros(self.now_micros())
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_micros(&mut self) -> u64 {
        (**self).now_micros()
    }

    fn now_millis(&mut self) -> u64 {
        (**self).now_millis()
    }

    fn now(&mut self) -> Timestamp {
        (**self).now()
    }
}

/// Static configuration pushed to the stepper driver chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSettings {
    /// RMS coil current.
    pub current: Milliamps,
    /// Microstep divisor.
    pub microsteps: Microsteps,
    /// Silent (stealthChop) chopper mode.
    pub silent_mode: bool,
}

impl DriverSettings {
    /// Default RMS current.
    pub const DEFAULT_CURRENT: Milliamps = Milliamps(600);
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            current: Self::DEFAULT_CURRENT,
            microsteps: Microsteps::THIRTY_SECOND,
            silent_mode: true,
        }
    }
}

/// Configuration channel of a stepper driver chip.
pub trait StepperDriver {
    /// Error reported by the underlying bus.
    type Error: core::fmt::Debug;

    /// Apply current, microstep and chopper settings.
    fn configure(&mut self, settings: &DriverSettings) -> Result<(), Self::Error>;
}

impl<D: StepperDriver + ?Sized> StepperDriver for &mut D {
    type Error = D::Error;

    fn configure(&mut self, settings: &DriverSettings) -> Result<(), Self::Error> {
        (**self).configure(settings)
    }
}

/// Driver whose settings are fixed in hardware (jumpers or defaults).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDriver;

impl StepperDriver for FixedDriver {
    type Error = core::convert::Infallible;

    fn configure(&mut self, _settings: &DriverSettings) -> Result<(), Self::Error> {
        Ok(())
    }
}
