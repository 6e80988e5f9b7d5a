//! # stepper-oscillate
//!
//! Sinusoidally modulated single-axis stepper motion with limit-switch
//! calibration and embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Calibration**: Measures travel between two limit switches, averaging
//!   both directions to cancel mechanical slack
//! - **Non-blocking motion**: `run()` emits at most one step edge per call
//! - **Sinusoidal timing**: Step interval follows `A * sin(f * t) + bias + A`
//! - **Rounds**: Direction reverses between rounds of a fixed step count
//! - **Configuration-driven**: Define axes and oscillation presets in TOML
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_oscillate::{Axis, Direction, SystemConfig};
//!
//! // Load configuration from TOML
//! let config: SystemConfig = stepper_oscillate::load_config("axis.toml")?;
//!
//! // Create axis with embedded-hal pins
//! let mut axis = Axis::builder()
//!     .from_config(&config, "slide")?
//!     .step_pin(step_pin)
//!     .dir_pin(dir_pin)
//!     .enable_pin(enable_pin)
//!     .start_switch(start_switch)
//!     .end_switch(end_switch)
//!     .driver(driver)
//!     .delay(delay)
//!     .clock(clock)
//!     .build()?;
//!
//! axis.begin()?;
//! axis.config(1.0, 1000, 3200, Direction::Forward, 4)?;
//! loop {
//!     axis.run()?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables logging through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

// Core modules
pub mod calibration;
pub mod config;
pub mod error;
pub mod hal;
pub mod motion;
pub mod motor;
pub mod program;

// Re-exports for ergonomic API
pub use calibration::{CalibrationReport, CalibrationSettings, LimitSwitches};
pub use config::{validate_config, AxisConfig, OscillationConfig, SwitchLevel, SystemConfig};
pub use error::{Error, LimitSwitch, Result};
pub use hal::{Clock, DriverSettings, FixedDriver, StepperDriver, Timestamp};
pub use motion::{Direction, MotionScheduler, OscillationParams, RunState, SineTiming, StepEvent};
pub use motor::{Axis, AxisBuilder, DriverAdapter, Position};
pub use program::{OscillationBuilder, ProgramRegistry};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Microsteps, Milliamps};
