//! Configuration module for stepper-oscillate.
//!
//! Provides types for loading and validating axis and oscillation
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod axis;
mod oscillation;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::{AxisConfig, CalibrationConfig, DriverConfig, SwitchLevel, TimingConfig};
pub use oscillation::OscillationConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microsteps, Milliamps};
