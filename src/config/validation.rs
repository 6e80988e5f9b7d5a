//! Configuration validation.

use crate::calibration::MIN_RELIABLE_INTERVAL_US;
use crate::error::{ConfigError, Error, ProgramError, Result};

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Driver current is non-zero
/// - Timing constants are usable (positive time scale and floor)
/// - Calibration intervals are non-zero
/// - Oscillation presets reference existing axes and describe runnable rounds
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, axis) in config.axes.iter() {
        validate_axis(name.as_str(), axis)?;
    }

    for (name, preset) in config.oscillations.iter() {
        validate_oscillation(name.as_str(), preset, config)?;
    }

    Ok(())
}

fn validate_axis(name: &str, config: &super::AxisConfig) -> Result<()> {
    if config.driver.current.value() == 0 {
        return Err(Error::Config(ConfigError::InvalidCurrent(
            config.driver.current.value(),
        )));
    }

    let time_scale = config.timing.time_scale;
    if !time_scale.is_finite() || time_scale <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidTimeScale(time_scale)));
    }

    if config.timing.min_half_period_us == 0 {
        return Err(Error::Config(ConfigError::InvalidMinHalfPeriod(0)));
    }

    let calibration = &config.calibration;
    for interval in [calibration.fast_interval_us, calibration.safe_interval_us] {
        if interval == 0 {
            return Err(Error::Config(ConfigError::InvalidCalibrationInterval(interval)));
        }
    }

    // Allowed, but the motor may stall below this.
    if calibration.fast_interval_us < MIN_RELIABLE_INTERVAL_US {
        debug!(
            "axis {}: fast calibration interval {} us is below {} us",
            name,
            calibration.fast_interval_us,
            MIN_RELIABLE_INTERVAL_US
        );
    }

    Ok(())
}

fn validate_oscillation(
    name: &str,
    preset: &super::OscillationConfig,
    config: &SystemConfig,
) -> Result<()> {
    // Axis must exist
    if config.axis(preset.axis.as_str()).is_none() {
        return Err(Error::Program(ProgramError::AxisNotFound {
            program: heapless::String::try_from(name).unwrap_or_default(),
            axis: preset.axis.clone(),
        }));
    }

    preset.check()
}
