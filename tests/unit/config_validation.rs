//! Unit tests for configuration validation.

use stepper_oscillate::config::{validate_config, SystemConfig};
use stepper_oscillate::error::{ConfigError, Error, MotionError, ProgramError};

fn parse(toml_str: &str) -> SystemConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[axes.slide]
name = "slide"

[oscillations.sweep]
axis = "slide"
frequency = 1.0
amplitude = 1000
steps_per_round = 10
"#,
    );

    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a preset referencing a non-existent axis.
#[test]
fn test_oscillation_invalid_axis_reference() {
    let config = parse(
        r#"
[axes.slide]
name = "slide"

[oscillations.bad_ref]
axis = "nonexistent_axis"
frequency = 1.0
amplitude = 100
steps_per_round = 10
"#,
    );

    match validate_config(&config) {
        Err(Error::Program(ProgramError::AxisNotFound { program, axis })) => {
            assert_eq!(program.as_str(), "bad_ref");
            assert_eq!(axis.as_str(), "nonexistent_axis");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Test rounds without steps are rejected.
#[test]
fn test_empty_rounds_rejected() {
    let config = parse(
        r#"
[axes.slide]
name = "slide"

[oscillations.empty]
axis = "slide"
frequency = 1.0
amplitude = 100
steps_per_round = 0
rounds = 3
"#,
    );

    assert_eq!(
        validate_config(&config),
        Err(Error::Motion(MotionError::EmptyRound { rounds: 3 }))
    );
}

/// Test a zero driver current is rejected.
#[test]
fn test_zero_current_rejected() {
    let config = parse(
        r#"
[axes.slide]
name = "slide"

[axes.slide.driver]
current_ma = 0
"#,
    );

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidCurrent(0)))
    );
}

/// Test a zero half-period floor is rejected.
#[test]
fn test_zero_floor_rejected() {
    let config = parse(
        r#"
[axes.slide]
name = "slide"

[axes.slide.timing]
min_half_period_us = 0
"#,
    );

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMinHalfPeriod(0)))
    );
}

/// Test a fast interval below the reliable floor is accepted.
#[test]
fn test_fast_interval_below_floor_allowed() {
    let config = parse(
        r#"
[axes.slide]
name = "slide"

[axes.slide.calibration]
fast_interval_us = 10
"#,
    );

    assert!(validate_config(&config).is_ok());
}
