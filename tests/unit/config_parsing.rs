//! Unit tests for TOML configuration parsing.

use stepper_oscillate::config::{load_config, SystemConfig, SwitchLevel};
use stepper_oscillate::{Direction, Microsteps};

/// Test parsing a fully specified axis.
#[test]
fn test_parse_axis_config() {
    let toml_str = r#"
[axes.slide]
name = "slide"
switch_active_level = "high"
invert_direction = true

[axes.slide.driver]
current_ma = 1200
microsteps = 64
silent_mode = false

[axes.slide.timing]
time_scale = 150.0
bias_us = 200
min_half_period_us = 50

[axes.slide.calibration]
fast_interval_us = 100
safe_interval_us = 800
max_travel_steps = 20000
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let axis = config.axis("slide").expect("Axis not found");

    assert_eq!(axis.name.as_str(), "slide");
    assert_eq!(axis.switch_active_level, SwitchLevel::High);
    assert!(axis.invert_direction);
    assert_eq!(axis.driver.current.value(), 1200);
    assert_eq!(axis.driver.microsteps, Microsteps::SIXTY_FOURTH);
    assert!(!axis.driver.silent_mode);

    let timing = axis.timing.timing();
    assert_eq!(timing.time_scale, 150.0);
    assert_eq!(timing.bias_us, 200);
    assert_eq!(timing.min_half_period_us, 50);

    let calibration = axis.calibration.settings();
    assert_eq!(calibration.fast_interval_us, 100);
    assert_eq!(calibration.safe_interval_us, 800);
    assert_eq!(calibration.max_travel_steps, Some(20000));
}

/// Test partial tables fall back to defaults field by field.
#[test]
fn test_partial_tables_use_defaults() {
    let toml_str = r#"
[axes.slide]
name = "slide"

[axes.slide.timing]
bias_us = 300
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let axis = config.axis("slide").expect("Axis not found");

    assert_eq!(axis.timing.bias_us, 300);
    assert_eq!(axis.timing.time_scale, 300.0);
    assert_eq!(axis.timing.min_half_period_us, 20);
    assert_eq!(axis.driver.current.value(), 600);
}

/// Test parsing oscillation presets.
#[test]
fn test_parse_oscillations() {
    let toml_str = r#"
[axes.slide]
name = "slide"

[oscillations.breathe]
axis = "slide"
frequency = 0.5
amplitude = 2000
steps_per_round = 6400
direction = "backward"
rounds = 10

[oscillations.tap]
axis = "slide"
frequency = 8.0
amplitude = 100
steps_per_round = 32
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    let breathe = config.oscillation("breathe").expect("Preset not found");
    assert_eq!(breathe.direction, Direction::Backward);
    assert_eq!(breathe.total_steps(), 64_000);

    let tap = config.oscillation("tap").expect("Preset not found");
    assert_eq!(tap.direction, Direction::Forward);
    assert_eq!(tap.rounds, 1);

    let names: Vec<&str> = config.oscillation_names().collect();
    assert_eq!(names, vec!["breathe", "tap"]);
}

/// Test invalid microstep values are rejected at parse time.
#[test]
fn test_invalid_microsteps_rejected() {
    let toml_str = r#"
[axes.slide]
name = "slide"

[axes.slide.driver]
microsteps = 12
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("stepper_oscillate_load_test.toml");
    std::fs::write(
        &path,
        "[axes.slide]\nname = \"slide\"\n\n[axes.slide.driver]\nmicrosteps = 8\n",
    )
    .expect("Failed to write temp config");

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(
        config.axis("slide").map(|a| a.driver.microsteps),
        Some(Microsteps::EIGHTH)
    );

    let _ = std::fs::remove_file(&path);
}
