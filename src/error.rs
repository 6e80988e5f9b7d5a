//! Error types for stepper-oscillate.
//!
//! Provides unified error handling across configuration, driver I/O,
//! calibration and motion scheduling.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-oscillate operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Pin or driver error
    Motor(MotorError),
    /// Limit switch search error
    Calibration(CalibrationError),
    /// Oscillation parameter error
    Motion(MotionError),
    /// Named oscillation lookup error
    Program(ProgramError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Driver current must be > 0
    InvalidCurrent(u16),
    /// Time scale must be finite and > 0
    InvalidTimeScale(f32),
    /// Minimum half-period must be > 0
    InvalidMinHalfPeriod(u32),
    /// Calibration step interval must be > 0
    InvalidCalibrationInterval(u32),
    /// A required builder field was not supplied
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Pin and driver errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// The stepper driver rejected its configuration
    DriverConfig,
    /// Axis is in wrong state for requested operation
    InvalidState(heapless::String<32>),
}

/// Which limit switch an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitSwitch {
    /// Switch at the origin end of travel.
    Start,
    /// Switch at the far end of travel.
    End,
}

/// Calibration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// A switch never reported its active level within the step ceiling
    SwitchNotReached {
        /// Switch being searched for
        switch: LimitSwitch,
        /// Steps emitted before giving up
        steps: u32,
    },
    /// Step interval of zero
    ZeroInterval,
}

/// Oscillation parameter errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Frequency is NaN or infinite
    InvalidFrequency(f32),
    /// Rounds were requested with no steps per round
    EmptyRound {
        /// Requested rounds
        rounds: u32,
    },
}

/// Oscillation preset errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// Preset references an axis missing from configuration
    AxisNotFound {
        /// Preset name
        program: heapless::String<32>,
        /// Referenced axis name
        axis: heapless::String<32>,
    },
    /// Preset lookup failed or preset is for another axis
    InvalidName(heapless::String<64>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Calibration(e) => write!(f, "Calibration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Program(e) => write!(f, "Program error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::InvalidCurrent(v) => write!(f, "Invalid driver current: {} mA. Must be > 0", v),
            ConfigError::InvalidTimeScale(v) => write!(f, "Invalid time scale: {}. Must be > 0", v),
            ConfigError::InvalidMinHalfPeriod(v) => {
                write!(f, "Invalid minimum half-period: {} us. Must be > 0", v)
            }
            ConfigError::InvalidCalibrationInterval(v) => {
                write!(f, "Invalid calibration interval: {} us. Must be > 0", v)
            }
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::DriverConfig => write!(f, "Stepper driver configuration failed"),
            MotorError::InvalidState(state) => write!(f, "Invalid axis state: {}", state),
        }
    }
}

impl fmt::Display for LimitSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitSwitch::Start => write!(f, "start"),
            LimitSwitch::End => write!(f, "end"),
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::SwitchNotReached { switch, steps } => {
                write!(f, "{} switch not reached after {} steps", switch, steps)
            }
            CalibrationError::ZeroInterval => write!(f, "Calibration step interval must be > 0"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::InvalidFrequency(v) => write!(f, "Invalid frequency: {}", v),
            MotionError::EmptyRound { rounds } => {
                write!(f, "{} rounds requested with zero steps per round", rounds)
            }
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::AxisNotFound { program, axis } => {
                write!(f, "Oscillation '{}' references unknown axis '{}'", program, axis)
            }
            ProgramError::InvalidName(name) => write!(f, "Invalid oscillation: {}", name),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<CalibrationError> for Error {
    fn from(e: CalibrationError) -> Self {
        Error::Calibration(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<ProgramError> for Error {
    fn from(e: ProgramError) -> Self {
        Error::Program(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for CalibrationError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for ProgramError {}
