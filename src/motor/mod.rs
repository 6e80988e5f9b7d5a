//! Motor module for stepper-oscillate.
//!
//! Provides the driver adapter and the oscillating axis built on it.

mod adapter;
mod axis;
mod builder;
mod position;

pub use adapter::DriverAdapter;
pub use axis::{Axis, AxisDefaults};
pub use builder::AxisBuilder;
pub use position::Position;
