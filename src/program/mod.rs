//! Program module for stepper-oscillate.
//!
//! Provides named oscillation preset storage, lookup, and building.

mod builder;
mod registry;

pub use builder::OscillationBuilder;
pub use registry::{ProgramRegistry, MAX_PROGRAMS};
