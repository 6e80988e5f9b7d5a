//! Oscillation registry for named preset lookup.

use heapless::{FnvIndexMap, String};

use crate::config::OscillationConfig;
use crate::error::{Error, ProgramError, Result};

/// Maximum number of presets in the registry.
pub const MAX_PROGRAMS: usize = 32;

/// Registry for named oscillation presets.
#[derive(Debug)]
pub struct ProgramRegistry {
    programs: FnvIndexMap<String<32>, OscillationConfig, MAX_PROGRAMS>,
}

impl Default for ProgramRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            programs: FnvIndexMap::new(),
        }
    }

    /// Register a preset under `name`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is too long or the registry is full.
    pub fn register(&mut self, name: &str, program: OscillationConfig) -> Result<()> {
        let key = String::try_from(name).map_err(|_| invalid_name("name too long"))?;

        self.programs
            .insert(key, program)
            .map_err(|_| invalid_name("registry full"))?;

        Ok(())
    }

    /// Get a preset by name.
    pub fn get(&self, name: &str) -> Option<&OscillationConfig> {
        let key = String::try_from(name).ok()?;
        self.programs.get(&key)
    }

    /// Check if a preset exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a preset by name.
    pub fn remove(&mut self, name: &str) -> Option<OscillationConfig> {
        let key = String::try_from(name).ok()?;
        self.programs.remove(&key)
    }

    /// Number of registered presets.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Iterate over preset names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(|s| s.as_str())
    }

    /// Iterate over presets targeting `axis`.
    pub fn for_axis<'a>(
        &'a self,
        axis: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a OscillationConfig)> + 'a {
        self.programs
            .iter()
            .filter(move |(_, p)| p.axis.as_str() == axis)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Load every preset from a SystemConfig.
    pub fn from_config(config: &crate::config::SystemConfig) -> Self {
        let mut registry = Self::new();
        for (name, program) in config.oscillations.iter() {
            // Both maps share the same capacity, so this cannot fail.
            let _ = registry.register(name.as_str(), program.clone());
        }
        registry
    }
}

fn invalid_name(reason: &str) -> Error {
    Error::Program(ProgramError::InvalidName(
        String::try_from(reason).unwrap_or_default(),
    ))
}
