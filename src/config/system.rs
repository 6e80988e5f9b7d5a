//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::axis::AxisConfig;
use super::oscillation::OscillationConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named axis configurations.
    pub axes: FnvIndexMap<String<32>, AxisConfig, 8>,

    /// Named oscillation presets.
    #[serde(default)]
    pub oscillations: FnvIndexMap<String<32>, OscillationConfig, 32>,
}

impl SystemConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get an oscillation preset by name.
    pub fn oscillation(&self, name: &str) -> Option<&OscillationConfig> {
        self.oscillations
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }

    /// List all oscillation preset names.
    pub fn oscillation_names(&self) -> impl Iterator<Item = &str> {
        self.oscillations.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            axes: FnvIndexMap::new(),
            oscillations: FnvIndexMap::new(),
        }
    }
}
