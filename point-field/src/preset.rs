use std::path::Path;

use constants::galaxy::DEFAULT_SEED;
use serde::{Deserialize, Serialize};

use crate::background::BackgroundParameters;
use crate::error::PresetError;
use crate::params::GalaxyParameters;

/// A saved scene: galaxy parameters, background settings, and optionally the
/// seed that reproduces it. Every key may be omitted.
///
/// ```json
/// {
///   "seed": 42,
///   "parameters": { "count": 80000, "branches": 5, "insideColor": "#ff6030" },
///   "background": { "count": 4000 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyPreset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub parameters: GalaxyParameters,
    pub background: BackgroundParameters,
}

impl GalaxyPreset {
    /// Parse a preset and reject parameters the sampler would refuse.
    pub fn from_json_str(json: &str) -> Result<Self, PresetError> {
        let preset: GalaxyPreset = serde_json::from_str(json)?;
        preset.parameters.validate()?;
        Ok(preset)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PresetError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}
