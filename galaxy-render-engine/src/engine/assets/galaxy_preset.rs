use bevy::prelude::*;
use point_field::{GalaxyParameters, GalaxyPreset};
use serde::Deserialize;

/// Extension the JSON asset loader claims for presets.
pub const PRESET_EXTENSION: &str = "galaxy.json";

/// A [`GalaxyPreset`] loaded as a Bevy asset from `*.galaxy.json`.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct GalaxyPresetAsset(pub GalaxyPreset);

impl GalaxyPresetAsset {
    /// The preset, with its parameters replaced by the defaults if they
    /// would not sample.
    pub fn resolved(&self) -> GalaxyPreset {
        let mut preset = self.0.clone();
        if let Err(err) = preset.parameters.validate() {
            warn!("Preset parameters rejected ({}), using defaults", err);
            preset.parameters = GalaxyParameters::default();
        }
        preset
    }
}
