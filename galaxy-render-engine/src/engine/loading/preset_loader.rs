use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::render_settings::DEFAULT_PRESET_PATH;
use point_field::GalaxyPreset;

use crate::engine::assets::galaxy_preset::GalaxyPresetAsset;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct PresetLoader {
    handle: Option<Handle<GalaxyPresetAsset>>,
}

/// The preset the scene is built from once loading settles.
#[derive(Resource, Debug, Clone)]
pub struct ActivePreset(pub GalaxyPreset);

// Start the loading process
pub fn start_loading(mut preset_loader: ResMut<PresetLoader>, asset_server: Res<AssetServer>) {
    println!("Loading galaxy preset from: {}", DEFAULT_PRESET_PATH);
    preset_loader.handle = Some(asset_server.load(DEFAULT_PRESET_PATH));
}

/// Settle on a preset: the loaded one, or the defaults if the file is
/// missing or malformed.
pub fn resolve_preset_system(
    mut loading_progress: ResMut<LoadingProgress>,
    preset_loader: Res<PresetLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    presets: Res<Assets<GalaxyPresetAsset>>,
) {
    if loading_progress.preset_resolved {
        return;
    }

    let Some(handle) = &preset_loader.handle else {
        return;
    };

    let preset = if let Some(asset) = presets.get(handle) {
        println!("✓ Galaxy preset loaded");
        asset.resolved()
    } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        warn!(
            "Could not load {} ({}), using built-in defaults",
            DEFAULT_PRESET_PATH, err
        );
        GalaxyPreset::default()
    } else {
        return;
    };

    commands.insert_resource(ActivePreset(preset));
    loading_progress.preset_resolved = true;
}
