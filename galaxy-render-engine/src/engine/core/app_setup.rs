use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::galaxy_preset::{GalaxyPresetAsset, PRESET_EXTENSION};
use crate::engine::camera::orbit_camera::camera_controller;
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::galaxy::events::{
    GalaxyRegeneratedEvent, LoadParametersEvent, ParameterInputEvent, RegenerateGalaxyEvent,
};
use crate::engine::galaxy::regeneration::{
    handle_parameter_input, handle_parameter_loads, handle_regenerate_requests,
    release_galaxy_on_exit,
};
use crate::engine::galaxy::rotation::rotate_galaxy;
use crate::engine::loading::galaxy_creator::create_galaxy_when_ready;
use crate::engine::loading::preset_loader::{PresetLoader, resolve_preset_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::setup::{clear_color, spawn_camera};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::settings_panel::{
    SettingsPanel, SettingsPanelText, settings_panel_input, settings_panel_text_update,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers galaxy presets as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<GalaxyPresetAsset>::new(&[PRESET_EXTENSION]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(clear_color());

    app.init_resource::<LoadingProgress>()
        .init_resource::<PresetLoader>()
        .add_event::<ParameterInputEvent>()
        .add_event::<RegenerateGalaxyEvent>()
        .add_event::<LoadParametersEvent>()
        .add_event::<GalaxyRegeneratedEvent>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                resolve_preset_system,
                create_galaxy_when_ready,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Input first, then rebuilds, then the per-frame spin.
    let runtime_systems = (
        handle_parameter_input,
        handle_parameter_loads,
        handle_regenerate_requests,
        rotate_galaxy,
        camera_controller,
        fps_notification_system,
    )
        .chain();

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.init_resource::<SettingsPanel>();
        app.add_systems(Update, fps_text_update_system);
        app.add_systems(
            Update,
            (settings_panel_input, settings_panel_text_update)
                .before(handle_parameter_input)
                .run_if(in_state(AppState::Running)),
        );
    }

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));
    app.add_systems(Last, release_galaxy_on_exit);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    println!("=== GALAXY POINT-FIELD RENDERER ===");
    spawn_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.95)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                SettingsPanelText,
            ));
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}
