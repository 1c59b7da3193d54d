use bevy::platform::time::Instant;
use bevy::prelude::*;
use point_field::{PointRenderer, PointStyle, SeededSource};

use crate::engine::galaxy::events::GalaxyRegeneratedEvent;
use crate::engine::galaxy::renderer::BevyPointRenderer;
use crate::engine::galaxy::state::{BackgroundRoot, GalaxyRoot, GalaxyState};
use crate::engine::loading::preset_loader::ActivePreset;
use crate::engine::loading::progress::LoadingProgress;

/// Spawn the scene roots, the background shell, and the first galaxy once a
/// preset has been settled on.
pub fn create_galaxy_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    preset: Option<Res<ActivePreset>>,
    mut regenerated: EventWriter<GalaxyRegeneratedEvent>,
) {
    if loading_progress.galaxy_created {
        return;
    }
    let Some(preset) = preset else {
        return;
    };
    let preset = &preset.0;
    let seed = preset.seed_or_default();

    let galaxy_root = commands
        .spawn((GalaxyRoot, Transform::default(), Visibility::default()))
        .id();
    let background_root = commands
        .spawn((BackgroundRoot, Transform::default(), Visibility::default()))
        .id();

    spawn_background_stars(
        &mut commands,
        &mut meshes,
        &mut materials,
        background_root,
        preset,
        seed,
    );

    let mut galaxy = GalaxyState::new(preset.parameters.clone(), seed, galaxy_root);
    let mut renderer = BevyPointRenderer {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        parent: galaxy_root,
    };
    let started = Instant::now();
    match galaxy.context.regenerate(&mut renderer) {
        Ok(report) => {
            let seconds = started.elapsed().as_secs_f32();
            println!(
                "✓ Galaxy created: {} points in {:.3}s (seed {})",
                report.point_count, seconds, seed
            );
            regenerated.write(GalaxyRegeneratedEvent { report, seconds });
        }
        Err(err) => error!("Initial galaxy generation failed: {}", err),
    }

    commands.insert_resource(galaxy);
    loading_progress.galaxy_created = true;
}

fn spawn_background_stars(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    parent: Entity,
    preset: &point_field::GalaxyPreset,
    seed: u64,
) {
    let background = &preset.background;
    let mut rng = SeededSource::new(seed);
    let field = match background.generate(&mut rng) {
        Ok(field) => field,
        Err(err) => {
            error!("Background stars skipped: {}", err);
            return;
        }
    };

    let mut renderer = BevyPointRenderer {
        commands,
        meshes,
        materials,
        parent,
    };
    let style = PointStyle {
        size: background.size,
        opacity: background.opacity,
    };
    let handle = renderer.create_point_primitive(&field, &style);
    renderer.attach(&handle);

    println!("✓ Background shell spawned with {} stars", field.len());
}
