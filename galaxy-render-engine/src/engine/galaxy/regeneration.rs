use bevy::platform::time::Instant;
use bevy::prelude::*;
use point_field::{ParameterError, RegenerationReport};

use crate::engine::galaxy::events::{
    GalaxyRegeneratedEvent, InputPhase, LoadParametersEvent, ParameterInputEvent,
    RegenerateGalaxyEvent,
};
use crate::engine::galaxy::renderer::BevyPointRenderer;
use crate::engine::galaxy::state::GalaxyState;

/// Apply control input to the session. Drag values are staged; commits
/// rebuild the galaxy when the field asks for it.
pub fn handle_parameter_input(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut galaxy: ResMut<GalaxyState>,
    mut input_events: EventReader<ParameterInputEvent>,
    mut regenerated: EventWriter<GalaxyRegeneratedEvent>,
) {
    let galaxy = &mut *galaxy;
    let mut renderer = BevyPointRenderer {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        parent: galaxy.root,
    };

    for event in input_events.read() {
        match event.phase {
            InputPhase::Drag => {
                if let Err(err) = galaxy.context.stage(event.field, event.value) {
                    warn!("Ignoring {} input: {}", event.field.key(), err);
                }
            }
            InputPhase::Commit => {
                let started = Instant::now();
                let result = galaxy
                    .context
                    .commit(&mut renderer, event.field, event.value);
                report_rebuild(result, started, &mut regenerated);
            }
            InputPhase::Cancel => {
                galaxy.context.cancel(event.field);
                debug!("Dropped staged {} value", event.field.key());
            }
        }
    }
}

/// Rebuild on request, optionally from a freshly drawn seed.
pub fn handle_regenerate_requests(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut galaxy: ResMut<GalaxyState>,
    mut requests: EventReader<RegenerateGalaxyEvent>,
    mut regenerated: EventWriter<GalaxyRegeneratedEvent>,
) {
    if requests.is_empty() {
        return;
    }
    // Several requests in one frame collapse into a single rebuild.
    let reroll = requests
        .read()
        .fold(false, |reroll, request| reroll || request.reroll_seed);

    let galaxy = &mut *galaxy;
    if reroll {
        let seed = galaxy.reroll();
        info!("Rerolled galaxy seed: {seed}");
    }

    let mut renderer = BevyPointRenderer {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        parent: galaxy.root,
    };
    let started = Instant::now();
    let result = galaxy.context.regenerate(&mut renderer).map(Some);
    report_rebuild(result, started, &mut regenerated);
}

/// Swap in whole parameter sets. A given seed restarts the stream and always
/// rebuilds, even when the parameters match the committed ones.
pub fn handle_parameter_loads(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut galaxy: ResMut<GalaxyState>,
    mut loads: EventReader<LoadParametersEvent>,
    mut regenerated: EventWriter<GalaxyRegeneratedEvent>,
) {
    let galaxy = &mut *galaxy;

    for load in loads.read() {
        if let Some(seed) = load.seed {
            galaxy.reseed(seed);
            info!("Reseeded galaxy stream: {seed}");
        }

        let mut renderer = BevyPointRenderer {
            commands: &mut commands,
            meshes: &mut meshes,
            materials: &mut materials,
            parent: galaxy.root,
        };
        let started = Instant::now();
        let mut result = galaxy
            .context
            .load_parameters(&mut renderer, load.parameters.clone());
        if load.seed.is_some() && matches!(result, Ok(None)) {
            result = galaxy.context.regenerate(&mut renderer).map(Some);
        }
        report_rebuild(result, started, &mut regenerated);
    }
}

/// Release the live field's entity and GPU assets when the app exits.
pub fn release_galaxy_on_exit(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    galaxy: Option<ResMut<GalaxyState>>,
    mut exits: EventReader<AppExit>,
) {
    if exits.read().last().is_none() {
        return;
    }
    let Some(mut galaxy) = galaxy else {
        return;
    };

    let galaxy = &mut *galaxy;
    let mut renderer = BevyPointRenderer {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        parent: galaxy.root,
    };
    galaxy.context.teardown(&mut renderer);
    info!("Released galaxy field on exit");
}

fn report_rebuild(
    result: Result<Option<RegenerationReport>, ParameterError>,
    started: Instant,
    regenerated: &mut EventWriter<GalaxyRegeneratedEvent>,
) {
    match result {
        Ok(Some(report)) => {
            let seconds = started.elapsed().as_secs_f32();
            println!(
                "✓ Galaxy rebuilt: {} points in {:.3}s",
                report.point_count, seconds
            );
            regenerated.write(GalaxyRegeneratedEvent { report, seconds });
        }
        Ok(None) => {}
        Err(err) => error!("Galaxy regeneration failed, keeping previous field: {}", err),
    }
}
