use bevy::prelude::*;

use crate::engine::galaxy::state::{GalaxyRoot, GalaxyState};

/// Spin the galaxy by `rotationSpeed` radians per second of wall time.
pub fn rotate_galaxy(
    time: Res<Time>,
    mut galaxy: ResMut<GalaxyState>,
    mut roots: Query<&mut Transform, With<GalaxyRoot>>,
) {
    let galaxy = &mut *galaxy;
    let delta = galaxy.clock.tick(time.elapsed_secs_f64());
    let angle = galaxy.context.advance(delta);

    for mut transform in &mut roots {
        transform.rotation = Quat::from_rotation_y(angle);
    }
}
