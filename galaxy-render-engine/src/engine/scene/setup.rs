use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START, CLEAR_COLOR,
};

use crate::engine::camera::orbit_camera::OrbitCamera;

pub fn clear_color() -> ClearColor {
    let [r, g, b] = CLEAR_COLOR;
    ClearColor(Color::srgb_u8(r, g, b))
}

/// Camera at the start position, looking at the origin.
pub fn spawn_camera(commands: &mut Commands) {
    let orbit = OrbitCamera::from_position(Vec3::from_array(CAMERA_START), Vec3::ZERO);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.transform(),
    ));
    commands.insert_resource(orbit);
}
