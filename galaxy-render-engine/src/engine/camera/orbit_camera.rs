use bevy::input::mouse::MouseScrollUnit;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};
use constants::render_settings::{
    ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

/// Pitch stops just short of the poles so `looking_at` keeps a stable up axis.
const MAX_PITCH: f32 = 1.55;

/// Orbit around a focus point. Input adds velocity; velocity decays every
/// frame by the damping factor so motion eases out after release.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
    pub zoom_velocity: f32,
}

impl OrbitCamera {
    /// Orbit that places the camera at `position` looking at `focus_point`.
    pub fn from_position(position: Vec3, focus_point: Vec3) -> Self {
        let offset = position - focus_point;
        let distance = offset.length().clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let pitch = if offset.length() > f32::EPSILON {
            (offset.y / offset.length()).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };

        Self {
            focus_point,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let horizontal = self.pitch.cos() * self.distance;
        self.focus_point
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.pitch.sin() * self.distance,
                horizontal * self.yaw.cos(),
            )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.focus_point, Vec3::Y)
    }

    /// Mouse drag in pixels.
    pub fn push_rotation(&mut self, delta: Vec2) {
        self.yaw_velocity -= delta.x * ORBIT_ROTATE_SPEED;
        self.pitch_velocity += delta.y * ORBIT_ROTATE_SPEED;
    }

    /// Scroll in lines; positive zooms in.
    pub fn push_zoom(&mut self, lines: f32) {
        self.zoom_velocity -= lines * ORBIT_ZOOM_SPEED;
    }

    /// Apply the current velocity, then damp it for `delta_seconds`.
    pub fn step(&mut self, delta_seconds: f32) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-MAX_PITCH, MAX_PITCH);
        self.distance = (self.distance * (1.0 + self.zoom_velocity))
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);

        // Damping is tuned per 60 Hz frame.
        let decay = ORBIT_DAMPING.powf(delta_seconds * 60.0);
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
        self.zoom_velocity *= decay;
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.push_rotation(mouse_delta);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.push_zoom(scroll_accum);
    }

    orbit.step(time.delta_secs());

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        *camera_transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_round_trips() {
        let start = Vec3::new(3.0, 3.0, 3.0);
        let orbit = OrbitCamera::from_position(start, Vec3::ZERO);
        assert!((orbit.distance - 27f32.sqrt()).abs() < 1e-5);
        assert!(orbit.position().distance(start) < 1e-4);
    }

    #[test]
    fn velocity_decays_after_release() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        orbit.push_rotation(Vec2::new(100.0, 0.0));
        let first = orbit.yaw_velocity;

        for _ in 0..120 {
            orbit.step(1.0 / 60.0);
        }

        assert!(first < 0.0);
        assert!(orbit.yaw_velocity.abs() < first.abs() * 0.01);
        assert!(orbit.yaw < 0.0);
    }

    #[test]
    fn zoom_and_pitch_stay_in_bounds() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        orbit.push_zoom(-500.0);
        orbit.push_rotation(Vec2::new(0.0, 10_000.0));
        orbit.step(1.0 / 60.0);

        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
        assert_eq!(orbit.pitch, MAX_PITCH);
    }
}
