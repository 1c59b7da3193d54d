//! Orbit camera with damped mouse rotation and zoom.

/// Orbit camera resource and controller system.
pub mod orbit_camera;
