//! Camera, clear color, and overlay setup for the galaxy scene.

/// Startup spawns: camera, clear color, and native overlays.
pub mod setup;
