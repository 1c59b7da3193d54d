//! Startup loading: resolve the preset, then build the scene from it.

/// Scene roots, background stars, and the first galaxy build.
pub mod galaxy_creator;

/// Preset asset loading with a fallback to built-in defaults.
pub mod preset_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
