//! Runtime systems for diagnostics and the native settings panel.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the embedding page via RPC and updates the
/// native overlay.
pub mod fps_tracking;

/// Keyboard-driven settings panel for native builds.
pub mod settings_panel;
