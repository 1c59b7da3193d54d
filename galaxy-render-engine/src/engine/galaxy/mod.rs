//! Live galaxy state and the systems that rebuild and spin it.
//!
//! The [`GalaxyContext`](point_field::GalaxyContext) lives inside a Bevy
//! resource; every rebuild goes through [`renderer::BevyPointRenderer`] so the
//! old mesh is released before the new one is attached.

/// Input events from the settings panel and the RPC bridge.
pub mod events;

/// Staging, commit, and regeneration systems.
pub mod regeneration;

/// Bevy implementation of the point renderer protocol.
pub mod renderer;

/// Per-frame rotation about the vertical axis.
pub mod rotation;

/// Galaxy resource and scene root markers.
pub mod state;
