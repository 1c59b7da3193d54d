//! Procedural point fields for the spiral galaxy scene.
//!
//! The sampler turns a [`GalaxyParameters`] set and a [`RandomSource`] into a
//! [`PointField`]: parallel position, color, and scale buffers ready to be
//! handed to a point-list primitive. Everything renderer-specific sits behind
//! the [`PointRenderer`] trait, so the [`GalaxyContext`] swap logic runs the
//! same against Bevy meshes and against the recording renderers in tests.

/// Background star shell sampled uniformly over a spherical shell.
pub mod background;

/// Monotonic frame clock producing per-tick deltas.
pub mod clock;

/// Linear RGB colors parsed from `#rrggbb` hex strings.
pub mod color;

/// Application context owning the live field and the renderer swap protocol.
pub mod context;

/// Declarative settings-panel control descriptors.
pub mod controls;

pub mod error;

/// Output buffers shared by every sampler.
pub mod field;

/// Galaxy parameter model, field addressing, and validation.
pub mod params;

/// JSON presets combining parameters, seed, and background settings.
pub mod preset;

/// Uniform random sources, seeded and scripted.
pub mod random;

/// The spiral galaxy sampler.
pub mod sampler;

/// Commit gate separating intermediate control input from regeneration.
pub mod session;

pub use background::{BackgroundParameters, generate_background};
pub use clock::FrameClock;
pub use color::Rgb;
pub use context::{GalaxyContext, PointRenderer, PointStyle, RegenerationReport};
pub use controls::{CONTROLS, ControlDescriptor, ControlKind};
pub use error::{ParameterError, PresetError};
pub use field::{FieldPoint, PointField, Zone};
pub use params::{GalaxyParameters, ParameterField, ParameterValue, SamplingPlan};
pub use preset::GalaxyPreset;
pub use random::{RandomSource, SeededSource, SequenceSource};
pub use sampler::{generate, generate_with_progress};
pub use session::{SessionOutcome, SettingsSession};
