use bevy::prelude::*;
use point_field::{GalaxyParameters, ParameterField, ParameterValue, RegenerationReport};

/// Whether a control value is still moving or final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    /// Intermediate value while a slider is held; never rebuilds.
    Drag,
    /// Final value; rebuilds if the field regenerates.
    Commit,
    /// Drop the staged value and keep the committed one. The value is ignored.
    Cancel,
}

/// A settings control changed.
#[derive(Event, Debug, Clone, Copy)]
pub struct ParameterInputEvent {
    pub field: ParameterField,
    pub value: ParameterValue,
    pub phase: InputPhase,
}

/// Rebuild the galaxy from the committed parameters.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RegenerateGalaxyEvent {
    /// Draw a fresh seed before rebuilding instead of continuing the stream.
    pub reroll_seed: bool,
}

/// Replace every parameter at once, optionally restarting the random stream.
#[derive(Event, Debug, Clone)]
pub struct LoadParametersEvent {
    pub parameters: GalaxyParameters,
    pub seed: Option<u64>,
}

/// A rebuild finished and the new field is attached.
#[derive(Event, Debug, Clone, Copy)]
pub struct GalaxyRegeneratedEvent {
    pub report: RegenerationReport,
    pub seconds: f32,
}
