use constants::controls::{self as ranges, ControlRange};

use crate::error::ParameterError;
use crate::params::{ParameterField, ParameterValue};

/// How a control edits its field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    Slider(ControlRange),
    Color,
}

/// One settings-panel entry: which field it edits, its label, and its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlDescriptor {
    pub field: ParameterField,
    pub label: &'static str,
    pub kind: ControlKind,
}

impl ControlDescriptor {
    const fn slider(field: ParameterField, label: &'static str, range: ControlRange) -> Self {
        Self {
            field,
            label,
            kind: ControlKind::Slider(range),
        }
    }

    const fn color(field: ParameterField, label: &'static str) -> Self {
        Self {
            field,
            label,
            kind: ControlKind::Color,
        }
    }

    /// Whether committing this control rebuilds the galaxy.
    pub fn regenerates(&self) -> bool {
        self.field.regenerates()
    }

    /// Clamp a slider value into range and snap it to the step grid.
    pub fn normalize(&self, value: ParameterValue) -> Result<ParameterValue, ParameterError> {
        match (self.kind, value) {
            (ControlKind::Slider(range), ParameterValue::Number(number)) => {
                if !number.is_finite() {
                    return Err(ParameterError::NonFinite {
                        field: self.field.key(),
                        value: number as f32,
                    });
                }
                Ok(ParameterValue::Number(snap(range, number)))
            }
            (ControlKind::Color, ParameterValue::Color(_)) => Ok(value),
            (ControlKind::Slider(_), _) => Err(ParameterError::WrongValueType {
                field: self.field,
                expected: "numeric",
            }),
            (ControlKind::Color, _) => Err(ParameterError::WrongValueType {
                field: self.field,
                expected: "color",
            }),
        }
    }

    /// Move a slider value by `steps` increments. Color controls return the
    /// value unchanged.
    pub fn nudge(&self, value: ParameterValue, steps: f64) -> ParameterValue {
        match (self.kind, value) {
            (ControlKind::Slider(range), ParameterValue::Number(number)) => {
                ParameterValue::Number(snap(range, number + steps * range.step))
            }
            _ => value,
        }
    }
}

fn snap(range: ControlRange, value: f64) -> f64 {
    let clamped = value.clamp(range.min, range.max);
    if range.step <= 0.0 {
        return clamped;
    }
    let steps = ((clamped - range.min) / range.step).round();
    // Trim float noise such as 0.30000000000000004 from the step arithmetic.
    let decimals = (-range.step.log10()).ceil().max(0.0) as i32;
    let factor = 10f64.powi(decimals);
    let snapped = ((range.min + steps * range.step) * factor).round() / factor;
    snapped.clamp(range.min, range.max)
}

/// Every control the settings panel shows, in display order.
pub const CONTROLS: &[ControlDescriptor] = &[
    ControlDescriptor::slider(ParameterField::Count, "count", ranges::COUNT),
    ControlDescriptor::slider(ParameterField::Size, "size", ranges::SIZE),
    ControlDescriptor::slider(ParameterField::Radius, "radius", ranges::RADIUS),
    ControlDescriptor::slider(ParameterField::Branches, "branches", ranges::BRANCHES),
    ControlDescriptor::slider(ParameterField::Spin, "spin", ranges::SPIN),
    ControlDescriptor::slider(ParameterField::Randomness, "randomness", ranges::RANDOMNESS),
    ControlDescriptor::slider(
        ParameterField::RandomnessPower,
        "randomnessPower",
        ranges::RANDOMNESS_POWER,
    ),
    ControlDescriptor::color(ParameterField::InsideColor, "insideColor"),
    ControlDescriptor::color(ParameterField::OutsideColor, "outsideColor"),
    ControlDescriptor::slider(ParameterField::CoreSize, "Core Size", ranges::CORE_SIZE),
    ControlDescriptor::slider(
        ParameterField::CoreConcentration,
        "Core Density",
        ranges::CORE_CONCENTRATION,
    ),
    ControlDescriptor::slider(
        ParameterField::RotationSpeed,
        "Rotation Speed",
        ranges::ROTATION_SPEED,
    ),
];

/// Descriptor for `field`. Every field has exactly one control.
pub fn descriptor(field: ParameterField) -> &'static ControlDescriptor {
    CONTROLS
        .iter()
        .find(|control| control.field == field)
        .unwrap_or(&CONTROLS[0])
}
