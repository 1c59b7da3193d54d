use constants::controls::COUNT;
use constants::galaxy as defaults;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Rgb;
use crate::error::ParameterError;

/// User-editable description of a galaxy.
///
/// Serialises with the camelCase keys and `#rrggbb` colors the settings panel
/// and presets use. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalaxyParameters {
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
    pub core_size: f32,
    pub core_concentration: f32,
    pub rotation_speed: f32,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: defaults::DEFAULT_COUNT,
            size: defaults::DEFAULT_SIZE,
            radius: defaults::DEFAULT_RADIUS,
            branches: defaults::DEFAULT_BRANCHES,
            spin: defaults::DEFAULT_SPIN,
            randomness: defaults::DEFAULT_RANDOMNESS,
            randomness_power: defaults::DEFAULT_RANDOMNESS_POWER,
            inside_color: Rgb::from_hex(defaults::DEFAULT_INSIDE_COLOR).unwrap_or(Rgb::WHITE),
            outside_color: Rgb::from_hex(defaults::DEFAULT_OUTSIDE_COLOR).unwrap_or(Rgb::WHITE),
            core_size: defaults::DEFAULT_CORE_SIZE,
            core_concentration: defaults::DEFAULT_CORE_CONCENTRATION,
            rotation_speed: defaults::DEFAULT_ROTATION_SPEED,
        }
    }
}

/// Addresses one field of [`GalaxyParameters`] without string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterField {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    InsideColor,
    OutsideColor,
    CoreSize,
    CoreConcentration,
    RotationSpeed,
}

impl ParameterField {
    pub const ALL: [ParameterField; 12] = [
        ParameterField::Count,
        ParameterField::Size,
        ParameterField::Radius,
        ParameterField::Branches,
        ParameterField::Spin,
        ParameterField::Randomness,
        ParameterField::RandomnessPower,
        ParameterField::InsideColor,
        ParameterField::OutsideColor,
        ParameterField::CoreSize,
        ParameterField::CoreConcentration,
        ParameterField::RotationSpeed,
    ];

    /// Key used in presets and RPC payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Size => "size",
            Self::Radius => "radius",
            Self::Branches => "branches",
            Self::Spin => "spin",
            Self::Randomness => "randomness",
            Self::RandomnessPower => "randomnessPower",
            Self::InsideColor => "insideColor",
            Self::OutsideColor => "outsideColor",
            Self::CoreSize => "coreSize",
            Self::CoreConcentration => "coreConcentration",
            Self::RotationSpeed => "rotationSpeed",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, ParameterError> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key() == key)
            .ok_or_else(|| ParameterError::UnknownField(key.to_string()))
    }

    /// Whether a committed change discards and rebuilds the point field.
    /// Rotation speed is read every frame instead.
    pub fn regenerates(&self) -> bool {
        !matches!(self, Self::RotationSpeed)
    }

}

/// A single control value: a number for sliders, a color for pickers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    Color(Rgb),
}

impl ParameterValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match self {
            Self::Color(color) => Some(*color),
            Self::Number(_) => None,
        }
    }
}

impl GalaxyParameters {
    pub fn get(&self, field: ParameterField) -> ParameterValue {
        use ParameterValue::{Color, Number};
        match field {
            ParameterField::Count => Number(self.count as f64),
            ParameterField::Size => Number(self.size as f64),
            ParameterField::Radius => Number(self.radius as f64),
            ParameterField::Branches => Number(self.branches as f64),
            ParameterField::Spin => Number(self.spin as f64),
            ParameterField::Randomness => Number(self.randomness as f64),
            ParameterField::RandomnessPower => Number(self.randomness_power as f64),
            ParameterField::InsideColor => Color(self.inside_color),
            ParameterField::OutsideColor => Color(self.outside_color),
            ParameterField::CoreSize => Number(self.core_size as f64),
            ParameterField::CoreConcentration => Number(self.core_concentration as f64),
            ParameterField::RotationSpeed => Number(self.rotation_speed as f64),
        }
    }

    /// Store `value` into `field`. Integer fields round to the nearest whole
    /// number and saturate at zero; range checks are left to [`validate`].
    ///
    /// [`validate`]: GalaxyParameters::validate
    pub fn set(
        &mut self,
        field: ParameterField,
        value: ParameterValue,
    ) -> Result<(), ParameterError> {
        match field {
            ParameterField::InsideColor => self.inside_color = color_value(field, value)?,
            ParameterField::OutsideColor => self.outside_color = color_value(field, value)?,
            ParameterField::Count => self.count = whole_value(field, value)?,
            ParameterField::Branches => self.branches = whole_value(field, value)?,
            ParameterField::Size => self.size = float_value(field, value)?,
            ParameterField::Radius => self.radius = float_value(field, value)?,
            ParameterField::Spin => self.spin = float_value(field, value)?,
            ParameterField::Randomness => self.randomness = float_value(field, value)?,
            ParameterField::RandomnessPower => {
                self.randomness_power = float_value(field, value)?
            }
            ParameterField::CoreSize => self.core_size = float_value(field, value)?,
            ParameterField::CoreConcentration => {
                self.core_concentration = float_value(field, value)?
            }
            ParameterField::RotationSpeed => self.rotation_speed = float_value(field, value)?,
        }
        Ok(())
    }

    /// Check every field and produce the clamped values the sampler runs on.
    ///
    /// Zero branches clamp to one, counts above the control maximum clamp to
    /// it, and a core larger than the disk clamps to the disk radius; anything that would put NaN or infinity into the buffers is
    /// rejected.
    pub fn validate(&self) -> Result<SamplingPlan, ParameterError> {
        let size = positive("size", self.size)?;
        let radius = positive("radius", self.radius)?;
        let spin = finite("spin", self.spin)?;
        let randomness = non_negative("randomness", self.randomness)?;
        let randomness_power = positive("randomnessPower", self.randomness_power)?;
        let mut core_size = non_negative("coreSize", self.core_size)?;
        let core_concentration = positive("coreConcentration", self.core_concentration)?;
        finite("rotationSpeed", self.rotation_speed)?;

        let branches = if self.branches == 0 {
            warn!("branches must be at least 1, clamping 0 to 1");
            1
        } else {
            self.branches
        };

        let max_count = COUNT.max as u32;
        let count = if self.count > max_count {
            warn!(
                "count {} exceeds the maximum of {}, clamping",
                self.count, max_count
            );
            max_count
        } else {
            self.count
        };

        if core_size > radius {
            warn!(
                "coreSize {} exceeds radius {}, clamping to the radius",
                core_size, radius
            );
            core_size = radius;
        }

        Ok(SamplingPlan {
            count: count as usize,
            size,
            radius,
            branches,
            spin,
            randomness,
            randomness_power,
            inside_color: self.inside_color,
            outside_color: self.outside_color,
            core_size,
            core_concentration,
        })
    }
}

/// Validated, clamped parameters consumed by the sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingPlan {
    pub count: usize,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
    pub core_size: f32,
    pub core_concentration: f32,
}

fn color_value(field: ParameterField, value: ParameterValue) -> Result<Rgb, ParameterError> {
    value.as_color().ok_or(ParameterError::WrongValueType {
        field,
        expected: "color",
    })
}

fn float_value(field: ParameterField, value: ParameterValue) -> Result<f32, ParameterError> {
    let number = value.as_number().ok_or(ParameterError::WrongValueType {
        field,
        expected: "numeric",
    })?;
    if number.is_finite() {
        Ok(number as f32)
    } else {
        Err(ParameterError::NonFinite {
            field: field.key(),
            value: number as f32,
        })
    }
}

fn whole_value(field: ParameterField, value: ParameterValue) -> Result<u32, ParameterError> {
    float_value(field, value)?;
    let number = value.as_number().unwrap_or_default();
    Ok(number.round().clamp(0.0, u32::MAX as f64) as u32)
}

fn finite(field: &'static str, value: f32) -> Result<f32, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<f32, ParameterError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<f32, ParameterError> {
    let value = finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::Negative { field, value })
    }
}
