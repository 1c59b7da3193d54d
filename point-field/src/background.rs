use std::f32::consts::TAU;

use constants::background as defaults;
use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::field::{PointField, Zone};
use crate::random::RandomSource;

/// Settings for the static star shell drawn behind the galaxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundParameters {
    pub count: u32,
    pub inner_radius: f32,
    pub radius_spread: f32,
    pub size: f32,
    pub opacity: f32,
}

impl Default for BackgroundParameters {
    fn default() -> Self {
        Self {
            count: defaults::STAR_COUNT,
            inner_radius: defaults::INNER_RADIUS,
            radius_spread: defaults::RADIUS_SPREAD,
            size: defaults::POINT_SIZE,
            opacity: defaults::OPACITY,
        }
    }
}

impl BackgroundParameters {
    pub fn generate<S: RandomSource + ?Sized>(
        &self,
        rng: &mut S,
    ) -> Result<PointField, ParameterError> {
        generate_background(self.count, self.inner_radius, self.radius_spread, rng)
    }
}

/// Sample `count` white stars uniformly over the shell between `inner_radius`
/// and `inner_radius + radius_spread`.
///
/// The polar angle comes from `acos(2u - 1)` so density is uniform over the
/// sphere surface instead of bunching at the poles.
pub fn generate_background<S: RandomSource + ?Sized>(
    count: u32,
    inner_radius: f32,
    radius_spread: f32,
    rng: &mut S,
) -> Result<PointField, ParameterError> {
    if !inner_radius.is_finite() {
        return Err(ParameterError::NonFinite {
            field: "innerRadius",
            value: inner_radius,
        });
    }
    if inner_radius < 0.0 {
        return Err(ParameterError::Negative {
            field: "innerRadius",
            value: inner_radius,
        });
    }
    if !radius_spread.is_finite() {
        return Err(ParameterError::NonFinite {
            field: "radiusSpread",
            value: radius_spread,
        });
    }
    if radius_spread < 0.0 {
        return Err(ParameterError::Negative {
            field: "radiusSpread",
            value: radius_spread,
        });
    }

    let mut field = PointField::with_capacity(count as usize);
    for _ in 0..count {
        let radius = inner_radius + rng.next_unit() * radius_spread;
        let theta = rng.next_unit() * TAU;
        let phi = (2.0 * rng.next_unit() - 1.0).clamp(-1.0, 1.0).acos();

        field.push(
            [
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ],
            [1.0, 1.0, 1.0],
            1.0,
            Zone::Background,
        );
    }
    Ok(field)
}
