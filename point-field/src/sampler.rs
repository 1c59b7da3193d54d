use std::f32::consts::TAU;

use constants::galaxy::{
    BLUE_STAR_BLEND, BLUE_STAR_THRESHOLD, CORE_PROBABILITY, CORE_SCALE_MULTIPLIER, CORE_TINT_MAX,
    DISK_RADIUS_EXPONENT, THICKNESS_FALLOFF, VERTICAL_FLATTENING, YELLOW_STAR_BLEND,
    YELLOW_STAR_THRESHOLD,
};
use constants::palette::{BLUE_STAR_COLOR, CORE_COLOR, YELLOW_STAR_COLOR};
use tracing::debug;

use crate::color::Rgb;
use crate::error::ParameterError;
use crate::field::{PointField, Zone};
use crate::params::{GalaxyParameters, SamplingPlan};
use crate::random::RandomSource;

/// Points sampled between progress callbacks.
const PROGRESS_INTERVAL: usize = 10_000;

/// Sample a complete galaxy.
///
/// Parameters are validated first; an invalid set returns an error before any
/// buffer is allocated.
pub fn generate<S: RandomSource + ?Sized>(
    params: &GalaxyParameters,
    rng: &mut S,
) -> Result<PointField, ParameterError> {
    generate_with_progress(params, rng, |_| {})
}

/// Like [`generate`], calling `on_progress` with the number of points sampled
/// so far every few thousand points and once at the end.
pub fn generate_with_progress<S, F>(
    params: &GalaxyParameters,
    rng: &mut S,
    on_progress: F,
) -> Result<PointField, ParameterError>
where
    S: RandomSource + ?Sized,
    F: FnMut(usize),
{
    let plan = params.validate()?;
    Ok(sample_galaxy(&plan, rng, on_progress))
}

/// Sample from an already validated plan.
pub(crate) fn sample_galaxy<S, F>(plan: &SamplingPlan, rng: &mut S, mut on_progress: F) -> PointField
where
    S: RandomSource + ?Sized,
    F: FnMut(usize),
{
    let palette = Palette::new(plan);
    let mut field = PointField::with_capacity(plan.count);

    for index in 0..plan.count {
        let star = sample_star(plan, &palette, index, rng);
        field.push(star.position, star.color, star.scale, star.zone);

        if (index + 1) % PROGRESS_INTERVAL == 0 {
            on_progress(index + 1);
        }
    }
    on_progress(plan.count);

    debug!(
        "Sampled galaxy: {} points, {} core, {} arms",
        field.len(),
        field.count_zone(Zone::Core),
        plan.branches
    );
    field
}

/// Fixed colors resolved once per generation.
struct Palette {
    inside: Rgb,
    outside: Rgb,
    core: Rgb,
    blue: Rgb,
    yellow: Rgb,
}

impl Palette {
    fn new(plan: &SamplingPlan) -> Self {
        Self {
            inside: plan.inside_color,
            outside: plan.outside_color,
            core: Rgb::from_hex(CORE_COLOR).unwrap_or(Rgb::WHITE),
            blue: Rgb::from_hex(BLUE_STAR_COLOR).unwrap_or(Rgb::WHITE),
            yellow: Rgb::from_hex(YELLOW_STAR_COLOR).unwrap_or(Rgb::WHITE),
        }
    }
}

struct Star {
    position: [f32; 3],
    color: [f32; 3],
    scale: f32,
    zone: Zone,
}

fn sample_star<S: RandomSource + ?Sized>(
    plan: &SamplingPlan,
    palette: &Palette,
    index: usize,
    rng: &mut S,
) -> Star {
    let in_core = rng.next_unit() < CORE_PROBABILITY;

    let radius = if in_core {
        plan.core_size * rng.next_unit().powf(plan.core_concentration)
    } else {
        plan.core_size + (plan.radius - plan.core_size) * rng.next_unit().powf(DISK_RADIUS_EXPONENT)
    };

    let angle = branch_angle(index, plan.branches) + radius * plan.spin;

    let thickness = (-radius / plan.radius * THICKNESS_FALLOFF).exp() * VERTICAL_FLATTENING;
    let jitter_x = jitter(plan, radius, rng);
    let jitter_y = jitter(plan, radius, rng) * thickness;
    let jitter_z = jitter(plan, radius, rng);

    let position = [
        angle.cos() * radius + jitter_x,
        jitter_y,
        angle.sin() * radius + jitter_z,
    ];

    let color = if in_core {
        palette
            .core
            .lerp(palette.inside, rng.next_unit() * CORE_TINT_MAX)
    } else {
        let distance = (radius / plan.radius).clamp(0.0, 1.0);
        let mixed = palette.inside.lerp(palette.outside, distance);
        let variation = rng.next_unit();
        if variation < BLUE_STAR_THRESHOLD {
            palette.blue.lerp(mixed, BLUE_STAR_BLEND)
        } else if variation < YELLOW_STAR_THRESHOLD {
            palette.yellow.lerp(mixed, YELLOW_STAR_BLEND)
        } else {
            mixed
        }
    };

    let scale = if in_core {
        rng.next_unit() * CORE_SCALE_MULTIPLIER
    } else {
        rng.next_unit()
    };

    Star {
        position,
        color: color.to_array(),
        scale,
        zone: if in_core { Zone::Core } else { Zone::Disk },
    }
}

/// Arms are assigned round-robin by index, evenly spaced around the circle.
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches.max(1) as usize;
    (index % branches) as f32 / branches as f32 * TAU
}

/// Signed offset whose magnitude is biased toward zero by `randomness_power`.
/// Consumes exactly two draws: magnitude, then sign.
fn jitter<S: RandomSource + ?Sized>(plan: &SamplingPlan, radius: f32, rng: &mut S) -> f32 {
    let magnitude = rng.next_unit().powf(plan.randomness_power);
    let sign = if rng.next_unit() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign * plan.randomness * radius
}
