/// Number of stars in the static background shell.
pub const STAR_COUNT: u32 = 10_000;

/// Distance from the origin to the inside of the shell.
pub const INNER_RADIUS: f32 = 20.0;

/// Shell thickness; stars land in `[INNER_RADIUS, INNER_RADIUS + RADIUS_SPREAD)`.
pub const RADIUS_SPREAD: f32 = 30.0;

pub const POINT_SIZE: f32 = 0.015;
pub const OPACITY: f32 = 0.8;
