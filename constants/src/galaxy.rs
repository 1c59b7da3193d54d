/// Default particle total for a freshly opened scene.
pub const DEFAULT_COUNT: u32 = 150_000;

/// Default rendered point size in world units.
pub const DEFAULT_SIZE: f32 = 0.01;

/// Default outer radius of the disk.
pub const DEFAULT_RADIUS: f32 = 5.0;

pub const DEFAULT_BRANCHES: u32 = 4;
pub const DEFAULT_SPIN: f32 = 1.0;
pub const DEFAULT_RANDOMNESS: f32 = 0.2;
pub const DEFAULT_RANDOMNESS_POWER: f32 = 3.0;
pub const DEFAULT_INSIDE_COLOR: &str = "#ff6030";
pub const DEFAULT_OUTSIDE_COLOR: &str = "#1b3984";
pub const DEFAULT_CORE_SIZE: f32 = 0.5;
pub const DEFAULT_CORE_CONCENTRATION: f32 = 2.0;

/// Radians per second applied about the vertical axis.
pub const DEFAULT_ROTATION_SPEED: f32 = 0.05;

/// Seed used when a preset does not pin one.
pub const DEFAULT_SEED: u64 = 0x5eed_ca1a_c71c_0001;

/// Probability that a sampled point belongs to the nucleus rather than the disk.
pub const CORE_PROBABILITY: f32 = 0.3;

/// Fixed exponent biasing disk radii toward the inner edge.
pub const DISK_RADIUS_EXPONENT: f32 = 0.7;

/// Vertical jitter is squeezed by this factor before the thickness falloff.
pub const VERTICAL_FLATTENING: f32 = 0.3;

/// Rate of the `exp(-k * r / R)` thickness falloff.
pub const THICKNESS_FALLOFF: f32 = 2.0;

/// Core colors drift at most this far from white toward the inside color.
pub const CORE_TINT_MAX: f32 = 0.3;

/// Scale multiplier for nucleus points relative to disk points.
pub const CORE_SCALE_MULTIPLIER: f32 = 2.0;

/// Cumulative probability of a blue-shifted disk star.
pub const BLUE_STAR_THRESHOLD: f32 = 0.15;

/// Cumulative probability of a blue or yellow disk star.
pub const YELLOW_STAR_THRESHOLD: f32 = 0.3;

/// Blend factor from blue toward the radius-blended disk color.
pub const BLUE_STAR_BLEND: f32 = 0.5;

/// Blend factor from yellow toward the radius-blended disk color.
pub const YELLOW_STAR_BLEND: f32 = 0.6;
