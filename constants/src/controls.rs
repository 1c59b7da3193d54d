/// Inclusive slider range and snapping step for one numeric control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ControlRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

pub const COUNT: ControlRange = ControlRange::new(100.0, 1_000_000.0, 100.0);
pub const SIZE: ControlRange = ControlRange::new(0.001, 0.1, 0.001);
pub const RADIUS: ControlRange = ControlRange::new(0.1, 20.0, 0.1);
pub const BRANCHES: ControlRange = ControlRange::new(1.0, 20.0, 1.0);
pub const SPIN: ControlRange = ControlRange::new(0.0, 10.0, 0.001);
pub const RANDOMNESS: ControlRange = ControlRange::new(0.0, 1.0, 0.001);
pub const RANDOMNESS_POWER: ControlRange = ControlRange::new(1.0, 10.0, 0.001);
pub const CORE_SIZE: ControlRange = ControlRange::new(0.1, 2.0, 0.1);
pub const CORE_CONCENTRATION: ControlRange = ControlRange::new(1.0, 5.0, 0.1);
pub const ROTATION_SPEED: ControlRange = ControlRange::new(0.0, 0.5, 0.01);

/// Steps applied per second while a native panel key is held.
pub const HOLD_STEPS_PER_SECOND: f64 = 30.0;
