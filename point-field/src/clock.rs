/// Turns absolute timestamps into per-frame deltas.
///
/// The first tick only anchors the clock and reports a zero delta. A timestamp
/// earlier than the previous one (a reset host clock) re-anchors without
/// moving time backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now` (seconds) and return the seconds since the last tick.
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = match self.last {
            Some(previous) if now.is_finite() => (now - previous).max(0.0),
            _ => 0.0,
        };
        if now.is_finite() {
            self.last = Some(now);
        }
        self.elapsed += delta;
        delta as f32
    }

    /// Total seconds accumulated across ticks.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
