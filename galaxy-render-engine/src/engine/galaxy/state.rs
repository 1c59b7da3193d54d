use bevy::prelude::*;
use point_field::{FrameClock, GalaxyContext, GalaxyParameters};

use crate::engine::galaxy::renderer::GalaxyPrimitive;

/// Parent of the galaxy's point primitive; carries the rotation.
#[derive(Component)]
pub struct GalaxyRoot;

/// Parent of the background star shell. Never rotates.
#[derive(Component)]
pub struct BackgroundRoot;

/// Everything the running scene needs to rebuild and spin the galaxy.
#[derive(Resource)]
pub struct GalaxyState {
    pub context: GalaxyContext<GalaxyPrimitive>,
    pub clock: FrameClock,
    pub root: Entity,
    /// Seed the current random stream started from.
    pub seed: u64,
}

impl GalaxyState {
    pub fn new(parameters: GalaxyParameters, seed: u64, root: Entity) -> Self {
        Self {
            context: GalaxyContext::seeded(parameters, seed),
            clock: FrameClock::new(),
            root,
            seed,
        }
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.context.reseed(seed);
        self.seed = seed;
    }

    /// Restart the stream from a freshly drawn seed.
    pub fn reroll(&mut self) -> u64 {
        self.seed = self.context.reroll();
        self.seed
    }
}
