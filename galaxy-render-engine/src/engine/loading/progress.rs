use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub preset_resolved: bool,
    pub galaxy_created: bool,
}
