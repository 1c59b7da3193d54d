/// Clear color behind the galaxy (`#050510`).
pub const CLEAR_COLOR: [u8; 3] = [0x05, 0x05, 0x10];

/// Initial camera position, looking at the origin.
pub const CAMERA_START: [f32; 3] = [3.0, 3.0, 3.0];

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

/// Fraction of the remaining orbit velocity kept each frame at 60 Hz.
pub const ORBIT_DAMPING: f32 = 0.95;

pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 60.0;

/// Seconds between FPS notifications sent to the embedding page.
pub const FPS_NOTIFY_INTERVAL: f32 = 0.5;

/// Relative asset path of the preset the engine loads at startup.
pub const DEFAULT_PRESET_PATH: &str = "presets/default.galaxy.json";
