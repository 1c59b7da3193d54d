/// Shared configuration for galaxy export

/// LAS coordinate quantisation: 1 mm in scene units
pub const LAS_COORDINATE_SCALE: f64 = 0.001;

/// LAS format version written by the exporter
pub const LAS_VERSION: (u8, u8) = (1, 4);

/// Points per rayon chunk when summarising a field
pub const STATS_CHUNK_SIZE: usize = 25_000;

/// Points written between progress bar refreshes
pub const WRITE_PROGRESS_INTERVAL: usize = 50_000;

/// Default file stem for exports and manifests
pub const DEFAULT_OUTPUT_NAME: &str = "galaxy";

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

pub const PROGRESS_TEMPLATE: &str = "[{bar:40.cyan/blue}] {pos}/{len} points ({percent}%) {msg}";
pub const PROGRESS_CHARS: &str = "▉▊▋▌▍▎▏ ";

/// Scene (Y up) to LAS (Z up) axes, row-major: [x_las, y_las, z_las]
pub const SCENE_TO_LAS: [[f64; 3]; 3] = [
    [1.0, 0.0, 0.0],  // X = X
    [0.0, 0.0, -1.0], // Y = -Z
    [0.0, 1.0, 0.0],  // Z = Y
];
