/// Nucleus stars start from pure white before tinting.
pub const CORE_COLOR: &str = "#ffffff";

/// Young blue stars scattered through the disk.
pub const BLUE_STAR_COLOR: &str = "#4a9eff";

/// Older yellow stars scattered through the disk.
pub const YELLOW_STAR_COLOR: &str = "#ffeb99";

/// Swatches the native settings panel cycles through for inside/outside colors.
pub const SWATCHES: &[&str] = &[
    "#ff6030", "#1b3984", "#ffffff", "#ffb347", "#ff4f81", "#7a5cff", "#2ec4b6", "#9bf6ff",
];
