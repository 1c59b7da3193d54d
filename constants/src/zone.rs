/// Tag written to LAS `user_data` for points of the spiral disk.
pub const DISK_ZONE: u8 = 0;

/// Tag for points of the dense nucleus.
pub const CORE_ZONE: u8 = 1;

/// Tag for the static background star shell.
pub const BACKGROUND_ZONE: u8 = 2;

pub struct ZoneInfo {
    pub id: u8,
    pub name: &'static str,
}

pub const ZONE_MAP: &[ZoneInfo] = &[
    ZoneInfo {
        id: DISK_ZONE,
        name: "disk",
    },
    ZoneInfo {
        id: CORE_ZONE,
        name: "core",
    },
    ZoneInfo {
        id: BACKGROUND_ZONE,
        name: "background",
    },
];

pub fn get_zone_name(id: u8) -> String {
    ZONE_MAP
        .iter()
        .find(|z| z.id == id)
        .map_or("unknown", |z| z.name)
        .to_string()
}
