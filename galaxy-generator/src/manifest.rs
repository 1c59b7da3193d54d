/// Export manifest describing how a galaxy file was produced.
use crate::bounds::FieldStats;
use crate::config::MANIFEST_FILE_NAME;
use crate::exporter::{ExportError, ExportFormat};
use constants::zone::{BACKGROUND_ZONE, CORE_ZONE, DISK_ZONE, ZONE_MAP, get_zone_name};
use point_field::{BackgroundParameters, GalaxyParameters};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything needed to regenerate or interpret an exported field.
#[derive(Debug, Serialize, Deserialize)]
pub struct GalaxyManifest {
    pub seed: u64,
    pub parameters: GalaxyParameters,
    /// Present when the background shell was appended to the export.
    pub background: Option<BackgroundParameters>,
    pub stats: FieldStats,
    /// File name of the point export, relative to the manifest.
    pub export_file: Option<String>,
    pub format: ExportFormat,
    /// Meaning of the LAS `user_data` zone tags.
    pub zones: Vec<ZoneEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub id: u8,
    pub name: String,
    pub point_count: usize,
}

impl GalaxyManifest {
    pub fn zone_entries(stats: &FieldStats) -> Vec<ZoneEntry> {
        ZONE_MAP
            .iter()
            .map(|zone| ZoneEntry {
                id: zone.id,
                name: zone.name.to_string(),
                point_count: match zone.id {
                    DISK_ZONE => stats.disk_points,
                    CORE_ZONE => stats.core_points,
                    BACKGROUND_ZONE => stats.background_points,
                    _ => 0,
                },
            })
            .collect()
    }
}

/// Writes the manifest next to the exported points.
pub struct ManifestGenerator {
    output_dir: PathBuf,
}

impl ManifestGenerator {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn generate_manifest(&self, manifest: &GalaxyManifest) -> Result<PathBuf, ExportError> {
        let manifest_path = self.output_dir.join(MANIFEST_FILE_NAME);
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(&manifest_path, manifest_json)?;

        println!("Generated manifest: {}", manifest_path.display());
        self.print_manifest_summary(manifest);

        Ok(manifest_path)
    }

    fn print_manifest_summary(&self, manifest: &GalaxyManifest) {
        println!("Manifest Summary:");
        println!("  Seed: {:#x}", manifest.seed);
        println!("  Points: {}", manifest.stats.point_count);
        for zone in &manifest.zones {
            println!("    {}: {}", get_zone_name(zone.id), zone.point_count);
        }
        match &manifest.export_file {
            Some(file) => println!("  Export: {}", file),
            None => println!("  No point export written"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use point_field::{PointField, Zone};

    #[test]
    fn zone_entries_follow_zone_map() {
        let mut field = PointField::new();
        field.push([1.0, 0.0, 0.0], [1.0; 3], 1.0, Zone::Disk);
        field.push([1.0, 0.0, 0.0], [1.0; 3], 1.0, Zone::Disk);
        field.push([0.0; 3], [1.0; 3], 1.0, Zone::Core);
        let entries = GalaxyManifest::zone_entries(&FieldStats::compute(&field));

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "disk");
        assert_eq!(entries[0].point_count, 2);
        assert_eq!(entries[1].point_count, 1);
        assert_eq!(entries[2].point_count, 0);
    }

    #[test]
    fn manifest_is_written_as_json() {
        let dir = std::env::temp_dir().join(format!("galaxy-manifest-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let stats = FieldStats::compute(&PointField::new());
        let manifest = GalaxyManifest {
            seed: 7,
            parameters: GalaxyParameters::default(),
            background: None,
            zones: GalaxyManifest::zone_entries(&stats),
            stats,
            export_file: Some("galaxy.laz".to_string()),
            format: ExportFormat::Laz,
        };
        let path = ManifestGenerator::new(&dir).generate_manifest(&manifest).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["seed"], 7);
        assert_eq!(json["format"], "laz");
        assert_eq!(json["parameters"]["branches"], 4);
        assert_eq!(json["zones"][2]["name"], "background");

        fs::remove_dir_all(&dir).ok();
    }
}
