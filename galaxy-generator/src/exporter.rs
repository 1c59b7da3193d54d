/// Galaxy sampling and export pipeline.
use crate::bounds::FieldStats;
use crate::config::{PROGRESS_CHARS, PROGRESS_TEMPLATE};
use crate::las_writer::write_point_field;
use crate::manifest::{GalaxyManifest, ManifestGenerator};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use point_field::{
    GalaxyPreset, ParameterError, PointField, PresetError, SeededSource, generate_with_progress,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug)]
pub enum ExportError {
    IoError(std::io::Error),
    LasError(las::Error),
    JsonError(serde_json::Error),
    InvalidParameters(ParameterError),
    PresetError(PresetError),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err)
    }
}

impl From<las::Error> for ExportError {
    fn from(err: las::Error) -> Self {
        ExportError::LasError(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::JsonError(err)
    }
}

impl From<ParameterError> for ExportError {
    fn from(err: ParameterError) -> Self {
        ExportError::InvalidParameters(err)
    }
}

impl From<PresetError> for ExportError {
    fn from(err: PresetError) -> Self {
        ExportError::PresetError(err)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "IO error: {}", e),
            ExportError::LasError(e) => write!(f, "LAS error: {}", e),
            ExportError::JsonError(e) => write!(f, "JSON error: {}", e),
            ExportError::InvalidParameters(e) => write!(f, "Invalid parameters: {}", e),
            ExportError::PresetError(e) => write!(f, "Preset error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// Point file format written by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Las,
    Laz,
    /// Sample and report only.
    #[value(name = "none")]
    #[serde(rename = "none")]
    Skip,
}

impl ExportFormat {
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ExportFormat::Las => Some("las"),
            ExportFormat::Laz => Some("laz"),
            ExportFormat::Skip => None,
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, ExportFormat::Laz)
    }
}

pub struct ExportSettings {
    pub output_dir: PathBuf,
    pub output_name: String,
    pub format: ExportFormat,
    pub with_background: bool,
    pub write_manifest: bool,
}

pub struct ExportSummary {
    pub stats: FieldStats,
    pub export_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
}

/// Samples a galaxy from a preset and writes it out.
pub struct GalaxyExporter {
    preset: GalaxyPreset,
    settings: ExportSettings,
}

impl GalaxyExporter {
    pub fn new(preset: GalaxyPreset, settings: ExportSettings) -> Self {
        Self { preset, settings }
    }

    pub fn run(&self) -> Result<ExportSummary, ExportError> {
        let started = Instant::now();
        let seed = self.preset.seed_or_default();
        let params = &self.preset.parameters;

        println!(
            "Generating galaxy: {} points, {} arms, seed {:#x}",
            params.count, params.branches, seed
        );

        fs::create_dir_all(&self.settings.output_dir)?;

        let mut rng = SeededSource::new(seed);
        let mut field = self.sample_galaxy(&mut rng)?;

        if self.settings.with_background {
            let stars = self.preset.background.generate(&mut rng)?;
            info!("Appending {} background stars", stars.len());
            field.extend_from(&stars);
        }

        let stats = FieldStats::compute(&field);
        self.print_stats(&stats);

        let export_path = match self.settings.format.extension() {
            Some(extension) => {
                let path = self
                    .settings
                    .output_dir
                    .join(format!("{}.{}", self.settings.output_name, extension));
                self.write_points(&path, &field, &stats)?;
                Some(path)
            }
            None => None,
        };

        let manifest_path = if self.settings.write_manifest {
            let manifest = GalaxyManifest {
                seed,
                parameters: params.clone(),
                background: self
                    .settings
                    .with_background
                    .then(|| self.preset.background.clone()),
                zones: GalaxyManifest::zone_entries(&stats),
                stats: stats.clone(),
                export_file: export_path
                    .as_ref()
                    .and_then(|path| path.file_name())
                    .map(|name| name.to_string_lossy().to_string()),
                format: self.settings.format,
            };
            let generator = ManifestGenerator::new(&self.settings.output_dir);
            Some(generator.generate_manifest(&manifest)?)
        } else {
            None
        };

        println!(
            "Export complete in {:.2}s",
            started.elapsed().as_secs_f64()
        );

        Ok(ExportSummary {
            stats,
            export_path,
            manifest_path,
        })
    }

    fn sample_galaxy(&self, rng: &mut SeededSource) -> Result<PointField, ExportError> {
        let params = &self.preset.parameters;
        let pb = progress_bar(params.count as u64, "Sampling galaxy");

        let field = generate_with_progress(params, rng, |done| pb.set_position(done as u64))?;

        pb.finish_with_message("Galaxy sampled");
        Ok(field)
    }

    fn write_points(
        &self,
        path: &Path,
        field: &PointField,
        stats: &FieldStats,
    ) -> Result<(), ExportError> {
        let pb = progress_bar(field.len() as u64, "Writing points");
        let written = write_point_field(
            path,
            field,
            &stats.bounds,
            self.settings.format.is_compressed(),
            &pb,
        )?;
        debug!("Wrote {} points to {}", written, path.display());
        println!("Saved {} ({} points)", path.display(), written);
        Ok(())
    }

    fn print_stats(&self, stats: &FieldStats) {
        let (width, height, depth) = stats.bounds.dimensions();
        println!("Field statistics:");
        println!(
            "  Points: {} (disk {}, core {}, background {})",
            stats.point_count, stats.disk_points, stats.core_points, stats.background_points
        );
        println!("  Extent: {:.2} x {:.2} x {:.2}", width, height, depth);
        println!("  Max disk radius: {:.2}", stats.max_planar_radius);
        println!("  Mean point scale: {:.3}", stats.mean_scale);
    }
}

pub fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(PROGRESS_CHARS),
    );
    pb.set_message(message);
    pb
}
