//! Offline galaxy generator: samples a point field and exports it as LAS/LAZ.

mod bounds;
mod config;
mod exporter;
mod las_writer;
mod manifest;

use clap::Parser;
use config::DEFAULT_OUTPUT_NAME;
use exporter::{ExportError, ExportFormat, ExportSettings, GalaxyExporter};
use point_field::GalaxyPreset;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "galaxy-generator")]
#[command(about = "Sample a spiral galaxy point field and export it as LAS/LAZ")]
#[command(version)]
struct Cli {
    /// JSON preset to start from; missing keys use the defaults
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Seed for the random stream (overrides the preset)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of galaxy points
    #[arg(long)]
    count: Option<u32>,

    /// Number of spiral arms
    #[arg(long)]
    branches: Option<u32>,

    /// Galaxy radius in scene units
    #[arg(long)]
    radius: Option<f32>,

    /// Spiral twist factor
    #[arg(long, allow_hyphen_values = true)]
    spin: Option<f32>,

    /// Positional jitter
    #[arg(long)]
    randomness: Option<f32>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Output file stem
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    name: String,

    /// Point file format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Laz)]
    format: ExportFormat,

    /// Append the background star shell to the export
    #[arg(long)]
    with_background: bool,

    /// Write manifest.json next to the export
    #[arg(long)]
    manifest: bool,
}

impl Cli {
    /// Preset from disk (or defaults) with command-line overrides applied.
    fn resolve_preset(&self) -> Result<GalaxyPreset, ExportError> {
        let mut preset = match &self.preset {
            Some(path) => {
                println!("Loading preset {}", path.display());
                GalaxyPreset::load(path)?
            }
            None => GalaxyPreset::default(),
        };

        if let Some(seed) = self.seed {
            preset.seed = Some(seed);
        }

        let params = &mut preset.parameters;
        if let Some(count) = self.count {
            params.count = count;
        }
        if let Some(branches) = self.branches {
            params.branches = branches;
        }
        if let Some(radius) = self.radius {
            params.radius = radius;
        }
        if let Some(spin) = self.spin {
            params.spin = spin;
        }
        if let Some(randomness) = self.randomness {
            params.randomness = randomness;
        }

        params.validate()?;
        Ok(preset)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let preset = cli.resolve_preset()?;

    let exporter = GalaxyExporter::new(
        preset,
        ExportSettings {
            output_dir: cli.output.clone(),
            output_name: cli.name.clone(),
            format: cli.format,
            with_background: cli.with_background,
            write_manifest: cli.manifest,
        },
    );
    exporter.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "galaxy-generator",
            "--count",
            "1200",
            "--spin",
            "-2.5",
            "--seed",
            "99",
            "--format",
            "none",
        ]);
        let preset = cli.resolve_preset().unwrap();
        assert_eq!(preset.parameters.count, 1200);
        assert_eq!(preset.parameters.spin, -2.5);
        assert_eq!(preset.seed_or_default(), 99);
        assert_eq!(cli.format, ExportFormat::Skip);
        assert_eq!(cli.name, "galaxy");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = Cli::parse_from(["galaxy-generator", "--radius", "0"]);
        assert!(cli.resolve_preset().is_err());
    }
}
