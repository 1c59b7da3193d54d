/// Point field coordinate bounds and summary statistics
use crate::config::STATS_CHUNK_SIZE;
use point_field::{PointField, Zone};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl FieldBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn merge(&mut self, other: &FieldBounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
        self.min_z = self.min_z.min(other.min_z);
        self.max_z = self.max_z.max(other.max_z);
    }

    /// True until the first point is added
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn dimensions(&self) -> (f64, f64, f64) {
        if self.is_empty() {
            return (0.0, 0.0, 0.0);
        }
        (
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }

    /// Midpoint, used as the LAS coordinate offset. Empty bounds centre on the origin.
    pub fn center(&self) -> (f64, f64, f64) {
        if self.is_empty() {
            return (0.0, 0.0, 0.0);
        }
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }
}

/// Summary of a generated field, reported on the console and stored in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub bounds: FieldBounds,
    pub point_count: usize,
    pub disk_points: usize,
    pub core_points: usize,
    pub background_points: usize,
    pub mean_scale: f64,
    /// Largest distance from the vertical axis among galaxy points.
    pub max_planar_radius: f64,
}

impl FieldStats {
    /// Summarise `field` in parallel chunks.
    pub fn compute(field: &PointField) -> Self {
        let partial = field
            .positions()
            .par_chunks(STATS_CHUNK_SIZE)
            .zip(field.zones().par_chunks(STATS_CHUNK_SIZE))
            .zip(field.scales().par_chunks(STATS_CHUNK_SIZE))
            .map(|((positions, zones), scales)| {
                let mut local = ChunkStats::new();
                for ((position, zone), scale) in positions.iter().zip(zones).zip(scales) {
                    local.add(*position, *zone, *scale);
                }
                local
            })
            .reduce_with(|mut a, b| {
                a.merge(b);
                a
            })
            .unwrap_or_else(ChunkStats::new);

        let point_count = field.len();
        Self {
            bounds: partial.bounds,
            point_count,
            disk_points: partial.disk,
            core_points: partial.core,
            background_points: partial.background,
            mean_scale: if point_count == 0 {
                0.0
            } else {
                partial.scale_sum / point_count as f64
            },
            max_planar_radius: partial.max_planar_radius,
        }
    }
}

struct ChunkStats {
    bounds: FieldBounds,
    disk: usize,
    core: usize,
    background: usize,
    scale_sum: f64,
    max_planar_radius: f64,
}

impl ChunkStats {
    fn new() -> Self {
        Self {
            bounds: FieldBounds::new(),
            disk: 0,
            core: 0,
            background: 0,
            scale_sum: 0.0,
            max_planar_radius: 0.0,
        }
    }

    fn add(&mut self, [x, y, z]: [f32; 3], zone: Zone, scale: f32) {
        self.bounds.update(x as f64, y as f64, z as f64);
        self.scale_sum += scale as f64;
        match zone {
            Zone::Disk => self.disk += 1,
            Zone::Core => self.core += 1,
            Zone::Background => {
                self.background += 1;
                return;
            }
        }
        let radius = ((x * x + z * z) as f64).sqrt();
        self.max_planar_radius = self.max_planar_radius.max(radius);
    }

    fn merge(&mut self, other: ChunkStats) {
        self.bounds.merge(&other.bounds);
        self.disk += other.disk;
        self.core += other.core;
        self.background += other.background;
        self.scale_sum += other.scale_sum;
        self.max_planar_radius = self.max_planar_radius.max(other.max_planar_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field() -> PointField {
        let mut field = PointField::new();
        field.push([3.0, 0.5, 4.0], [1.0; 3], 0.5, Zone::Disk);
        field.push([-1.0, -0.25, 0.0], [1.0; 3], 1.5, Zone::Core);
        field.push([0.0, 30.0, 0.0], [1.0; 3], 1.0, Zone::Background);
        field
    }

    #[test]
    fn stats_count_zones_and_bounds() {
        let stats = FieldStats::compute(&sample_field());
        assert_eq!(stats.point_count, 3);
        assert_eq!(stats.disk_points, 1);
        assert_eq!(stats.core_points, 1);
        assert_eq!(stats.background_points, 1);
        assert_eq!(stats.bounds.min_x, -1.0);
        assert_eq!(stats.bounds.max_y, 30.0);
        assert_eq!(stats.max_planar_radius, 5.0);
        assert!((stats.mean_scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn chunks_merge_to_the_same_result() {
        let mut field = PointField::new();
        for i in 0..(STATS_CHUNK_SIZE * 2 + 17) {
            let x = i as f32 * 0.001;
            field.push([x, 0.0, -x], [0.5; 3], 1.0, Zone::Disk);
        }
        let stats = FieldStats::compute(&field);
        assert_eq!(stats.disk_points, field.len());
        assert_eq!(stats.bounds.min_x, 0.0);
        assert_eq!(stats.bounds.max_x, field.positions()[field.len() - 1][0] as f64);
        assert_eq!(stats.bounds.min_z, -stats.bounds.max_x);
    }

    #[test]
    fn empty_field_has_empty_bounds() {
        let stats = FieldStats::compute(&PointField::new());
        assert!(stats.bounds.is_empty());
        assert_eq!(stats.bounds.center(), (0.0, 0.0, 0.0));
        assert_eq!(stats.mean_scale, 0.0);
    }
}
