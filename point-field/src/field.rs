use constants::zone::{BACKGROUND_ZONE, CORE_ZONE, DISK_ZONE};

/// Which part of the scene a point was sampled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Disk,
    Core,
    Background,
}

impl Zone {
    /// Numeric tag written alongside exported points.
    pub fn tag(&self) -> u8 {
        match self {
            Zone::Disk => DISK_ZONE,
            Zone::Core => CORE_ZONE,
            Zone::Background => BACKGROUND_ZONE,
        }
    }
}

/// Parallel point buffers: index `i` in every buffer describes the same point.
///
/// Points can only be appended through [`PointField::push`], which keeps all
/// buffers the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointField {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    scales: Vec<f32>,
    zones: Vec<Zone>,
}

impl PointField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            scales: Vec::with_capacity(capacity),
            zones: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, position: [f32; 3], color: [f32; 3], scale: f32, zone: Zone) {
        self.positions.push(position);
        self.colors.push(color);
        self.scales.push(scale);
        self.zones.push(zone);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Distance from the vertical axis, ignoring height.
    pub fn planar_radius(&self, index: usize) -> f32 {
        let [x, _, z] = self.positions[index];
        (x * x + z * z).sqrt()
    }

    pub fn count_zone(&self, zone: Zone) -> usize {
        self.zones.iter().filter(|z| **z == zone).count()
    }

    /// Append every point of `other`, keeping its zones.
    pub fn extend_from(&mut self, other: &PointField) {
        self.positions.extend_from_slice(&other.positions);
        self.colors.extend_from_slice(&other.colors);
        self.scales.extend_from_slice(&other.scales);
        self.zones.extend_from_slice(&other.zones);
    }

    /// Vertex colors with an opaque alpha channel appended.
    pub fn colors_rgba(&self) -> Vec<[f32; 4]> {
        self.colors.iter().map(|[r, g, b]| [*r, *g, *b, 1.0]).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldPoint> + '_ {
        (0..self.len()).map(move |i| FieldPoint {
            position: self.positions[i],
            color: self.colors[i],
            scale: self.scales[i],
            zone: self.zones[i],
        })
    }
}

/// One point read back out of a [`PointField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPoint {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub scale: f32,
    pub zone: Zone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_stay_parallel() {
        let mut field = PointField::with_capacity(2);
        field.push([1.0, 0.0, 0.0], [1.0, 0.0, 0.0], 0.5, Zone::Core);
        field.push([0.0, 0.0, 2.0], [0.0, 1.0, 0.0], 0.25, Zone::Disk);

        assert_eq!(field.len(), 2);
        assert_eq!(field.colors().len(), 2);
        assert_eq!(field.scales().len(), 2);
        assert_eq!(field.zones().len(), 2);

        let second = field.iter().nth(1).unwrap();
        assert_eq!(second.position, [0.0, 0.0, 2.0]);
        assert_eq!(second.scale, 0.25);
        assert_eq!(second.zone, Zone::Disk);
    }

    #[test]
    fn planar_radius_ignores_height() {
        let mut field = PointField::new();
        field.push([3.0, 100.0, 4.0], [1.0; 3], 1.0, Zone::Disk);
        assert_eq!(field.planar_radius(0), 5.0);
    }

    #[test]
    fn extend_keeps_zones() {
        let mut galaxy = PointField::new();
        galaxy.push([0.0; 3], [1.0; 3], 1.0, Zone::Core);
        let mut stars = PointField::new();
        stars.push([20.0, 0.0, 0.0], [1.0; 3], 1.0, Zone::Background);

        galaxy.extend_from(&stars);
        assert_eq!(galaxy.count_zone(Zone::Core), 1);
        assert_eq!(galaxy.count_zone(Zone::Background), 1);
        assert_eq!(galaxy.colors_rgba()[1], [1.0, 1.0, 1.0, 1.0]);
    }
}
