use crate::bounds::FieldBounds;
use crate::config::{LAS_COORDINATE_SCALE, LAS_VERSION, SCENE_TO_LAS, WRITE_PROGRESS_INTERVAL};
use constants::galaxy::CORE_SCALE_MULTIPLIER;
use indicatif::ProgressBar;
use las::{Builder, Color, Point, Writer};
use point_field::{FieldPoint, PointField, Rgb};
use std::path::Path;

/// Rotate scene coordinates into LAS axes.
pub fn scene_to_las(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let input = [x, y, z];
    let mut output = [0.0; 3];

    for i in 0..3 {
        for j in 0..3 {
            output[i] += SCENE_TO_LAS[i][j] * input[j];
        }
    }

    (output[0], output[1], output[2])
}

/// Header for a colored point cloud centred on `bounds` (scene coordinates).
pub fn build_header(bounds: &FieldBounds, compressed: bool) -> Result<las::Header, las::Error> {
    let mut builder = Builder::from(LAS_VERSION);
    builder.point_format.has_color = true;
    builder.point_format.is_compressed = compressed;

    let (cx, cy, cz) = bounds.center();
    let (ox, oy, oz) = scene_to_las(cx, cy, cz);
    builder.transforms = las::Vector {
        x: las::Transform {
            scale: LAS_COORDINATE_SCALE,
            offset: ox,
        },
        y: las::Transform {
            scale: LAS_COORDINATE_SCALE,
            offset: oy,
        },
        z: las::Transform {
            scale: LAS_COORDINATE_SCALE,
            offset: oz,
        },
    };

    builder.into_header()
}

/// Per-point scale packed into the 16-bit intensity channel.
pub fn scale_to_intensity(scale: f32) -> u16 {
    ((scale / CORE_SCALE_MULTIPLIER).clamp(0.0, 1.0) * u16::MAX as f32).round() as u16
}

pub fn to_las_point(point: &FieldPoint) -> Point {
    let [x, y, z] = point.position;
    let (lx, ly, lz) = scene_to_las(x as f64, y as f64, z as f64);
    let [r, g, b] = Rgb::from_array(point.color).to_srgb_u16();

    let mut las_point = Point::default();
    las_point.x = lx;
    las_point.y = ly;
    las_point.z = lz;
    las_point.intensity = scale_to_intensity(point.scale);
    las_point.user_data = point.zone.tag();
    las_point.color = Some(Color::new(r, g, b));
    las_point
}

/// Write every point of `field` to `path`. LAZ compression follows `compressed`.
pub fn write_point_field(
    path: &Path,
    field: &PointField,
    bounds: &FieldBounds,
    compressed: bool,
    pb: &ProgressBar,
) -> Result<usize, las::Error> {
    let header = build_header(bounds, compressed)?;
    let mut writer = Writer::from_path(path, header)?;

    for (idx, point) in field.iter().enumerate() {
        writer.write_point(to_las_point(&point))?;

        if idx % WRITE_PROGRESS_INTERVAL == 0 {
            pb.set_position(idx as u64);
        }
    }
    writer.close()?;
    pb.finish_with_message("Points written");

    Ok(field.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::FieldStats;
    use point_field::Zone;

    #[test]
    fn up_axis_becomes_las_z() {
        assert_eq!(scene_to_las(1.0, 2.0, 3.0), (1.0, -3.0, 2.0));
    }

    #[test]
    fn intensity_spans_core_scale_range() {
        assert_eq!(scale_to_intensity(0.0), 0);
        assert_eq!(scale_to_intensity(2.0), u16::MAX);
        assert_eq!(scale_to_intensity(5.0), u16::MAX);
        assert_eq!(scale_to_intensity(1.0), 32768);
    }

    #[test]
    fn points_carry_zone_and_color() {
        let point = FieldPoint {
            position: [1.0, 2.0, 3.0],
            color: [1.0, 0.0, 0.0],
            scale: 1.0,
            zone: Zone::Core,
        };
        let las_point = to_las_point(&point);
        assert_eq!((las_point.x, las_point.y, las_point.z), (1.0, -3.0, 2.0));
        assert_eq!(las_point.user_data, 1);
        assert_eq!(las_point.color, Some(Color::new(u16::MAX, 0, 0)));
    }

    #[test]
    fn written_file_reads_back() {
        let mut field = PointField::new();
        field.push([0.5, 0.1, -0.25], [1.0; 3], 0.4, Zone::Disk);
        field.push([-2.0, 0.0, 1.0], [0.2; 3], 1.8, Zone::Core);
        field.push([20.0, 5.0, 0.0], [1.0; 3], 1.0, Zone::Background);
        let stats = FieldStats::compute(&field);

        let path = std::env::temp_dir().join(format!("galaxy-las-{}.las", std::process::id()));
        let written =
            write_point_field(&path, &field, &stats.bounds, false, &ProgressBar::hidden()).unwrap();
        assert_eq!(written, 3);

        let mut reader = las::Reader::from_path(&path).unwrap();
        assert_eq!(reader.header().number_of_points(), 3);
        let points: Vec<Point> = reader.points().map(|p| p.unwrap()).collect();
        assert_eq!(
            points.iter().map(|p| p.user_data).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!((points[1].x + 2.0).abs() < 1e-3);
        assert!((points[1].y + 1.0).abs() < 1e-3);
        assert!(points.iter().all(|p| p.color.is_some()));

        std::fs::remove_file(&path).ok();
    }
}
