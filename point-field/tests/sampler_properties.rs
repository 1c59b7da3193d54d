use std::f32::consts::{FRAC_PI_2, PI, TAU};

use point_field::{
    FieldPoint, GalaxyContext, GalaxyParameters, ParameterField, ParameterValue, PointField,
    PointRenderer, PointStyle, Rgb, SeededSource, SequenceSource, Zone, generate,
};

fn angle_of(position: [f32; 3]) -> f32 {
    position[2].atan2(position[0]).rem_euclid(TAU)
}

fn angle_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

fn sample_sets() -> Vec<GalaxyParameters> {
    vec![
        GalaxyParameters {
            count: 5_000,
            ..Default::default()
        },
        GalaxyParameters {
            count: 3_000,
            branches: 1,
            spin: -3.0,
            randomness: 0.8,
            randomness_power: 1.0,
            ..Default::default()
        },
        GalaxyParameters {
            count: 3_000,
            radius: 12.0,
            branches: 9,
            core_size: 2.0,
            core_concentration: 5.0,
            inside_color: Rgb::WHITE,
            outside_color: Rgb::new(0.0, 0.0, 0.0),
            ..Default::default()
        },
    ]
}

#[test]
fn buffer_lengths_match_count() {
    for (seed, params) in sample_sets().into_iter().enumerate() {
        let field = generate(&params, &mut SeededSource::new(seed as u64)).unwrap();
        assert_eq!(field.len(), params.count as usize);
        assert_eq!(field.colors().len(), params.count as usize);
        assert_eq!(field.scales().len(), params.count as usize);
    }
}

#[test]
fn planar_radius_stays_within_galaxy_plus_jitter() {
    for (seed, params) in sample_sets().into_iter().enumerate() {
        let field = generate(&params, &mut SeededSource::new(100 + seed as u64)).unwrap();
        let limit = params.radius * (1.0 + params.randomness * 2f32.sqrt()) + 1e-4;
        for i in 0..field.len() {
            let r = field.planar_radius(i);
            assert!(r >= 0.0 && r <= limit, "point {} at radius {} > {}", i, r, limit);
        }
    }
}

#[test]
fn same_seed_is_bit_identical() {
    let params = GalaxyParameters {
        count: 20_000,
        ..Default::default()
    };
    let first = generate(&params, &mut SeededSource::new(77)).unwrap();
    let second = generate(&params, &mut SeededSource::new(77)).unwrap();

    let bits = |field: &PointField| -> Vec<u32> {
        field
            .positions()
            .iter()
            .chain(field.colors())
            .flatten()
            .chain(field.scales())
            .map(|v| v.to_bits())
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));

    let other = generate(&params, &mut SeededSource::new(78)).unwrap();
    assert_ne!(bits(&first), bits(&other));
}

#[test]
fn arms_follow_round_robin_angles_without_randomness() {
    let params = GalaxyParameters {
        count: 2_000,
        branches: 5,
        spin: 0.0,
        randomness: 0.0,
        ..Default::default()
    };
    let field = generate(&params, &mut SeededSource::new(4)).unwrap();
    for i in 0..field.len() {
        if field.planar_radius(i) < 1e-3 {
            continue;
        }
        let expected = (i % 5) as f32 / 5.0 * TAU;
        let actual = angle_of(field.positions()[i]);
        assert!(
            angle_distance(actual, expected) < 1e-3,
            "point {}: angle {} expected {}",
            i,
            actual,
            expected
        );
    }
}

#[test]
fn colors_stay_in_unit_range() {
    for (seed, params) in sample_sets().into_iter().enumerate() {
        let field = generate(&params, &mut SeededSource::new(seed as u64 + 30)).unwrap();
        for color in field.colors() {
            for c in color {
                assert!((0.0..=1.0).contains(c), "component {}", c);
            }
        }
    }
}

#[test]
fn scales_respect_zone_multiplier() {
    let params = GalaxyParameters {
        count: 5_000,
        ..Default::default()
    };
    let field = generate(&params, &mut SeededSource::new(12)).unwrap();
    for point in field.iter() {
        let max = if point.zone == Zone::Core { 2.0 } else { 1.0 };
        assert!((0.0..max).contains(&point.scale));
    }
    let core = field.count_zone(Zone::Core) as f32 / field.len() as f32;
    assert!((core - 0.3).abs() < 0.03, "core fraction {}", core);
}

#[test]
fn zero_count_is_empty() {
    let params = GalaxyParameters {
        count: 0,
        ..Default::default()
    };
    let field = generate(&params, &mut SeededSource::new(1)).unwrap();
    assert!(field.is_empty());
    assert!(field.colors().is_empty());
    assert!(field.scales().is_empty());
}

#[test]
fn single_branch_is_finite() {
    let params = GalaxyParameters {
        count: 1_000,
        branches: 1,
        ..Default::default()
    };
    let field = generate(&params, &mut SeededSource::new(2)).unwrap();
    assert!(field.positions().iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn four_point_scenario_matches_hand_computed_layout() {
    let params = GalaxyParameters {
        count: 4,
        branches: 4,
        radius: 5.0,
        spin: 0.0,
        randomness: 0.0,
        core_size: 0.0,
        randomness_power: 1.0,
        core_concentration: 1.0,
        ..Default::default()
    };
    // 0.5 >= 0.3 puts every point in the disk.
    let field = generate(&params, &mut SequenceSource::constant(0.5)).unwrap();
    let r = 5.0 * 0.5f32.powf(0.7);
    let expected = [[r, 0.0, 0.0], [0.0, 0.0, r], [-r, 0.0, 0.0], [0.0, 0.0, -r]];

    assert_eq!(field.len(), 4);
    for (i, (actual, want)) in field.positions().iter().zip(expected).enumerate() {
        for axis in 0..3 {
            assert!(
                (actual[axis] - want[axis]).abs() < 1e-5,
                "point {} axis {}: {} vs {}",
                i,
                axis,
                actual[axis],
                want[axis]
            );
        }
        assert!((field.planar_radius(i) - r).abs() < 1e-5);
    }

    let angles: Vec<f32> = field.positions().iter().map(|p| angle_of(*p)).collect();
    for (actual, want) in angles.iter().zip([0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2]) {
        assert!(angle_distance(*actual, want) < 1e-5);
    }
}

/// Records every field handed to it so tests can inspect what was built.
#[derive(Default)]
struct CapturingRenderer {
    built: Vec<PointField>,
    styles: Vec<PointStyle>,
}

impl PointRenderer for CapturingRenderer {
    type Handle = usize;

    fn create_point_primitive(&mut self, field: &PointField, style: &PointStyle) -> usize {
        self.built.push(field.clone());
        self.styles.push(*style);
        self.built.len()
    }

    fn attach(&mut self, _handle: &usize) {}
    fn detach(&mut self, _handle: &usize) {}
    fn dispose(&mut self, _handle: &usize) {}
}

#[test]
fn drag_events_do_not_regenerate_until_commit() {
    let mut renderer = CapturingRenderer::default();
    let mut context = GalaxyContext::seeded(
        GalaxyParameters {
            count: 1_000,
            randomness: 0.0,
            spin: 0.0,
            ..Default::default()
        },
        5,
    );
    context.regenerate(&mut renderer).unwrap();

    for branches in 5..=12 {
        context
            .stage(ParameterField::Branches, ParameterValue::Number(branches as f64))
            .unwrap();
        context
            .stage(ParameterField::Count, ParameterValue::Number(2_000.0 + branches as f64 * 100.0))
            .unwrap();
    }
    assert_eq!(renderer.built.len(), 1);

    context
        .commit(&mut renderer, ParameterField::Branches, ParameterValue::Number(3.0))
        .unwrap();
    assert_eq!(renderer.built.len(), 2);

    // Only the committed branch count reached the sampler; the staged count
    // is still pending.
    let field = &renderer.built[1];
    assert_eq!(field.len(), 1_000);
    for i in 0..field.len() {
        if field.planar_radius(i) < 1e-3 {
            continue;
        }
        let expected = (i % 3) as f32 / 3.0 * TAU;
        assert!(angle_distance(angle_of(field.positions()[i]), expected) < 1e-3);
    }

    context
        .commit_staged(&mut renderer, ParameterField::Count)
        .unwrap();
    assert_eq!(renderer.built.len(), 3);
    assert_eq!(renderer.built[2].len(), 3_200);
}

#[test]
fn size_commit_rebuilds_with_new_style() {
    let mut renderer = CapturingRenderer::default();
    let mut context = GalaxyContext::seeded(
        GalaxyParameters {
            count: 200,
            ..Default::default()
        },
        5,
    );
    context.regenerate(&mut renderer).unwrap();
    context
        .commit(&mut renderer, ParameterField::Size, ParameterValue::Number(0.05))
        .unwrap();

    assert_eq!(renderer.styles.len(), 2);
    assert_eq!(renderer.styles[0].size, 0.01);
    assert_eq!(renderer.styles[1].size, 0.05);
}

#[test]
fn points_read_back_in_buffer_order() {
    let params = GalaxyParameters {
        count: 64,
        ..Default::default()
    };
    let field = generate(&params, &mut SeededSource::new(21)).unwrap();
    let points: Vec<FieldPoint> = field.iter().collect();

    assert_eq!(points.len(), field.len());
    for (i, point) in points.iter().enumerate() {
        assert_eq!(point.position, field.positions()[i]);
        assert_eq!(point.color, field.colors()[i]);
        assert_eq!(point.scale, field.scales()[i]);
        assert_eq!(point.zone, field.zones()[i]);
    }
}
