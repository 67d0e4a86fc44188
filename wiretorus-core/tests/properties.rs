//! Property-based tests for the projection pipeline using the `proptest` crate.

use std::f32::consts::{PI, TAU};

use nalgebra::{Point2, Point3};
use proptest::prelude::*;

use wiretorus_core::{
    from_screen, project, rotate_y, shift_depth, to_screen, FrameDriver, Mesh, RecordingSurface,
    RenderConfig, DEFAULT_DEPTH_OFFSET,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_point() -> impl Strategy<Value = (f32, f32, f32)> {
    (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0)
}

fn arb_angle() -> impl Strategy<Value = f32> {
    -2.0 * PI..2.0 * PI
}

fn arb_normalized() -> impl Strategy<Value = (f32, f32)> {
    (-1.0f32..=1.0, -1.0f32..=1.0)
}

fn radius_xz(p: &Point3<f32>) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rotation_preserves_axis_distance((x, y, z) in arb_point(), angle in arb_angle()) {
        let p = Point3::new(x, y, z);
        let r = rotate_y(&p, angle);
        let before = radius_xz(&p);
        let after = radius_xz(&r);
        prop_assert!((before - after).abs() < 1e-4 * before.max(1.0),
            "radius changed: {} -> {}", before, after);
        prop_assert_eq!(r.y, p.y);
    }

    #[test]
    fn rotation_is_periodic((x, y, z) in arb_point(), angle in arb_angle()) {
        let p = Point3::new(x, y, z);
        let a = rotate_y(&p, angle);
        let b = rotate_y(&p, angle + TAU);
        prop_assert!((a - b).norm() < 1e-3, "{:?} != {:?}", a, b);
    }
}

// ---------------------------------------------------------------------------
// Depth shift
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn shifted_torus_stays_in_front(angle in 0.0f32..TAU) {
        let mesh = Mesh::torus();
        for v in mesh.vertices() {
            let z = shift_depth(&rotate_y(v, angle), DEFAULT_DEPTH_OFFSET).z;
            prop_assert!(z > 0.0, "vertex {:?} reached z = {} at angle {}", v, z, angle);
        }
    }
}

#[test]
fn default_offset_exceeds_torus_radius() {
    let mesh = Mesh::torus();
    let radius = mesh.max_radius_xz();
    assert!(DEFAULT_DEPTH_OFFSET > radius);

    // The closest any vertex can get to the eye is offset - radius.
    let steps = 360;
    let min_z = (0..steps)
        .map(|i| i as f32 / steps as f32 * TAU)
        .flat_map(|angle| {
            mesh.vertices()
                .iter()
                .map(move |v| shift_depth(&rotate_y(v, angle), DEFAULT_DEPTH_OFFSET).z)
        })
        .fold(f32::INFINITY, f32::min);
    assert!(min_z >= DEFAULT_DEPTH_OFFSET - radius - 1e-5);
}

// ---------------------------------------------------------------------------
// Projection and screen mapping
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn farther_points_project_closer_to_center(
        (x, y) in arb_normalized(),
        near in 0.1f32..10.0,
        gap in 0.01f32..10.0,
    ) {
        let close = project(&Point3::new(x, y, near)).unwrap();
        let far = project(&Point3::new(x, y, near + gap)).unwrap();
        prop_assert!(far.x.abs() <= close.x.abs());
        prop_assert!(far.y.abs() <= close.y.abs());
    }

    #[test]
    fn screen_mapping_round_trips(
        (x, y) in arb_normalized(),
        width in 1u32..4000,
        height in 1u32..4000,
    ) {
        let p = Point2::new(x, y);
        let back = from_screen(&to_screen(&p, width, height), width, height);
        prop_assert!((back - p).norm() < 1e-3, "{:?} -> {:?}", p, back);
    }
}

// ---------------------------------------------------------------------------
// Frame driver
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn angle_grows_linearly_with_ticks(ticks in 0usize..200) {
        let config = RenderConfig::default();
        let step = config.angular_rate * config.frame_interval();
        let mut driver = FrameDriver::new(Mesh::torus(), config, RecordingSurface::new(64, 64)).unwrap();
        for _ in 0..ticks {
            driver.tick().unwrap();
        }
        let expected = ticks as f32 * step;
        prop_assert!((driver.angle() - expected).abs() < 1e-3,
            "angle {} != {}", driver.angle(), expected);
    }
}
