/// Rotation about the vertical axis and the depth shift applied before projection
use nalgebra::Point3;

/// Distance the mesh is pushed away from the eye before projection
pub const DEFAULT_DEPTH_OFFSET: f32 = 1.0;

/// Rotation angle around the Y axis (in radians)
///
/// Grows without bound; the trigonometric functions take care of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub angle: f32,
}

impl Spin {
    pub fn new(angle: f32) -> Self {
        Self { angle }
    }

    /// Advance by `rate` radians per second over `dt` seconds
    pub fn advance(&mut self, rate: f32, dt: f32) {
        self.angle += rate * dt;
    }
}

/// Rotate a point about the Y axis, mixing x and z
pub fn rotate_y(point: &Point3<f32>, angle: f32) -> Point3<f32> {
    let (sin, cos) = angle.sin_cos();
    Point3::new(
        point.x * cos - point.z * sin,
        point.y,
        point.x * sin + point.z * cos,
    )
}

/// Move a point along +z so it sits in front of the projection origin
pub fn shift_depth(point: &Point3<f32>, offset: f32) -> Point3<f32> {
    Point3::new(point.x, point.y, point.z + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_spin_advance() {
        let mut spin = Spin::default();
        assert_eq!(spin.angle, 0.0);

        spin.advance(FRAC_PI_2, 0.5);
        assert!((spin.angle - FRAC_PI_2 * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let p = Point3::new(0.3, -0.2, 0.1);
        let r = rotate_y(&p, 0.0);
        assert_relative_eq!(r, p);
    }

    #[test]
    fn test_quarter_turn() {
        // x' = x cos - z sin, z' = x sin + z cos
        let r = rotate_y(&Point3::new(1.0, 2.0, 0.0), FRAC_PI_2);
        assert_relative_eq!(r, Point3::new(0.0, 2.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_point_on_axis_is_fixed() {
        let p = Point3::new(0.0, 0.7, 0.0);
        assert_relative_eq!(rotate_y(&p, PI / 3.0), p, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_leaves_input_untouched() {
        let p = Point3::new(0.5, 0.0, 0.0);
        let _ = rotate_y(&p, 1.0);
        assert_eq!(p, Point3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_shift_depth() {
        let p = shift_depth(&Point3::new(0.1, 0.2, -0.3), DEFAULT_DEPTH_OFFSET);
        assert_relative_eq!(p, Point3::new(0.1, 0.2, 0.7), epsilon = 1e-6);
    }
}
