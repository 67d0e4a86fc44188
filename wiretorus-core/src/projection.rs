/// Perspective projection and screen mapping
use nalgebra::{Point2, Point3};

use crate::error::{RenderError, RenderResult};

/// Project a 3D point to normalized 2D coordinates (unit focal length)
///
/// Callers keep z positive with the depth shift; anything else is a
/// degenerate configuration rather than a point to skip.
pub fn project(point: &Point3<f32>) -> RenderResult<Point2<f32>> {
    if !point.z.is_finite() || point.z <= 0.0 {
        return Err(RenderError::DegenerateDepth { z: point.z });
    }
    Ok(Point2::new(point.x / point.z, point.y / point.z))
}

/// Map normalized coordinates in [-1, 1] to pixels, flipping y
///
/// Values outside [-1, 1] land off-surface and are not clamped.
pub fn to_screen(point: &Point2<f32>, width: u32, height: u32) -> Point2<f32> {
    Point2::new(
        (point.x + 1.0) / 2.0 * width as f32,
        (1.0 - (point.y + 1.0) / 2.0) * height as f32,
    )
}

/// Inverse of [`to_screen`]
pub fn from_screen(pixel: &Point2<f32>, width: u32, height: u32) -> Point2<f32> {
    Point2::new(
        pixel.x / width as f32 * 2.0 - 1.0,
        (1.0 - pixel.y / height as f32) * 2.0 - 1.0,
    )
}
