/// Drawing surface abstraction and a recording implementation for tests
use nalgebra::Point2;

use crate::config::Rgb;
use crate::error::RenderResult;

/// A 2D drawing target addressed in pixel coordinates
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Rgb) -> RenderResult<()>;

    /// Stroke a line segment; endpoints may lie off-surface
    fn draw_line(
        &mut self,
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        width: f32,
    ) -> RenderResult<()>;

    /// Make the finished frame visible
    fn present(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

/// A call issued against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rgb),
    Line {
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        width: f32,
    },
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub calls: Vec<DrawCall>,
    pub presented: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            presented: 0,
        }
    }

    /// Line segments in the order they were drawn
    pub fn lines(&self) -> Vec<(Point2<f32>, Point2<f32>)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Line { from, to, .. } => Some((*from, *to)),
                DrawCall::Clear(_) => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Clear(_)))
            .count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
        self.presented = 0;
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) -> RenderResult<()> {
        self.calls.push(DrawCall::Clear(color));
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        width: f32,
    ) -> RenderResult<()> {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            width,
        });
        Ok(())
    }

    fn present(&mut self) -> RenderResult<()> {
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface() {
        let mut surface = RecordingSurface::new(100, 50);
        assert_eq!(surface.size(), (100, 50));

        surface.clear(Rgb::new(0, 0, 0)).unwrap();
        surface
            .draw_line(
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 5.0),
                Rgb::new(255, 255, 255),
                3.0,
            )
            .unwrap();
        surface.present().unwrap();

        assert_eq!(surface.clear_count(), 1);
        assert_eq!(
            surface.lines(),
            vec![(Point2::new(0.0, 0.0), Point2::new(10.0, 5.0))]
        );
        assert_eq!(surface.presented, 1);

        surface.reset();
        assert!(surface.calls.is_empty());
    }
}
