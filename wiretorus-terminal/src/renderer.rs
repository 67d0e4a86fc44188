/// Character-cell surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;
use wiretorus_core::{RenderResult, Rgb, Surface};

/// Stroke width, in pixels, covered by one terminal cell
const PIXELS_PER_CELL: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Rgb,
}

/// A terminal-sized grid where one cell is one pixel
///
/// Lines are rasterized into the grid and written out in `present`.
pub struct CellCanvas<W: Write> {
    width: usize,
    height: usize,
    background: Rgb,
    cells: Vec<Option<Cell>>,
    writer: W,
}

impl<W: Write> CellCanvas<W> {
    pub fn new(width: usize, height: usize, writer: W) -> Self {
        Self {
            width,
            height,
            background: Rgb::new(0, 0, 0),
            cells: vec![None; width * height],
            writer,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Glyph at a cell, `' '` for background
    pub fn glyph_at(&self, x: usize, y: usize) -> char {
        self.cells
            .get(y * self.width + x)
            .copied()
            .flatten()
            .map_or(' ', |cell| cell.glyph)
    }

    /// Number of stroked cells
    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn stamp(&mut self, x: i32, y: i32, radius: i32, cell: Cell) {
        for sy in y - radius..=y + radius {
            for sx in x - radius..=x + radius {
                if sx < 0 || sy < 0 || sx >= self.width as i32 || sy >= self.height as i32 {
                    continue;
                }
                self.cells[sy as usize * self.width + sx as usize] = Some(cell);
            }
        }
    }
}

impl<W: Write> Surface for CellCanvas<W> {
    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn clear(&mut self, color: Rgb) -> RenderResult<()> {
        self.background = color;
        self.cells.fill(None);
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        width: f32,
    ) -> RenderResult<()> {
        let cell = Cell {
            glyph: slope_glyph(to.x - from.x, to.y - from.y),
            color,
        };
        let thickness = (width / PIXELS_PER_CELL).round().max(1.0) as i32;
        let radius = (thickness - 1) / 2;

        // Bresenham line drawing
        let (mut x0, mut y0) = (from.x.floor() as i32, from.y.floor() as i32);
        let (x1, y1) = (to.x.floor() as i32, to.y.floor() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x0, y0, radius, cell);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
        Ok(())
    }

    fn present(&mut self) -> RenderResult<()> {
        let background = to_color(self.background);
        self.writer.queue(cursor::MoveTo(0, 0))?;
        self.writer.queue(SetBackgroundColor(background))?;

        let mut current = None;
        for y in 0..self.height {
            self.writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(cell) => {
                        if current != Some(cell.color) {
                            self.writer.queue(SetForegroundColor(to_color(cell.color)))?;
                            current = Some(cell.color);
                        }
                        self.writer.queue(Print(cell.glyph))?;
                    }
                    None => {
                        self.writer.queue(Print(' '))?;
                    }
                }
            }
        }
        self.writer.queue(ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Pick a glyph that follows the segment direction (y grows downward)
fn slope_glyph(dx: f32, dy: f32) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CellCanvas<Vec<u8>> {
        CellCanvas::new(20, 10, Vec::new())
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = canvas();
        canvas.clear(Rgb::new(0, 0, 0)).unwrap();
        canvas
            .draw_line(Point2::new(2.0, 5.0), Point2::new(8.0, 5.0), Rgb::new(255, 255, 255), 3.0)
            .unwrap();

        assert_eq!(canvas.ink_count(), 7);
        for x in 2..=8 {
            assert_eq!(canvas.glyph_at(x, 5), '-');
        }
        assert_eq!(canvas.glyph_at(9, 5), ' ');
    }

    #[test]
    fn test_diagonal_glyphs() {
        assert_eq!(slope_glyph(5.0, 5.0), '\\');
        assert_eq!(slope_glyph(5.0, -5.0), '/');
        assert_eq!(slope_glyph(0.0, 5.0), '|');
    }

    #[test]
    fn test_thick_line() {
        let mut canvas = canvas();
        canvas
            .draw_line(Point2::new(5.0, 5.0), Point2::new(5.0, 5.0), Rgb::new(1, 2, 3), 9.0)
            .unwrap();
        // 9px is three cells wide: a 3x3 stamp
        assert_eq!(canvas.ink_count(), 9);
    }

    #[test]
    fn test_off_surface_is_clipped() {
        let mut canvas = canvas();
        canvas
            .draw_line(Point2::new(-10.0, 2.0), Point2::new(40.0, 2.0), Rgb::new(1, 2, 3), 3.0)
            .unwrap();
        assert_eq!(canvas.ink_count(), 20);
    }

    #[test]
    fn test_clear_wipes_cells() {
        let mut canvas = canvas();
        canvas
            .draw_line(Point2::new(0.0, 0.0), Point2::new(19.0, 9.0), Rgb::new(1, 2, 3), 3.0)
            .unwrap();
        assert!(canvas.ink_count() > 0);
        canvas.clear(Rgb::new(0, 0, 0)).unwrap();
        assert_eq!(canvas.ink_count(), 0);
    }

    #[test]
    fn test_present_writes_grid() {
        let mut canvas = canvas();
        canvas.clear(Rgb::new(0x18, 0x18, 0x18)).unwrap();
        canvas
            .draw_line(Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Rgb::new(0xe1, 0xe1, 0xe1), 3.0)
            .unwrap();
        canvas.present().unwrap();

        let output = String::from_utf8(canvas.writer().clone()).unwrap();
        assert!(output.contains("----"));
    }
}
