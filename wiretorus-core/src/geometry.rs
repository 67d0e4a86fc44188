/// Geometry primitives for wireframe rendering
use nalgebra::Point3;

use crate::error::{RenderError, RenderResult};

/// A vertex in normalized model space
pub type Vertex = Point3<f32>;

/// An ordered run of vertex indices stroked as a polyline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceLoop {
    pub indices: Vec<usize>,
    /// Closed loops also connect the last index back to the first.
    pub closed: bool,
}

impl FaceLoop {
    pub fn closed(indices: Vec<usize>) -> Self {
        Self {
            indices,
            closed: true,
        }
    }

    pub fn open(indices: Vec<usize>) -> Self {
        Self {
            indices,
            closed: false,
        }
    }

    /// Consecutive index pairs, plus the wrap-around pair for closed loops
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        let count = match (n, self.closed) {
            (0 | 1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        };
        (0..count).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }
}

/// A wireframe mesh: vertices plus the loops connecting them
///
/// Read-only once built. Construction checks every loop index against
/// the vertex list, so lookups during rendering cannot go out of bounds.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    loops: Vec<FaceLoop>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, loops: Vec<FaceLoop>) -> RenderResult<Self> {
        for (loop_index, face_loop) in loops.iter().enumerate() {
            for (position, &index) in face_loop.indices.iter().enumerate() {
                if index >= vertices.len() {
                    return Err(RenderError::IndexOutOfBounds {
                        loop_index,
                        position,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }
        Ok(Self { vertices, loops })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn loops(&self) -> &[FaceLoop] {
        &self.loops
    }

    /// Every edge of every loop, in draw order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.loops.iter().flat_map(FaceLoop::edges)
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Largest distance of any vertex from the Y axis
    pub fn max_radius_xz(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| (v.x * v.x + v.z * v.z).sqrt())
            .fold(0.0, f32::max)
    }

    /// The built-in torus: four rings of eight vertices joined by eight ribs
    pub fn torus() -> Self {
        let vertices = TORUS_VERTICES
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();

        let rings = (0..4).map(|ring| FaceLoop::closed((ring * 8..ring * 8 + 8).collect()));
        let ribs = (0..8).map(|k| FaceLoop::closed(vec![k, k + 8, k + 16, k + 24]));
        let loops = rings.chain(ribs).collect();

        Self { vertices, loops }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::torus()
    }
}

#[rustfmt::skip]
const TORUS_VERTICES: [[f32; 3]; 32] = [
    // Outer ring
    [0.50, 0.00, 0.00], [0.35, 0.35, 0.00], [0.00, 0.50, 0.00], [-0.35, 0.35, 0.00],
    [-0.50, 0.00, 0.00], [-0.35, -0.35, 0.00], [0.00, -0.50, 0.00], [0.35, -0.35, 0.00],
    // Front middle ring
    [0.42, 0.00, 0.10], [0.30, 0.30, 0.10], [0.00, 0.42, 0.10], [-0.30, 0.30, 0.10],
    [-0.42, 0.00, 0.10], [-0.30, -0.30, 0.10], [0.00, -0.42, 0.10], [0.30, -0.30, 0.10],
    // Inner ring
    [0.25, 0.00, 0.15], [0.18, 0.18, 0.15], [0.00, 0.25, 0.15], [-0.18, 0.18, 0.15],
    [-0.25, 0.00, 0.15], [-0.18, -0.18, 0.15], [0.00, -0.25, 0.15], [0.18, -0.18, 0.15],
    // Back middle ring
    [0.42, 0.00, -0.10], [0.30, 0.30, -0.10], [0.00, 0.42, -0.10], [-0.30, 0.30, -0.10],
    [-0.42, 0.00, -0.10], [-0.30, -0.30, -0.10], [0.00, -0.42, -0.10], [0.30, -0.30, -0.10],
];
