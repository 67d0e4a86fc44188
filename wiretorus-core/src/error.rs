//! Error types for the render pipeline.
//!
//! Every variant is fatal to the animation loop: the frame driver stops
//! instead of drawing a corrupted frame.

use thiserror::Error;

use crate::driver::DriverState;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while building or rendering a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A face loop references a vertex that does not exist.
    #[error("face loop {loop_index} position {position}: vertex index {index} out of bounds ({vertex_count} vertices)")]
    IndexOutOfBounds {
        loop_index: usize,
        position: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A point reached the projector with a non-positive or non-finite depth.
    #[error("degenerate depth z = {z} after depth shift")]
    DegenerateDepth { z: f32 },

    /// The depth offset cannot keep every rotated vertex in front of the eye.
    #[error("depth offset {offset} does not exceed mesh radius {radius}")]
    InsufficientDepthOffset { offset: f32, radius: f32 },

    /// Invalid render configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The driver has already stopped or faulted.
    #[error("frame driver is not running (state: {0:?})")]
    NotRunning(DriverState),

    /// The drawing surface rejected a call.
    #[error("surface error: {0}")]
    Surface(String),

    /// I/O failure while presenting a frame.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig(details.into())
    }

    /// Create a surface error.
    #[must_use]
    pub fn surface(details: impl Into<String>) -> Self {
        Self::Surface(details.into())
    }
}
