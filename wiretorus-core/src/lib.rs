/// wiretorus Core Library - Wireframe projection pipeline
///
/// This library provides the rendering core shared by every front end:
/// the built-in torus mesh, the rotate / depth-shift / project / screen-map
/// pipeline, and the frame driver that runs it against an injected surface.

pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod schedule;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use config::{RenderConfig, Rgb};
pub use driver::{DriverState, FrameDriver};
pub use error::{RenderError, RenderResult};
pub use geometry::{FaceLoop, Mesh, Vertex};
pub use projection::{from_screen, project, to_screen};
pub use schedule::{ManualScheduler, Scheduler, SleepScheduler, StopHandle};
pub use surface::{DrawCall, RecordingSurface, Surface};
pub use transform::{rotate_y, shift_depth, Spin, DEFAULT_DEPTH_OFFSET};
