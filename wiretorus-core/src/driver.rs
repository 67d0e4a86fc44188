//! Frame driver: owns the rotation angle and runs the pipeline every tick.
//!
//! Per frame, each mesh edge goes through
//! rotate → depth shift → project → screen map, and the resulting segment
//! is stroked on the injected [`Surface`]. The angle is the only state that
//! survives between frames; every intermediate point is recomputed.

use std::sync::Arc;
use std::time::Duration;

use nalgebra::Point2;
use tracing::{debug, error, info};

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::geometry::{Mesh, Vertex};
use crate::projection::{project, to_screen};
use crate::schedule::{Scheduler, StopHandle};
use crate::surface::Surface;
use crate::transform::{rotate_y, shift_depth, Spin};

/// Lifecycle of a [`FrameDriver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, no frame rendered yet
    Idle,
    /// Ticking
    Running,
    /// Stop handle was triggered
    Stopped,
    /// A fatal error ended the loop
    Faulted,
}

impl DriverState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped | Self::Faulted)
    }
}

/// Drives the rotating wireframe animation on a surface
pub struct FrameDriver<S: Surface> {
    mesh: Arc<Mesh>,
    config: RenderConfig,
    surface: S,
    spin: Spin,
    state: DriverState,
    stop: StopHandle,
    frames: u64,
}

impl<S: Surface> FrameDriver<S> {
    /// Build a driver, checking the config and that the depth offset keeps
    /// every rotated vertex in front of the eye.
    pub fn new(mesh: impl Into<Arc<Mesh>>, config: RenderConfig, surface: S) -> RenderResult<Self> {
        config.validate()?;

        let mesh = mesh.into();
        let radius = mesh.max_radius_xz();
        if config.depth_offset <= radius {
            return Err(RenderError::InsufficientDepthOffset {
                offset: config.depth_offset,
                radius,
            });
        }

        Ok(Self {
            mesh,
            config,
            surface,
            spin: Spin::default(),
            state: DriverState::Idle,
            stop: StopHandle::new(),
            frames: 0,
        })
    }

    /// Start from a given angle instead of zero
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.spin = Spin::new(angle);
        self
    }

    pub fn angle(&self) -> f32 {
        self.spin.angle
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Handle that ends the loop before the next tick
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn frame_delay(&self) -> Duration {
        self.config.frame_delay()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Run one vertex through the pipeline at the current angle
    fn vertex_to_screen(&self, vertex: &Vertex, width: u32, height: u32) -> RenderResult<Point2<f32>> {
        let rotated = rotate_y(vertex, self.spin.angle);
        let shifted = shift_depth(&rotated, self.config.depth_offset);
        let projected = project(&shifted)?;
        Ok(to_screen(&projected, width, height))
    }

    /// Screen-space segments for every edge at the current angle
    pub fn frame_segments(&self) -> RenderResult<Vec<(Point2<f32>, Point2<f32>)>> {
        let (width, height) = self.surface.size();
        let vertices = self.mesh.vertices();

        self.mesh
            .edges()
            .map(|(i1, i2)| -> RenderResult<_> {
                let p1 = self.vertex_to_screen(&vertices[i1], width, height)?;
                let p2 = self.vertex_to_screen(&vertices[i2], width, height)?;
                Ok((p1, p2))
            })
            .collect()
    }

    /// Draw the mesh at the current angle without advancing it
    ///
    /// The whole frame is computed before the surface is touched, so a
    /// fatal error leaves the previous frame on screen. Nothing is drawn
    /// once the driver has stopped or faulted.
    pub fn render_frame(&mut self) -> RenderResult<()> {
        if self.state.is_terminal() || self.stop.is_stopped() {
            return Err(RenderError::NotRunning(self.state));
        }
        let segments = self.frame_segments()?;

        self.surface.clear(self.config.background)?;
        for (from, to) in &segments {
            self.surface
                .draw_line(*from, *to, self.config.foreground, self.config.line_width)?;
        }
        self.surface.present()?;

        debug!(
            frame = self.frames,
            angle = self.spin.angle,
            segments = segments.len(),
            "Rendered frame"
        );
        Ok(())
    }

    /// Advance the angle by one frame interval and render
    pub fn tick(&mut self) -> RenderResult<()> {
        if self.state.is_terminal() {
            return Err(RenderError::NotRunning(self.state));
        }
        if self.stop.is_stopped() {
            self.halt();
            return Err(RenderError::NotRunning(self.state));
        }
        if self.state == DriverState::Idle {
            info!(
                edges = self.mesh.edge_count(),
                target_fps = self.config.target_fps,
                "Starting frame driver"
            );
            self.state = DriverState::Running;
        }

        self.spin
            .advance(self.config.angular_rate, self.config.frame_interval());

        match self.render_frame() {
            Ok(()) => {
                self.frames += 1;
                Ok(())
            }
            Err(err) => Err(self.fault(err)),
        }
    }

    /// Tick until the stop handle fires or a fatal error occurs
    ///
    /// Returns the number of frames rendered.
    pub fn run<T: Scheduler>(&mut self, scheduler: &mut T) -> RenderResult<u64> {
        let delay = self.frame_delay();

        loop {
            if self.stop.is_stopped() {
                self.halt();
                return Ok(self.frames);
            }

            self.tick()?;

            if let Err(err) = scheduler.wait(delay, &self.stop) {
                return Err(self.fault(err));
            }
        }
    }

    fn halt(&mut self) {
        if !self.state.is_terminal() {
            self.state = DriverState::Stopped;
            info!(frames = self.frames, "Frame driver stopped");
        }
    }

    fn fault(&mut self, err: RenderError) -> RenderError {
        self.state = DriverState::Faulted;
        error!(frames = self.frames, error = %err, "Frame driver faulted");
        err
    }
}
