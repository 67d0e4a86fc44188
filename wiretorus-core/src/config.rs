//! Render settings shared by every front end.
//!
//! The animation has a single mode of operation; these are the constants it
//! runs with, gathered in one place so front ends and tests can override them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::transform::DEFAULT_DEPTH_OFFSET;

/// Default background fill
pub const DEFAULT_BACKGROUND: Rgb = Rgb::from_hex(0x18_18_18);

/// Default stroke color for edges
pub const DEFAULT_FOREGROUND: Rgb = Rgb::from_hex(0xe1_e1_e1);

/// Default ticks per second
pub const DEFAULT_TARGET_FPS: f32 = 60.0;

/// Default rotation speed in radians per second
pub const DEFAULT_ANGULAR_RATE: f32 = std::f32::consts::FRAC_PI_2;

/// Default stroke thickness in pixels
pub const DEFAULT_LINE_WIDTH: f32 = 3.0;

/// A 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// CSS color string, e.g. `#181818`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Render configuration for the frame driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Fill color used to clear the surface each frame
    pub background: Rgb,
    /// Stroke color for mesh edges
    pub foreground: Rgb,
    /// Ticks per second
    pub target_fps: f32,
    /// Radians of rotation per second
    pub angular_rate: f32,
    /// Stroke thickness in pixels
    pub line_width: f32,
    /// Translation along +z applied after rotation
    pub depth_offset: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            foreground: DEFAULT_FOREGROUND,
            target_fps: DEFAULT_TARGET_FPS,
            angular_rate: DEFAULT_ANGULAR_RATE,
            line_width: DEFAULT_LINE_WIDTH,
            depth_offset: DEFAULT_DEPTH_OFFSET,
        }
    }
}

impl RenderConfig {
    /// Seconds between ticks (the Δt applied to the angle)
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.target_fps
    }

    /// Delay before the next tick is scheduled
    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs_f32(self.frame_interval())
    }

    pub fn validate(&self) -> RenderResult<()> {
        if !self.target_fps.is_finite() || self.target_fps <= 0.0 {
            return Err(RenderError::invalid_config(format!(
                "target_fps must be positive, got {}",
                self.target_fps
            )));
        }
        if Duration::try_from_secs_f32(self.frame_interval()).is_err() {
            return Err(RenderError::invalid_config(format!(
                "target_fps {} gives an unrepresentable frame interval",
                self.target_fps
            )));
        }
        if !self.angular_rate.is_finite() {
            return Err(RenderError::invalid_config(format!(
                "angular_rate must be finite, got {}",
                self.angular_rate
            )));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(RenderError::invalid_config(format!(
                "line_width must be positive, got {}",
                self.line_width
            )));
        }
        if !self.depth_offset.is_finite() {
            return Err(RenderError::invalid_config(format!(
                "depth_offset must be finite, got {}",
                self.depth_offset
            )));
        }
        Ok(())
    }
}
