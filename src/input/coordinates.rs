//! Coordinate Transformation
//!
//! Maps normalized landmark space onto the host surface. x and y scale
//! independently by viewport width and height; results are not clamped, so
//! a fingertip slightly outside the camera frame maps slightly off-screen.

use serde::{Deserialize, Serialize};

use crate::input::error::{InputError, Result};

/// A point on the host surface in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// X coordinate (pixels)
    pub x: f32,
    /// Y coordinate (pixels)
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same point shifted horizontally
    pub fn offset_x(self, dx: f32) -> Self {
        Self::new(self.x + dx, self.y)
    }
}

/// Host surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in device pixels
    pub width: u32,
    /// Height in device pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport, rejecting zero dimensions
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(InputError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Convert normalized coordinates to screen pixels
    pub fn denormalize(&self, x: f32, y: f32) -> ScreenPoint {
        ScreenPoint::new(x * self.width as f32, y * self.height as f32)
    }

}
