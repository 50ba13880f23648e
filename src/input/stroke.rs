//! Stroke descriptions
//!
//! A stroke is one finger's path across the surface: an ordered list of
//! points traversed in straight segments, starting `start_offset_ms` after
//! the gesture begins and lasting `duration_ms`. A gesture is a set of
//! strokes performed concurrently.

use serde::{Deserialize, Serialize};

use crate::input::coordinates::ScreenPoint;
use crate::input::error::{InputError, Result};

/// One finger's time-parameterized path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureStroke {
    /// Path vertices; a single point is a stationary touch
    pub points: Vec<ScreenPoint>,
    /// Delay from gesture start (ms)
    pub start_offset_ms: u64,
    /// Time to traverse the path (ms)
    pub duration_ms: u64,
}

impl GestureStroke {
    /// Stationary touch at one point
    pub fn touch(at: ScreenPoint, duration_ms: u64) -> Self {
        Self {
            points: vec![at],
            start_offset_ms: 0,
            duration_ms,
        }
    }

    /// Straight line between two points
    pub fn line(from: ScreenPoint, to: ScreenPoint, duration_ms: u64) -> Self {
        Self {
            points: vec![from, to],
            start_offset_ms: 0,
            duration_ms,
        }
    }

    /// First point of the path
    pub fn start(&self) -> Option<ScreenPoint> {
        self.points.first().copied()
    }

    /// Last point of the path
    pub fn end(&self) -> Option<ScreenPoint> {
        self.points.last().copied()
    }

    /// Check the stroke is something an injector can perform
    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(InputError::InvalidStroke("stroke has no points".into()));
        }
        if self.duration_ms == 0 {
            return Err(InputError::InvalidStroke("stroke has zero duration".into()));
        }
        if let Some(p) = self.points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(InputError::InvalidStroke(format!(
                "non-finite point ({}, {})",
                p.x, p.y
            )));
        }
        Ok(())
    }
}
