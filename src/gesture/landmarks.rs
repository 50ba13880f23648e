//! Hand Landmark Frames
//!
//! A frame is one complete set of 21 hand keypoints produced by the pose
//! estimator for a single image. Indices follow the standard hand topology
//! (wrist = 0, fingertips at 4/8/12/16/20).

use serde::{Deserialize, Serialize};

use crate::gesture::error::{GestureError, Result};

/// Number of landmarks in a complete hand frame
pub const LANDMARK_COUNT: usize = 21;

/// Thumb tip
pub const THUMB_TIP: usize = 4;
/// Index finger base knuckle (MCP joint)
pub const INDEX_MCP: usize = 5;
/// Index fingertip
pub const INDEX_TIP: usize = 8;
/// Middle fingertip
pub const MIDDLE_TIP: usize = 12;
/// Ring fingertip
pub const RING_TIP: usize = 16;
/// Pinky fingertip
pub const PINKY_TIP: usize = 20;

/// A single normalized 3D keypoint
///
/// x/y are image-normalized (typically 0.0-1.0, smaller y = higher in the
/// image). z is depth relative to the wrist.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position (normalized)
    pub x: f32,
    /// Vertical position (normalized, grows downward)
    pub y: f32,
    /// Depth relative to the wrist
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    /// Create a new landmark
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<(f32, f32)> for Landmark {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// A validated frame of exactly [`LANDMARK_COUNT`] landmarks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkFrame {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkFrame {
    /// Build a frame from pose-estimator output.
    ///
    /// Extra trailing points are ignored; fewer than [`LANDMARK_COUNT`]
    /// points is an error.
    pub fn from_slice(landmarks: &[Landmark]) -> Result<Self> {
        if landmarks.len() < LANDMARK_COUNT {
            return Err(GestureError::TooFewLandmarks {
                expected: LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }

        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points.copy_from_slice(&landmarks[..LANDMARK_COUNT]);
        Ok(Self { points })
    }

    /// Build a frame from a fixed-size array
    pub const fn from_array(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Thumb tip landmark
    pub fn thumb_tip(&self) -> Landmark {
        self.points[THUMB_TIP]
    }

    /// Index base knuckle landmark
    pub fn index_mcp(&self) -> Landmark {
        self.points[INDEX_MCP]
    }

    /// Index fingertip landmark
    pub fn index_tip(&self) -> Landmark {
        self.points[INDEX_TIP]
    }

    /// Middle fingertip landmark
    pub fn middle_tip(&self) -> Landmark {
        self.points[MIDDLE_TIP]
    }

    /// Ring fingertip landmark
    pub fn ring_tip(&self) -> Landmark {
        self.points[RING_TIP]
    }

    /// Pinky fingertip landmark
    pub fn pinky_tip(&self) -> Landmark {
        self.points[PINKY_TIP]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_requires_full_hand() {
        let short = vec![Landmark::default(); 20];
        let err = LandmarkFrame::from_slice(&short).unwrap_err();
        assert_eq!(
            err,
            GestureError::TooFewLandmarks {
                expected: 21,
                actual: 20
            }
        );
    }

    #[test]
    fn test_frame_truncates_extra_points() {
        let mut points: Vec<Landmark> = (0..25).map(|i| Landmark::new(i as f32, 0.0, 0.0)).collect();
        points[INDEX_TIP] = Landmark::new(0.42, 0.1, 0.0);

        let frame = LandmarkFrame::from_slice(&points).unwrap();
        assert_eq!(frame.index_tip(), Landmark::new(0.42, 0.1, 0.0));
        assert_eq!(frame.pinky_tip().x, 20.0);
    }

    #[test]
    fn test_landmark_deserializes_without_depth() {
        let landmark: Landmark = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
        assert_eq!(landmark, Landmark::new(0.25, 0.75, 0.0));
    }
}
