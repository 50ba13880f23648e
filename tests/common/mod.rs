//! Hand pose fixtures shared by the integration tests

#![allow(dead_code)]

use handgesture_input::gesture::landmarks::{
    INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP,
};
use handgesture_input::gesture::{Landmark, TimestampMs};
use handgesture_input::pipeline::TrackingInput;

/// Index extended with its tip at (x, y), other fingers curled, thumb away
pub fn pointing(x: f32, y: f32) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(x, y + 0.3, 0.0); LANDMARK_COUNT];
    points[INDEX_MCP] = Landmark::new(x, y + 0.1, 0.0);
    points[INDEX_TIP] = Landmark::new(x, y, 0.0);
    points[THUMB_TIP] = Landmark::new(x - 0.2, y + 0.15, 0.0);
    points[MIDDLE_TIP] = Landmark::new(x + 0.02, y + 0.2, 0.0);
    points[RING_TIP] = Landmark::new(x + 0.04, y + 0.2, 0.0);
    points[PINKY_TIP] = Landmark::new(x + 0.06, y + 0.2, 0.0);
    points
}

/// Thumb and index tips `distance` apart, centered on (0.5, 0.5)
pub fn pinching(distance: f32) -> Vec<Landmark> {
    let mut points = pointing(0.5, 0.5);
    points[THUMB_TIP] = Landmark::new(0.5 - distance / 2.0, 0.5, 0.0);
    points[INDEX_TIP] = Landmark::new(0.5 + distance / 2.0, 0.5, 0.0);
    points
}

/// Index and middle extended
pub fn two_fingers() -> Vec<Landmark> {
    let mut points = pointing(0.5, 0.5);
    points[MIDDLE_TIP] = Landmark::new(0.55, 0.5, 0.0);
    points
}

/// Every finger curled below the knuckle
pub fn fist() -> Vec<Landmark> {
    let mut points = pointing(0.5, 0.5);
    points[INDEX_TIP] = Landmark::new(0.5, 0.7, 0.0);
    points
}

/// Wrap landmarks as a pipeline input
pub fn hand(landmarks: Vec<Landmark>, timestamp_ms: TimestampMs) -> TrackingInput {
    TrackingInput::Hand {
        landmarks,
        timestamp_ms,
    }
}
