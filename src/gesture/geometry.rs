//! Landmark geometry primitives
//!
//! Stateless single-frame tests. Image coordinates are used throughout:
//! a fingertip is "above" the knuckle when its y is smaller.

use crate::gesture::landmarks::{Landmark, LandmarkFrame};

/// Euclidean distance between two 3D points
pub fn distance3(p: Landmark, q: Landmark) -> f32 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    let dz = p.z - q.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Distance in the image plane, ignoring depth
pub fn planar_distance(p: (f32, f32), q: (f32, f32)) -> f32 {
    distance3(Landmark::from(p), Landmark::from(q))
}

fn above_knuckle(frame: &LandmarkFrame, tip: Landmark) -> bool {
    tip.y < frame.index_mcp().y
}

fn below_knuckle(frame: &LandmarkFrame, tip: Landmark) -> bool {
    tip.y > frame.index_mcp().y
}

/// Index finger extended, middle/ring/pinky curled
pub fn is_pointing(frame: &LandmarkFrame) -> bool {
    above_knuckle(frame, frame.index_tip())
        && below_knuckle(frame, frame.middle_tip())
        && below_knuckle(frame, frame.ring_tip())
        && below_knuckle(frame, frame.pinky_tip())
}

/// Index and middle fingers extended, ring/pinky curled (activation sign)
pub fn is_two_fingers(frame: &LandmarkFrame) -> bool {
    above_knuckle(frame, frame.index_tip())
        && above_knuckle(frame, frame.middle_tip())
        && below_knuckle(frame, frame.ring_tip())
        && below_knuckle(frame, frame.pinky_tip())
}
