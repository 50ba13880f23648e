//! Hand Gesture Recognition
//!
//! Classifies a stream of single-hand landmark frames into discrete gestures.
//!
//! # Gestures
//!
//! | Gesture | Pose | Trigger |
//! |---------|------|---------|
//! | `TwoFingers` | index + middle extended | every qualifying frame |
//! | `PinchIn` / `PinchOut` | thumb tip near index tip | every pinching frame, direction from previous distance |
//! | `Point` | index extended, held still | once per hold duration |
//! | `SwipeLeft` / `SwipeRight` | index extended, moved horizontally | when travel from baseline exceeds threshold |
//!
//! # Usage
//!
//! ```rust
//! use handgesture_input::gesture::{GestureClassifier, GestureKind, Landmark};
//!
//! let mut classifier = GestureClassifier::default();
//! let landmarks = vec![Landmark::default(); 21];
//!
//! // Timestamps come from the caller's monotonic clock
//! if let Some(event) = classifier.classify(&landmarks, 0) {
//!     println!("{} at ({}, {})", event.kind, event.x, event.y);
//! }
//!
//! // Session boundary (tracking paused)
//! classifier.reset();
//! ```

pub mod classifier;
pub mod error;
pub mod geometry;
pub mod landmarks;

pub use classifier::{
    classify_with_state, ClassifierConfig, ClassifierState, GestureClassifier, GestureEvent,
    GestureKind, TimestampMs,
};
pub use error::{GestureError, Result};
pub use geometry::{distance3, is_pointing, is_two_fingers, planar_distance};
pub use landmarks::{Landmark, LandmarkFrame, LANDMARK_COUNT};
