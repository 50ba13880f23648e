//! # handgesture-input
//!
//! Hand-gesture recognition and synthetic touch input.
//!
//! A pose estimator supplies 21 hand landmarks per camera frame. This crate
//! turns that stream into discrete gestures and replays them on a host
//! surface as taps, swipes and pinches:
//! - [`gesture`] - per-frame geometry and the temporal gesture classifier
//! - [`input`] - stroke planning and dispatch through a [`GestureInjector`]
//! - [`pipeline`] - threaded frame processing with ordered delivery
//! - [`config`] - TOML configuration
//!
//! # Architecture
//!
//! ```text
//! handgesture-input
//!   ├─> GesturePipeline (frame queue, tracking session, stats)
//!   │     ├─> GestureClassifier (TwoFingers / Pinch / Point hold / Swipe)
//!   │     └─> GestureDispatcher (status updates)
//!   └─> InputSynthesizer (tap / swipe / pinch strokes)
//!         └─> GestureInjector (host capability)
//! ```
//!
//! # Data Flow
//!
//! **Gesture Path:** Pose estimator → GesturePipeline → GestureClassifier →
//! GestureDispatcher → InputSynthesizer → GestureInjector → Host surface
//!
//! **Status Path:** GestureDispatcher → PipelineStatus → UI
//!
//! [`GestureInjector`]: input::GestureInjector

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration loading and validation
pub mod config;

/// Landmark geometry and temporal gesture classification
///
/// Single-threaded and synchronous: the classifier owns its state and is
/// fed one frame at a time with the frame's capture timestamp.
pub mod gesture;

/// Gesture-to-stroke synthesis and injection
pub mod input;

/// Threaded frame pipeline
///
/// Owns the classifier on a dedicated thread, applies backpressure to the
/// producer, and hands events to input synthesis in emission order.
pub mod pipeline;

pub use config::Config;
pub use gesture::{GestureClassifier, GestureEvent, GestureKind, Landmark};
pub use input::{GestureInjector, InputSynthesizer};
pub use pipeline::{GesturePipeline, PipelineStatus, TrackingInput};
