//! Synthetic Pointer Input
//!
//! Converts recognized gestures into stroke descriptions and dispatches them
//! through an injection collaborator.
//!
//! # Architecture
//!
//! ```text
//! GestureEvent (normalized x/y)
//!       ↓
//! ┌─────────────────────────┐
//! │  InputSynthesizer       │ ← tap / swipe / pinch planning
//! │  - Viewport denormalize │
//! │  - Stroke validation    │
//! └─────────────────────────┘
//!       ↓
//! ┌─────────────────────────┐
//! │  GestureInjector        │ ← host capability (trait)
//! │  dispatch_path_gesture  │
//! └─────────────────────────┘
//!       ↓
//! Host surface
//! ```
//!
//! # Usage Example
//!
//! ```rust
//! use handgesture_input::gesture::{GestureEvent, GestureKind};
//! use handgesture_input::input::{
//!     InputSynthesizer, RecordingInjector, SynthesizerConfig, Viewport,
//! };
//!
//! let injector = RecordingInjector::new();
//! let synth = InputSynthesizer::new(
//!     injector.clone(),
//!     Viewport::new(1080, 2400)?,
//!     SynthesizerConfig::default(),
//! );
//!
//! synth.handle_event(&GestureEvent::new(GestureKind::Point, 0.5, 0.5))?;
//! assert_eq!(injector.dispatch_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Error Handling
//!
//! A missing or refusing injector surfaces as
//! [`InputError::InjectionUnavailable`]. Nothing is retried: a gesture is
//! tied to the moment it was made.

pub mod coordinates;
pub mod error;
pub mod injector;
pub mod stroke;
pub mod synthesizer;

pub use coordinates::{ScreenPoint, Viewport};
pub use error::{classify_error, ErrorType, InputError, RecoveryAction, Result};
pub use injector::{GestureInjector, JsonLinesInjector, RecordingInjector};
pub use stroke::GestureStroke;
pub use synthesizer::{InputSynthesizer, SynthesizedAction, SynthesizerConfig};
