//! Input Synthesizer
//!
//! Maps gesture events onto stroke descriptions and hands them to the
//! injection collaborator.
//!
//! | Gesture | Synthesized input |
//! |---------|-------------------|
//! | `Point` | tap: one stationary stroke, `tap_duration_ms` |
//! | `SwipeLeft` / `SwipeRight` | swipe: one horizontal stroke of `swipe_offset_px` |
//! | pinch / activation | nothing (informational) |
//!
//! Pinch injection exists as a capability ([`InputSynthesizer::pinch`]) but
//! is not driven by gesture events.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::gesture::{GestureEvent, GestureKind};
use crate::input::coordinates::{ScreenPoint, Viewport};
use crate::input::error::{InputError, Result};
use crate::input::injector::GestureInjector;
use crate::input::stroke::GestureStroke;

/// Durations and distances for synthesized gestures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    /// Tap press duration (ms)
    #[serde(default = "default_tap_duration_ms")]
    pub tap_duration_ms: u64,

    /// Swipe stroke duration (ms)
    #[serde(default = "default_swipe_duration_ms")]
    pub swipe_duration_ms: u64,

    /// Pinch stroke duration (ms)
    #[serde(default = "default_pinch_duration_ms")]
    pub pinch_duration_ms: u64,

    /// Horizontal swipe travel (device pixels)
    #[serde(default = "default_swipe_offset_px")]
    pub swipe_offset_px: f32,
}

fn default_tap_duration_ms() -> u64 {
    100
}
fn default_swipe_duration_ms() -> u64 {
    300
}
fn default_pinch_duration_ms() -> u64 {
    300
}
fn default_swipe_offset_px() -> f32 {
    200.0
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            tap_duration_ms: default_tap_duration_ms(),
            swipe_duration_ms: default_swipe_duration_ms(),
            pinch_duration_ms: default_pinch_duration_ms(),
            swipe_offset_px: default_swipe_offset_px(),
        }
    }
}

/// What was injected for a gesture event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SynthesizedAction {
    /// Tap at a screen point
    Tap {
        /// Tap location
        at: ScreenPoint,
    },
    /// Horizontal swipe
    Swipe {
        /// Start of the swipe
        from: ScreenPoint,
        /// End of the swipe
        to: ScreenPoint,
    },
    /// Two-finger pinch around a center
    Pinch {
        /// Pinch center
        center: ScreenPoint,
        /// Finger separation at start (pixels)
        start_distance: f32,
        /// Finger separation at end (pixels)
        end_distance: f32,
    },
}

/// Turns gesture events into injected strokes
pub struct InputSynthesizer<I: GestureInjector> {
    injector: I,
    viewport: Viewport,
    config: SynthesizerConfig,
}

impl<I: GestureInjector> InputSynthesizer<I> {
    /// Create a synthesizer bound to an injector and a viewport
    pub fn new(injector: I, viewport: Viewport, config: SynthesizerConfig) -> Self {
        Self {
            injector,
            viewport,
            config,
        }
    }

    /// Plan the input for an event without dispatching it.
    ///
    /// Returns `None` for kinds that do not drive input.
    pub fn plan(&self, event: &GestureEvent) -> Option<(SynthesizedAction, Vec<GestureStroke>)> {
        let origin = self.viewport.denormalize(event.x, event.y);

        match event.kind {
            GestureKind::Point => Some((
                SynthesizedAction::Tap { at: origin },
                self.tap_strokes(origin),
            )),
            GestureKind::SwipeLeft | GestureKind::SwipeRight => {
                let offset = if event.kind == GestureKind::SwipeRight {
                    self.config.swipe_offset_px
                } else {
                    -self.config.swipe_offset_px
                };
                let to = origin.offset_x(offset);
                Some((
                    SynthesizedAction::Swipe { from: origin, to },
                    self.swipe_strokes(origin, to, self.config.swipe_duration_ms),
                ))
            }
            GestureKind::PinchIn
            | GestureKind::PinchOut
            | GestureKind::TwoFingers
            | GestureKind::None => None,
        }
    }

    /// Synthesize and inject input for a gesture event.
    ///
    /// `Ok(None)` means the event is informational only.
    pub fn handle_event(&self, event: &GestureEvent) -> Result<Option<SynthesizedAction>> {
        let Some((action, strokes)) = self.plan(event) else {
            return Ok(None);
        };

        self.dispatch(&strokes)?;
        debug!("Injected {:?} for {}", action, event.kind);
        Ok(Some(action))
    }

    /// Tap at a screen point
    pub fn tap(&self, at: ScreenPoint) -> Result<()> {
        self.dispatch(&self.tap_strokes(at))
    }

    /// Straight swipe between two screen points
    pub fn swipe(&self, from: ScreenPoint, to: ScreenPoint, duration_ms: u64) -> Result<()> {
        self.dispatch(&self.swipe_strokes(from, to, duration_ms))
    }

    /// Two-finger pinch moving symmetrically about `center`.
    ///
    /// Fingers start `start_distance` apart and end `end_distance` apart
    /// along the horizontal axis. `end < start` pinches closed (zoom out).
    pub fn pinch(
        &self,
        center: ScreenPoint,
        start_distance: f32,
        end_distance: f32,
    ) -> Result<SynthesizedAction> {
        self.dispatch(&self.pinch_strokes(center, start_distance, end_distance))?;
        Ok(SynthesizedAction::Pinch {
            center,
            start_distance,
            end_distance,
        })
    }

    fn tap_strokes(&self, at: ScreenPoint) -> Vec<GestureStroke> {
        vec![GestureStroke::touch(at, self.config.tap_duration_ms)]
    }

    fn swipe_strokes(&self, from: ScreenPoint, to: ScreenPoint, duration_ms: u64) -> Vec<GestureStroke> {
        vec![GestureStroke::line(from, to, duration_ms)]
    }

    /// Stroke pair for [`pinch`](Self::pinch)
    pub fn pinch_strokes(
        &self,
        center: ScreenPoint,
        start_distance: f32,
        end_distance: f32,
    ) -> Vec<GestureStroke> {
        let start_half = start_distance / 2.0;
        let end_half = end_distance / 2.0;
        let duration = self.config.pinch_duration_ms;

        vec![
            GestureStroke::line(center.offset_x(-start_half), center.offset_x(-end_half), duration),
            GestureStroke::line(center.offset_x(start_half), center.offset_x(end_half), duration),
        ]
    }

    fn dispatch(&self, strokes: &[GestureStroke]) -> Result<()> {
        for stroke in strokes {
            stroke.validate()?;
        }

        if !self.injector.is_available() {
            warn!("Gesture dropped: injection service not enabled");
            return Err(InputError::InjectionUnavailable(
                "injection service not enabled".into(),
            ));
        }

        if !self.injector.dispatch_path_gesture(strokes) {
            warn!("Gesture dropped: injector rejected dispatch");
            return Err(InputError::InjectionUnavailable(
                "injector rejected gesture".into(),
            ));
        }

        Ok(())
    }
}
