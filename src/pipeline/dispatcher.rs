//! Delivery path
//!
//! Everything the processing thread reports travels here in order, as a
//! [`Notification`]. The dispatcher drives input synthesis for gestures and
//! turns each notification into a [`PipelineStatus`] for the UI.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::gesture::{GestureEvent, GestureKind};
use crate::input::{
    GestureInjector, InputError, InputSynthesizer, RecoveryAction, SynthesizedAction,
};
use crate::pipeline::stats::PipelineStats;

/// Message from the processing thread to the delivery path
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A tracking session began
    TrackingStarted,
    /// The tracking session ended and the classifier was reset
    TrackingStopped,
    /// A hand was present in the frame
    HandDetected {
        /// Landmarks delivered by the pose estimator
        landmark_count: usize,
    },
    /// No hand in the frame
    NoHand,
    /// The classifier committed a gesture
    Gesture(GestureEvent),
    /// The pose estimator reported an error
    TrackerError(String),
}

/// User-facing status update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Tracking session began
    TrackingStarted,
    /// Tracking session ended
    TrackingStopped,
    /// A hand is visible
    HandDetected {
        /// Landmarks delivered by the pose estimator
        landmark_count: usize,
    },
    /// No hand visible
    NoHand,
    /// A gesture was recognized
    Gesture {
        /// The recognized gesture
        event: GestureEvent,
        /// Input injected for it, if any
        action: Option<SynthesizedAction>,
    },
    /// A gesture was recognized but could not be injected
    InjectionFailed {
        /// The recognized gesture
        event: GestureEvent,
        /// Why injection failed
        error: String,
    },
    /// The pose estimator reported an error
    TrackerError {
        /// Error message
        message: String,
    },
}

/// Short on-screen label for a gesture
pub fn gesture_label(kind: GestureKind) -> &'static str {
    match kind {
        GestureKind::Point => "TAP detected!",
        GestureKind::SwipeLeft => "SWIPE LEFT",
        GestureKind::SwipeRight => "SWIPE RIGHT",
        GestureKind::PinchIn => "PINCH IN (Zoom out)",
        GestureKind::PinchOut => "PINCH OUT (Zoom in)",
        GestureKind::TwoFingers => "TWO FINGERS (Activation)",
        GestureKind::None => "No gesture",
    }
}

impl PipelineStatus {
    /// Status line for display
    pub fn message(&self) -> String {
        match self {
            Self::TrackingStarted => "Tracking active - Show your hand".to_string(),
            Self::TrackingStopped => "Tracking stopped".to_string(),
            Self::HandDetected { landmark_count } => {
                format!("Hand detected - {} landmarks", landmark_count)
            }
            Self::NoHand => "No hand detected".to_string(),
            Self::Gesture { event, .. } => gesture_label(event.kind).to_string(),
            Self::InjectionFailed { event, error } => {
                format!("{} - {}", gesture_label(event.kind), error)
            }
            Self::TrackerError { message } => format!("Error: {}", message),
        }
    }

    /// The gesture carried by this status, if any
    pub fn gesture(&self) -> Option<&GestureEvent> {
        match self {
            Self::Gesture { event, .. } | Self::InjectionFailed { event, .. } => Some(event),
            _ => None,
        }
    }
}

/// Consumer of classified events
pub struct GestureDispatcher<I: GestureInjector> {
    synthesizer: InputSynthesizer<I>,
    stats: Arc<PipelineStats>,
}

impl<I: GestureInjector> GestureDispatcher<I> {
    /// Create a dispatcher around a synthesizer
    pub fn new(synthesizer: InputSynthesizer<I>, stats: Arc<PipelineStats>) -> Self {
        Self { synthesizer, stats }
    }

    /// Handle one notification, injecting input for gestures
    pub fn handle(&mut self, notification: Notification) -> PipelineStatus {
        match notification {
            Notification::TrackingStarted => PipelineStatus::TrackingStarted,
            Notification::TrackingStopped => PipelineStatus::TrackingStopped,
            Notification::HandDetected { landmark_count } => {
                PipelineStatus::HandDetected { landmark_count }
            }
            Notification::NoHand => PipelineStatus::NoHand,
            Notification::TrackerError(message) => PipelineStatus::TrackerError { message },
            Notification::Gesture(event) => self.handle_gesture(event),
        }
    }

    fn handle_gesture(&mut self, event: GestureEvent) -> PipelineStatus {
        match self.synthesizer.handle_event(&event) {
            Ok(action) => {
                if action.is_some() {
                    self.stats.record_injection_ok();
                }
                debug!("{} -> {:?}", event.kind, action);
                PipelineStatus::Gesture { event, action }
            }
            Err(e) => {
                self.stats.record_injection_failed();
                if e.is_recoverable() {
                    warn!("Could not inject {}: {}", event.kind, e);
                } else {
                    error!("Could not inject {}: {}", event.kind, e);
                }
                PipelineStatus::InjectionFailed {
                    event,
                    error: describe_injection_error(&e),
                }
            }
        }
    }
}

fn describe_injection_error(error: &InputError) -> String {
    match error.recovery_action() {
        RecoveryAction::NotifyUser => "Accessibility service not enabled".to_string(),
        RecoveryAction::Skip | RecoveryAction::Fail => error.to_string(),
    }
}
