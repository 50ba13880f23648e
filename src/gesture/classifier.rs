//! Temporal Gesture Classifier
//!
//! Turns one landmark frame at a time into at most one gesture event.
//! The only memory kept between frames is [`ClassifierState`]: a handful of
//! scalars tracking three independent channels that share the frame's pose
//! classification as a gate.
//!
//! # Decision order
//!
//! ```text
//! frame ──> two fingers? ──yes──> TwoFingers (no state change)
//!              │ no
//!              v
//!           pinching? ──yes──> PinchIn / PinchOut (derivative of distance)
//!              │ no
//!              v
//!           pointing? ──no───> clear point/swipe trackers
//!              │ yes
//!              v
//!           hold channel  ──> Point after hold_duration_ms still
//!           swipe channel ──> SwipeLeft / SwipeRight (overrides Point)
//! ```
//!
//! Pinch direction compares against the immediately preceding frame only,
//! so a single noisy frame can flip PinchIn/PinchOut.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::gesture::geometry::{distance3, is_pointing, is_two_fingers, planar_distance};
use crate::gesture::landmarks::{Landmark, LandmarkFrame};

/// Milliseconds on a caller-supplied monotonic clock
pub type TimestampMs = u64;

/// Classifier thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Thumb-to-index distance below which the hand is pinching
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold: f32,

    /// Fingertip drift below which a pointing finger counts as held still
    #[serde(default = "default_point_threshold")]
    pub point_threshold: f32,

    /// Horizontal fingertip travel that commits a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,

    /// Hold time before a still pointing finger becomes a tap (ms)
    #[serde(default = "default_hold_duration_ms")]
    pub hold_duration_ms: u64,
}

fn default_pinch_threshold() -> f32 {
    0.05
}
fn default_point_threshold() -> f32 {
    0.1
}
fn default_swipe_threshold() -> f32 {
    0.15
}
fn default_hold_duration_ms() -> u64 {
    1000
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: default_pinch_threshold(),
            point_threshold: default_point_threshold(),
            swipe_threshold: default_swipe_threshold(),
            hold_duration_ms: default_hold_duration_ms(),
        }
    }
}

/// Recognized gesture kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// No gesture
    None,
    /// Pointing finger held still (tap)
    Point,
    /// Pointing finger moved left
    SwipeLeft,
    /// Pointing finger moved right
    SwipeRight,
    /// Pinch closing relative to the previous frame
    PinchIn,
    /// Pinch opening, or first pinch frame
    PinchOut,
    /// Index and middle extended (activation sign)
    TwoFingers,
}

impl GestureKind {
    /// Stable identifier for logs and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Point => "point",
            Self::SwipeLeft => "swipe-left",
            Self::SwipeRight => "swipe-right",
            Self::PinchIn => "pinch-in",
            Self::PinchOut => "pinch-out",
            Self::TwoFingers => "two-fingers",
        }
    }

    /// Whether events of this kind carry a meaningful position
    pub fn has_position(&self) -> bool {
        matches!(
            self,
            Self::Point | Self::SwipeLeft | Self::SwipeRight | Self::PinchIn | Self::PinchOut
        )
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed gesture at a normalized position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Gesture kind
    pub kind: GestureKind,
    /// Normalized x (0.0 for kinds without a position)
    pub x: f32,
    /// Normalized y (0.0 for kinds without a position)
    pub y: f32,
}

impl GestureEvent {
    /// Create a new event
    pub const fn new(kind: GestureKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }

    /// The activation sign, which carries the conventional (0, 0)
    pub const fn activation() -> Self {
        Self::new(GestureKind::TwoFingers, 0.0, 0.0)
    }
}

/// Temporal state carried between frames
///
/// Zero is the "unset" sentinel for `point_start_time`, `last_swipe_x` and
/// `last_pinch_distance`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifierState {
    /// Anchor of the current still-point interval
    pub last_point_position: Option<(f32, f32)>,
    /// When the current still-point interval began
    pub point_start_time: TimestampMs,
    /// Swipe baseline x
    pub last_swipe_x: f32,
    /// Thumb-to-index distance seen on the previous frame
    pub last_pinch_distance: f32,
}

impl ClassifierState {
    /// Fresh state with every tracker empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every tracker to its initial condition
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn abandon_pointing(&mut self) {
        self.last_point_position = None;
        self.point_start_time = 0;
        self.last_swipe_x = 0.0;
    }
}

/// Classify one frame against an explicit state.
///
/// This is the whole decision algorithm; [`GestureClassifier`] is a thin
/// owner around it. At most one event is returned per frame.
pub fn classify_with_state(
    state: &mut ClassifierState,
    config: &ClassifierConfig,
    frame: &LandmarkFrame,
    now: TimestampMs,
) -> Option<GestureEvent> {
    // Activation sign wins over everything and leaves trackers untouched
    if is_two_fingers(frame) {
        return Some(GestureEvent::activation());
    }

    let thumb = frame.thumb_tip();
    let index = frame.index_tip();
    let pinch_distance = distance3(thumb, index);

    if pinch_distance < config.pinch_threshold {
        let kind = if state.last_pinch_distance > 0.0 && pinch_distance < state.last_pinch_distance
        {
            GestureKind::PinchIn
        } else {
            GestureKind::PinchOut
        };
        state.last_pinch_distance = pinch_distance;

        let (cx, cy) = midpoint(thumb, index);
        return Some(GestureEvent::new(kind, cx, cy));
    }

    state.last_pinch_distance = pinch_distance;

    if !is_pointing(frame) {
        state.abandon_pointing();
        return None;
    }

    let position = (index.x, index.y);
    let held = track_hold(state, config, position, now);
    let swiped = track_swipe(state, config, position);

    // Swipe is evaluated second and replaces a same-frame Point
    swiped.or(held)
}

fn midpoint(a: Landmark, b: Landmark) -> (f32, f32) {
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

fn track_hold(
    state: &mut ClassifierState,
    config: &ClassifierConfig,
    (x, y): (f32, f32),
    now: TimestampMs,
) -> Option<GestureEvent> {
    let Some(anchor) = state.last_point_position else {
        state.last_point_position = Some((x, y));
        state.point_start_time = now;
        return None;
    };

    if planar_distance((x, y), anchor) < config.point_threshold {
        let hold_time = now.saturating_sub(state.point_start_time);
        if hold_time >= config.hold_duration_ms {
            // Restart the window so a held finger repeats once per duration
            state.point_start_time = now;
            return Some(GestureEvent::new(GestureKind::Point, x, y));
        }
    } else {
        state.last_point_position = Some((x, y));
        state.point_start_time = now;
    }

    None
}

fn track_swipe(
    state: &mut ClassifierState,
    config: &ClassifierConfig,
    (x, y): (f32, f32),
) -> Option<GestureEvent> {
    if state.last_swipe_x <= 0.0 {
        state.last_swipe_x = x;
        return None;
    }

    let delta = x - state.last_swipe_x;
    if delta.abs() <= config.swipe_threshold {
        return None;
    }

    state.last_swipe_x = x;
    let kind = if delta > 0.0 {
        GestureKind::SwipeRight
    } else {
        GestureKind::SwipeLeft
    };
    Some(GestureEvent::new(kind, x, y))
}

/// Stateful gesture classifier for a single tracked hand
///
/// Not `Sync`-shared: a tracking session drives one classifier from one
/// thread, and [`reset`](Self::reset) is called on session boundaries.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
    state: ClassifierState,
}

impl GestureClassifier {
    /// Create a classifier with empty trackers
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            state: ClassifierState::new(),
        }
    }

    /// Classify raw pose-estimator output.
    ///
    /// Fewer than 21 landmarks is treated as "no usable data": returns
    /// `None` without touching the trackers.
    pub fn classify(&mut self, landmarks: &[Landmark], now: TimestampMs) -> Option<GestureEvent> {
        match LandmarkFrame::from_slice(landmarks) {
            Ok(frame) => self.classify_frame(&frame, now),
            Err(e) => {
                trace!("Skipping frame: {}", e);
                None
            }
        }
    }

    /// Classify an already validated frame
    pub fn classify_frame(&mut self, frame: &LandmarkFrame, now: TimestampMs) -> Option<GestureEvent> {
        let event = classify_with_state(&mut self.state, &self.config, frame, now);

        match event {
            Some(e) => debug!(
                "Gesture {} at ({:.3}, {:.3}), t={}ms",
                e.kind, e.x, e.y, now
            ),
            None => trace!("No gesture at t={}ms, state={:?}", now, self.state),
        }

        event
    }

    /// Forget all temporal history (call when tracking pauses)
    pub fn reset(&mut self) {
        debug!("Resetting gesture classifier state");
        self.state.reset();
    }

    /// Current temporal state
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{
        INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP,
    };

    /// Index extended at (x, y), other fingers curled, thumb well away
    fn pointing(x: f32, y: f32) -> Vec<Landmark> {
        let mut points = vec![Landmark::new(x, y + 0.3, 0.0); LANDMARK_COUNT];
        points[INDEX_MCP] = Landmark::new(x, y + 0.1, 0.0);
        points[INDEX_TIP] = Landmark::new(x, y, 0.0);
        points[THUMB_TIP] = Landmark::new(x - 0.2, y + 0.15, 0.0);
        points[MIDDLE_TIP] = Landmark::new(x + 0.02, y + 0.2, 0.0);
        points[RING_TIP] = Landmark::new(x + 0.04, y + 0.2, 0.0);
        points[PINKY_TIP] = Landmark::new(x + 0.06, y + 0.2, 0.0);
        points
    }

    /// Thumb and index tips `distance` apart horizontally around (0.5, 0.5)
    fn pinching(distance: f32) -> Vec<Landmark> {
        let mut points = pointing(0.5, 0.5);
        points[THUMB_TIP] = Landmark::new(0.5 - distance / 2.0, 0.5, 0.0);
        points[INDEX_TIP] = Landmark::new(0.5 + distance / 2.0, 0.5, 0.0);
        points
    }

    /// Index and middle extended
    fn two_fingers() -> Vec<Landmark> {
        let mut points = pointing(0.5, 0.5);
        points[MIDDLE_TIP] = Landmark::new(0.55, 0.5, 0.0);
        points
    }

    /// Every fingertip below the knuckle
    fn fist() -> Vec<Landmark> {
        let mut points = pointing(0.5, 0.5);
        points[INDEX_TIP] = Landmark::new(0.5, 0.7, 0.0);
        points
    }

    fn kinds(events: &[Option<GestureEvent>]) -> Vec<GestureKind> {
        events.iter().flatten().map(|e| e.kind).collect()
    }

    #[test]
    fn test_new_classifier_is_empty() {
        let classifier = GestureClassifier::default();
        assert_eq!(classifier.state(), &ClassifierState::new());
    }

    #[test]
    fn test_short_frame_is_ignored() {
        let mut classifier = GestureClassifier::default();
        classifier.classify(&pointing(0.4, 0.4), 0);
        let before = classifier.state().clone();

        let short = &pointing(0.9, 0.4)[..20];
        assert_eq!(classifier.classify(short, 5000), None);
        assert_eq!(classifier.state(), &before);
    }

    #[test]
    fn test_two_fingers_takes_priority_over_pinch() {
        let mut classifier = GestureClassifier::default();
        let mut frame = two_fingers();
        // Thumb practically touching the index tip
        frame[THUMB_TIP] = Landmark::new(0.51, 0.5, 0.0);

        let event = classifier.classify(&frame, 0).unwrap();
        assert_eq!(event, GestureEvent::activation());
        assert_eq!(classifier.state(), &ClassifierState::new());
    }

    #[test]
    fn test_two_fingers_fires_every_frame() {
        let mut classifier = GestureClassifier::default();
        let events: Vec<_> = (0..3).map(|t| classifier.classify(&two_fingers(), t * 33)).collect();
        assert_eq!(kinds(&events), vec![GestureKind::TwoFingers; 3]);
    }

    #[test]
    fn test_pinch_direction_is_frame_derivative() {
        let mut classifier = GestureClassifier::default();

        let first = classifier.classify(&pinching(0.03), 0).unwrap();
        assert_eq!(first.kind, GestureKind::PinchOut);
        assert!((first.x - 0.5).abs() < 1e-6);
        assert!((first.y - 0.5).abs() < 1e-6);

        let closing = classifier.classify(&pinching(0.02), 33).unwrap();
        assert_eq!(closing.kind, GestureKind::PinchIn);

        let opening = classifier.classify(&pinching(0.04), 66).unwrap();
        assert_eq!(opening.kind, GestureKind::PinchOut);

        // Equal distance is not "closing"
        let steady = classifier.classify(&pinching(0.04), 99).unwrap();
        assert_eq!(steady.kind, GestureKind::PinchOut);
    }

    #[test]
    fn test_non_pinch_frame_records_distance() {
        let mut classifier = GestureClassifier::default();
        classifier.classify(&fist(), 0);
        assert!(classifier.state().last_pinch_distance > 0.05);

        // Distance recorded from an open frame still counts as "previous"
        let event = classifier.classify(&pinching(0.04), 33).unwrap();
        assert_eq!(event.kind, GestureKind::PinchIn);
    }

    #[test]
    fn test_pinch_does_not_touch_point_trackers() {
        let mut classifier = GestureClassifier::default();
        classifier.classify(&pointing(0.5, 0.5), 0);
        let anchored = classifier.state().clone();

        classifier.classify(&pinching(0.03), 100);
        assert_eq!(classifier.state().last_point_position, anchored.last_point_position);
        assert_eq!(classifier.state().point_start_time, anchored.point_start_time);
        assert_eq!(classifier.state().last_swipe_x, anchored.last_swipe_x);
    }

    #[test]
    fn test_hold_to_tap_repeats_once_per_duration() {
        let mut classifier = GestureClassifier::default();
        let mut points = Vec::new();

        for t in (0..=2100).step_by(50) {
            if let Some(event) = classifier.classify(&pointing(0.5, 0.5), t) {
                points.push((t, event));
            }
        }

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].0, 1000);
        assert_eq!(points[1].0, 2000);
        for (_, event) in &points {
            assert_eq!(event.kind, GestureKind::Point);
            assert_eq!((event.x, event.y), (0.5, 0.5));
        }
    }

    #[test]
    fn test_small_drift_keeps_hold_anchor() {
        let mut classifier = GestureClassifier::default();
        classifier.classify(&pointing(0.5, 0.5), 0);
        classifier.classify(&pointing(0.5, 0.55), 500);

        let event = classifier.classify(&pointing(0.5, 0.56), 1000).unwrap();
        assert_eq!(event.kind, GestureKind::Point);
        // Reported at the current fingertip, not the anchor
        assert_eq!((event.x, event.y), (0.5, 0.56));
        assert_eq!(classifier.state().last_point_position, Some((0.5, 0.5)));
    }

    #[test]
    fn test_movement_restarts_hold_window() {
        let mut classifier = GestureClassifier::default();
        classifier.classify(&pointing(0.5, 0.5), 0);

        // Vertical move of 0.15 restarts the timer without swiping
        assert_eq!(classifier.classify(&pointing(0.5, 0.65), 600), None);
        assert_eq!(classifier.state().point_start_time, 600);

        assert_eq!(classifier.classify(&pointing(0.5, 0.65), 1000), None);
        assert_eq!(classifier.classify(&pointing(0.5, 0.65), 1599), None);

        let event = classifier.classify(&pointing(0.5, 0.65), 1600).unwrap();
        assert_eq!(event.kind, GestureKind::Point);
    }

    #[test]
    fn test_leaving_pointing_pose_clears_trackers() {
        let mut classifier = GestureClassifier::default();
        classifier.classify(&pointing(0.5, 0.5), 0);
        classifier.classify(&pointing(0.5, 0.5), 900);

        assert_eq!(classifier.classify(&fist(), 950), None);
        let state = classifier.state();
        assert_eq!(state.last_point_position, None);
        assert_eq!(state.point_start_time, 0);
        assert_eq!(state.last_swipe_x, 0.0);

        // The hold window starts over when pointing resumes
        assert_eq!(classifier.classify(&pointing(0.5, 0.5), 1000), None);
        assert_eq!(classifier.classify(&pointing(0.5, 0.5), 1999), None);
        assert!(classifier.classify(&pointing(0.5, 0.5), 2000).is_some());
    }

    #[test]
    fn test_swipe_right_and_left() {
        let mut classifier = GestureClassifier::default();
        assert_eq!(classifier.classify(&pointing(0.3, 0.5), 0), None);

        let right = classifier.classify(&pointing(0.5, 0.5), 33).unwrap();
        assert_eq!(right, GestureEvent::new(GestureKind::SwipeRight, 0.5, 0.5));
        assert_eq!(classifier.state().last_swipe_x, 0.5);

        let left = classifier.classify(&pointing(0.3, 0.4), 66).unwrap();
        assert_eq!(left, GestureEvent::new(GestureKind::SwipeLeft, 0.3, 0.4));
    }

    #[test]
    fn test_swipe_baseline_moves_only_when_swipe_fires() {
        let mut classifier = GestureClassifier::default();
        classifier.classify(&pointing(0.3, 0.5), 0);
        // 0.1 from the baseline: below threshold, baseline stays at 0.3
        assert_eq!(classifier.classify(&pointing(0.4, 0.5), 33), None);
        assert_eq!(classifier.state().last_swipe_x, 0.3);

        // 0.2 from the baseline fires and becomes the new baseline
        let event = classifier.classify(&pointing(0.5, 0.5), 66).unwrap();
        assert_eq!(event.kind, GestureKind::SwipeRight);
        assert_eq!(classifier.state().last_swipe_x, 0.5);

        // Next swipe is measured from 0.5
        assert_eq!(classifier.classify(&pointing(0.6, 0.5), 99), None);
    }

    #[test]
    fn test_swipe_overrides_same_frame_point() {
        let mut classifier = GestureClassifier::default();
        classifier.classify(&pointing(0.30, 0.5), 0);
        // Anchor moves to 0.42, swipe baseline stays at 0.30
        assert_eq!(classifier.classify(&pointing(0.42, 0.5), 100), None);

        // Held long enough near 0.42 and 0.17 away from the swipe baseline
        let event = classifier.classify(&pointing(0.47, 0.5), 1100).unwrap();
        assert_eq!(event.kind, GestureKind::SwipeRight);
        // The hold window still restarted
        assert_eq!(classifier.state().point_start_time, 1100);
    }

    #[test]
    fn test_reset_matches_fresh_classifier() {
        let mut used = GestureClassifier::default();
        used.classify(&pinching(0.03), 0);
        used.classify(&pointing(0.3, 0.5), 50);
        used.classify(&pointing(0.3, 0.5), 700);
        used.reset();

        let mut fresh = GestureClassifier::default();
        let sequence = [
            (pinching(0.02), 1000),
            (pointing(0.35, 0.5), 1100),
            (pointing(0.35, 0.5), 2100),
            (pointing(0.6, 0.5), 2200),
        ];
        for (frame, t) in &sequence {
            assert_eq!(used.classify(frame, *t), fresh.classify(frame, *t));
        }
        assert_eq!(used.state(), fresh.state());
    }

    #[test]
    fn test_custom_thresholds() {
        let config = ClassifierConfig {
            hold_duration_ms: 200,
            swipe_threshold: 0.3,
            ..Default::default()
        };
        let mut classifier = GestureClassifier::new(config);
        classifier.classify(&pointing(0.3, 0.5), 0);
        assert_eq!(classifier.classify(&pointing(0.5, 0.5), 10), None);
        assert_eq!(classifier.classify(&pointing(0.5, 0.5), 209), None);
        let event = classifier.classify(&pointing(0.5, 0.5), 210).unwrap();
        assert_eq!(event.kind, GestureKind::Point);
    }

    #[test]
    fn test_classify_with_explicit_state() {
        let config = ClassifierConfig::default();
        let mut state = ClassifierState {
            last_pinch_distance: 0.045,
            ..Default::default()
        };
        let frame = LandmarkFrame::from_slice(&pinching(0.03)).unwrap();

        let event = classify_with_state(&mut state, &config, &frame, 0).unwrap();
        assert_eq!(event.kind, GestureKind::PinchIn);
        assert!((state.last_pinch_distance - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_gesture_kind_strings() {
        assert_eq!(GestureKind::SwipeLeft.as_str(), "swipe-left");
        assert_eq!(GestureKind::TwoFingers.to_string(), "two-fingers");
        assert!(GestureKind::PinchIn.has_position());
        assert!(!GestureKind::TwoFingers.has_position());
    }
}
