//! Pipeline counters
//!
//! Lock-free counters shared between the submitting thread, the processing
//! thread and the delivery thread.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live pipeline counters
#[derive(Debug, Default)]
pub struct PipelineStats {
    frames_received: AtomicU64,
    frames_dropped: AtomicU64,
    frames_discarded: AtomicU64,
    frames_ignored: AtomicU64,
    frames_classified: AtomicU64,
    no_hand_frames: AtomicU64,
    tracker_errors: AtomicU64,
    gestures_emitted: AtomicU64,
    injections_succeeded: AtomicU64,
    injections_failed: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Inputs handed to `submit`
    pub frames_received: u64,
    /// Inputs evicted by keep-latest backpressure
    pub frames_dropped: u64,
    /// Inputs that arrived while tracking was stopped
    pub frames_discarded: u64,
    /// Hand frames with too few landmarks
    pub frames_ignored: u64,
    /// Hand frames run through the classifier
    pub frames_classified: u64,
    /// "No hand" inputs
    pub no_hand_frames: u64,
    /// Errors reported by the pose estimator
    pub tracker_errors: u64,
    /// Gesture events produced by the classifier
    pub gestures_emitted: u64,
    /// Gestures successfully handed to the injector
    pub injections_succeeded: u64,
    /// Gestures the injector could not perform
    pub injections_failed: u64,
}

impl StatsSnapshot {
    /// Inputs that reached the processing thread
    pub fn frames_processed(&self) -> u64 {
        self.frames_discarded
            + self.frames_ignored
            + self.frames_classified
            + self.no_hand_frames
            + self.tracker_errors
    }
}

macro_rules! counter {
    ($record:ident, $field:ident) => {
        pub(crate) fn $record(&self) {
            self.$field.fetch_add(1, Ordering::Relaxed);
        }
    };
}

impl PipelineStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    counter!(record_received, frames_received);
    counter!(record_dropped, frames_dropped);
    counter!(record_discarded, frames_discarded);
    counter!(record_ignored, frames_ignored);
    counter!(record_classified, frames_classified);
    counter!(record_no_hand, no_hand_frames);
    counter!(record_tracker_error, tracker_errors);
    counter!(record_gesture, gestures_emitted);
    counter!(record_injection_ok, injections_succeeded);
    counter!(record_injection_failed, injections_failed);

    /// Read all counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            frames_discarded: self.frames_discarded.load(Ordering::Relaxed),
            frames_ignored: self.frames_ignored.load(Ordering::Relaxed),
            frames_classified: self.frames_classified.load(Ordering::Relaxed),
            no_hand_frames: self.no_hand_frames.load(Ordering::Relaxed),
            tracker_errors: self.tracker_errors.load(Ordering::Relaxed),
            gestures_emitted: self.gestures_emitted.load(Ordering::Relaxed),
            injections_succeeded: self.injections_succeeded.load(Ordering::Relaxed),
            injections_failed: self.injections_failed.load(Ordering::Relaxed),
        }
    }
}
