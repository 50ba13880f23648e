//! Injection collaborators
//!
//! The injector is the only component that touches the host surface. It is
//! handed to [`InputSynthesizer`](crate::input::InputSynthesizer) explicitly;
//! there is no globally reachable "current service".

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::input::stroke::GestureStroke;

/// Performs synthesized gestures on the host surface
#[cfg_attr(test, mockall::automock)]
pub trait GestureInjector: Send {
    /// Dispatch a gesture made of concurrent strokes.
    ///
    /// Returns `false` when injection is currently unavailable (e.g. the
    /// privileged capability is not granted).
    fn dispatch_path_gesture(&self, strokes: &[GestureStroke]) -> bool;

    /// Whether the injection capability is currently granted
    fn is_available(&self) -> bool {
        true
    }
}

impl<T: GestureInjector + Sync + ?Sized> GestureInjector for Arc<T> {
    fn dispatch_path_gesture(&self, strokes: &[GestureStroke]) -> bool {
        (**self).dispatch_path_gesture(strokes)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

#[derive(Debug, Default)]
struct RecordingInner {
    dispatched: Vec<Vec<GestureStroke>>,
    unavailable: bool,
}

/// In-memory injector that records every dispatched gesture
///
/// Clones share the same record, so one clone can be handed to the
/// synthesizer while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct RecordingInjector {
    inner: Arc<Mutex<RecordingInner>>,
}

impl RecordingInjector {
    /// Create an available injector with an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the capability being granted or revoked
    pub fn set_available(&self, available: bool) {
        self.inner.lock().unavailable = !available;
    }

    /// Gestures dispatched so far
    pub fn dispatched(&self) -> Vec<Vec<GestureStroke>> {
        self.inner.lock().dispatched.clone()
    }

    /// Number of gestures dispatched so far
    pub fn dispatch_count(&self) -> usize {
        self.inner.lock().dispatched.len()
    }
}

impl GestureInjector for RecordingInjector {
    fn dispatch_path_gesture(&self, strokes: &[GestureStroke]) -> bool {
        let mut inner = self.inner.lock();
        if inner.unavailable {
            return false;
        }
        inner.dispatched.push(strokes.to_vec());
        true
    }

    fn is_available(&self) -> bool {
        !self.inner.lock().unavailable
    }
}

#[derive(Serialize)]
struct DispatchRecord<'a> {
    sequence: u64,
    strokes: &'a [GestureStroke],
}

/// Writes each dispatched gesture as one JSON line
///
/// Used to hand gestures to an out-of-process injector over a pipe.
pub struct JsonLinesInjector<W: Write + Send> {
    writer: Mutex<(W, u64)>,
}

impl<W: Write + Send> JsonLinesInjector<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new((writer, 0)),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner().0
    }
}

impl<W: Write + Send> GestureInjector for JsonLinesInjector<W> {
    fn dispatch_path_gesture(&self, strokes: &[GestureStroke]) -> bool {
        let mut guard = self.writer.lock();
        let (writer, sequence) = &mut *guard;

        let record = DispatchRecord {
            sequence: *sequence,
            strokes,
        };
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize gesture: {}", e);
                return false;
            }
        };

        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Injection pipe write failed: {}", e);
            return false;
        }

        debug!("Wrote gesture #{} ({} strokes)", sequence, strokes.len());
        *sequence += 1;
        true
    }
}
