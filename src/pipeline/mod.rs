//! Frame Pipeline
//!
//! Runs the gesture classifier off the producer's thread and delivers
//! classified events to input synthesis in order.
//!
//! # Architecture
//!
//! ```text
//! Pose estimator (TrackingInput)
//!       ↓ submit()
//! ┌──────────────────────────┐
//! │  frame channel (cap 1)   │ ← keep-latest or blocking backpressure
//! └──────────────────────────┘
//!       ↓
//! ┌──────────────────────────┐      ┌────────────────┐
//! │  processing thread       │ ←──  │ control channel │ start / stop / shutdown
//! │  GestureClassifier       │      └────────────────┘
//! └──────────────────────────┘
//!       ↓ Notification (ordered)
//! ┌──────────────────────────┐
//! │  delivery thread         │
//! │  GestureDispatcher       │ → InputSynthesizer → GestureInjector
//! └──────────────────────────┘
//!       ↓ PipelineStatus
//! status_receiver()
//! ```
//!
//! The classifier state lives on the processing thread only. Frames and
//! control messages share one sequence counter, so a control call takes
//! effect exactly between the frames submitted before and after it.

pub mod dispatcher;
pub mod stats;

pub use dispatcher::{gesture_label, GestureDispatcher, Notification, PipelineStatus};
pub use stats::{PipelineStats, StatsSnapshot};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender, TryRecvError, TrySendError};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::{Backpressure, Config};
use crate::gesture::{GestureClassifier, Landmark, LandmarkFrame, TimestampMs};
use crate::input::{GestureInjector, InputError, InputSynthesizer};

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The processing thread is gone
    #[error("Pipeline has shut down")]
    Disconnected,

    /// A worker thread could not be started
    #[error("Failed to spawn {0} thread: {1}")]
    ThreadSpawn(&'static str, #[source] std::io::Error),

    /// A worker thread panicked
    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),

    /// Input synthesis could not be set up
    #[error("Input setup failed: {0}")]
    Input(#[from] InputError),
}

/// One result from the pose estimator
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingInput {
    /// A hand was found
    Hand {
        /// Landmarks for the hand, normally 21
        landmarks: Vec<Landmark>,
        /// Capture time of the frame
        timestamp_ms: TimestampMs,
    },
    /// The frame contained no hand
    NoHand {
        /// Capture time of the frame
        timestamp_ms: TimestampMs,
    },
    /// The estimator failed
    Error {
        /// Error description from the estimator
        message: String,
    },
}

/// What happened to a submitted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Queued without displacing anything
    Accepted,
    /// Queued after evicting an older input that was never processed
    ReplacedStale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Start,
    Stop,
    Shutdown,
}

type Sequenced<T> = (u64, T);

/// Handle to a running gesture pipeline
pub struct GesturePipeline {
    sequence: AtomicU64,
    control_tx: Sender<Sequenced<Control>>,
    frame_tx: Sender<Sequenced<TrackingInput>>,
    // Producer-side handle used to evict a stale queued frame
    frame_evict_rx: Receiver<Sequenced<TrackingInput>>,
    status_rx: Receiver<PipelineStatus>,
    stats: Arc<PipelineStats>,
    backpressure: Backpressure,
    processing: Option<JoinHandle<()>>,
    delivery: Option<JoinHandle<()>>,
}

impl GesturePipeline {
    /// Start the processing and delivery threads
    pub fn spawn<I>(config: &Config, injector: I) -> Result<Self, PipelineError>
    where
        I: GestureInjector + 'static,
    {
        let viewport = config.viewport.to_viewport()?;
        let synthesizer = InputSynthesizer::new(injector, viewport, config.synthesizer.clone());
        let stats = Arc::new(PipelineStats::new());

        let (control_tx, control_rx) = unbounded();
        let (frame_tx, frame_rx) = bounded(1);
        let (notify_tx, notify_rx) = unbounded();
        let (status_tx, status_rx) = unbounded();

        let mut dispatcher = GestureDispatcher::new(synthesizer, stats.clone());
        let delivery = std::thread::Builder::new()
            .name("gesture-delivery".into())
            .spawn(move || {
                for notification in notify_rx.iter() {
                    let status = dispatcher.handle(notification);
                    debug!("Status: {}", status.message());
                    // Nobody listening is fine
                    let _ = status_tx.send(status);
                }
                debug!("Delivery thread stopped");
            })
            .map_err(|e| PipelineError::ThreadSpawn("delivery", e))?;

        let processor = FrameProcessor {
            classifier: GestureClassifier::new(config.classifier.clone()),
            tracking: false,
            shutting_down: false,
            pending: VecDeque::new(),
            control_rx,
            frame_rx: frame_rx.clone(),
            notify_tx,
            stats: stats.clone(),
        };
        let processing = std::thread::Builder::new()
            .name("gesture-classifier".into())
            .spawn(move || processor.run())
            .map_err(|e| PipelineError::ThreadSpawn("processing", e))?;

        info!(
            "Gesture pipeline started ({}x{}, {:?} backpressure)",
            viewport.width, viewport.height, config.pipeline.backpressure
        );

        let pipeline = Self {
            sequence: AtomicU64::new(0),
            control_tx,
            frame_tx,
            frame_evict_rx: frame_rx,
            status_rx,
            stats,
            backpressure: config.pipeline.backpressure,
            processing: Some(processing),
            delivery: Some(delivery),
        };

        if config.pipeline.start_tracking {
            pipeline.start_tracking()?;
        }

        Ok(pipeline)
    }

    /// Begin a tracking session
    pub fn start_tracking(&self) -> Result<(), PipelineError> {
        self.control(Control::Start)
    }

    /// End the tracking session and reset classifier state
    pub fn stop_tracking(&self) -> Result<(), PipelineError> {
        self.control(Control::Stop)
    }

    fn control(&self, message: Control) -> Result<(), PipelineError> {
        self.control_tx
            .send((self.next_sequence(), message))
            .map_err(|_| PipelineError::Disconnected)
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    /// Hand one pose-estimator result to the pipeline
    pub fn submit(&self, input: TrackingInput) -> Result<SubmitOutcome, PipelineError> {
        self.stats.record_received();
        let input = (self.next_sequence(), input);

        match self.backpressure {
            Backpressure::Block => {
                self.frame_tx
                    .send(input)
                    .map_err(|_| PipelineError::Disconnected)?;
                Ok(SubmitOutcome::Accepted)
            }
            Backpressure::KeepLatest => match self.frame_tx.try_send(input) {
                Ok(()) => Ok(SubmitOutcome::Accepted),
                Err(TrySendError::Full(input)) => {
                    let replaced = match self.frame_evict_rx.try_recv() {
                        Ok((sequence, _)) => {
                            self.stats.record_dropped();
                            trace!("Dropped stale input #{}", sequence);
                            true
                        }
                        // The processing thread took it first
                        Err(TryRecvError::Empty) => false,
                        Err(TryRecvError::Disconnected) => {
                            return Err(PipelineError::Disconnected)
                        }
                    };
                    self.frame_tx
                        .send(input)
                        .map_err(|_| PipelineError::Disconnected)?;
                    Ok(if replaced {
                        SubmitOutcome::ReplacedStale
                    } else {
                        SubmitOutcome::Accepted
                    })
                }
                Err(TrySendError::Disconnected(_)) => Err(PipelineError::Disconnected),
            },
        }
    }

    /// Receiver for status updates, in the order they were produced
    pub fn status_receiver(&self) -> Receiver<PipelineStatus> {
        self.status_rx.clone()
    }

    /// Current counters
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Process everything already submitted, then stop both threads
    ///
    /// Statuses produced before shutdown stay readable from receivers
    /// obtained through [`status_receiver`](Self::status_receiver).
    pub fn shutdown(mut self) -> Result<StatsSnapshot, PipelineError> {
        self.join()?;
        let snapshot = self.stats.snapshot();
        info!("Gesture pipeline stopped: {:?}", snapshot);
        Ok(snapshot)
    }

    fn join(&mut self) -> Result<(), PipelineError> {
        // Already gone if the processing thread exited on its own
        let _ = self.control(Control::Shutdown);

        if let Some(handle) = self.processing.take() {
            handle
                .join()
                .map_err(|_| PipelineError::ThreadPanicked("processing"))?;
        }
        if let Some(handle) = self.delivery.take() {
            handle
                .join()
                .map_err(|_| PipelineError::ThreadPanicked("delivery"))?;
        }
        Ok(())
    }
}

impl Drop for GesturePipeline {
    fn drop(&mut self) {
        if let Err(e) = self.join() {
            warn!("Gesture pipeline did not stop cleanly: {}", e);
        }
    }
}

struct FrameProcessor {
    classifier: GestureClassifier,
    tracking: bool,
    shutting_down: bool,
    pending: VecDeque<Sequenced<Control>>,
    control_rx: Receiver<Sequenced<Control>>,
    frame_rx: Receiver<Sequenced<TrackingInput>>,
    notify_tx: Sender<Notification>,
    stats: Arc<PipelineStats>,
}

impl FrameProcessor {
    fn run(mut self) {
        debug!("Processing thread started");
        let control_rx = self.control_rx.clone();
        let frame_rx = self.frame_rx.clone();

        while !self.shutting_down {
            select! {
                recv(control_rx) -> message => match message {
                    Ok(control) => self.pending.push_back(control),
                    Err(_) => break,
                },
                recv(frame_rx) -> input => match input {
                    Ok(input) => self.handle_frame(input),
                    Err(_) => break,
                },
            }
            self.catch_up();
        }

        while let Ok((_, input)) = self.frame_rx.try_recv() {
            self.process(input);
        }
        debug!("Processing thread stopped");
    }

    fn catch_up(&mut self) {
        while let Ok(input) = self.frame_rx.try_recv() {
            self.handle_frame(input);
        }
        self.apply_before(u64::MAX);
    }

    fn handle_frame(&mut self, (sequence, input): Sequenced<TrackingInput>) {
        while let Ok(control) = self.control_rx.try_recv() {
            self.pending.push_back(control);
        }
        self.apply_before(sequence);
        self.process(input);
    }

    /// Apply pending controls issued before `sequence`
    fn apply_before(&mut self, sequence: u64) {
        while let Some(&(issued, control)) = self.pending.front() {
            if issued >= sequence {
                break;
            }
            self.pending.pop_front();
            self.apply(control);
        }
    }

    fn apply(&mut self, control: Control) {
        match control {
            Control::Start => {
                if !self.tracking {
                    self.tracking = true;
                    info!("Tracking started");
                    self.notify(Notification::TrackingStarted);
                }
            }
            Control::Stop => {
                if self.tracking {
                    self.tracking = false;
                    self.classifier.reset();
                    info!("Tracking stopped");
                    self.notify(Notification::TrackingStopped);
                }
            }
            Control::Shutdown => self.shutting_down = true,
        }
    }

    fn process(&mut self, input: TrackingInput) {
        if !self.tracking {
            self.stats.record_discarded();
            trace!("Tracking stopped, discarding input");
            return;
        }

        match input {
            TrackingInput::Hand {
                landmarks,
                timestamp_ms,
            } => {
                self.notify(Notification::HandDetected {
                    landmark_count: landmarks.len(),
                });

                match LandmarkFrame::from_slice(&landmarks) {
                    Ok(frame) => {
                        self.stats.record_classified();
                        if let Some(event) = self.classifier.classify_frame(&frame, timestamp_ms) {
                            self.stats.record_gesture();
                            self.notify(Notification::Gesture(event));
                        }
                    }
                    Err(e) => {
                        self.stats.record_ignored();
                        debug!("Ignoring frame at {}ms: {}", timestamp_ms, e);
                    }
                }
            }
            TrackingInput::NoHand { timestamp_ms } => {
                self.stats.record_no_hand();
                trace!("No hand at {}ms", timestamp_ms);
                self.notify(Notification::NoHand);
            }
            TrackingInput::Error { message } => {
                self.stats.record_tracker_error();
                warn!("Pose estimator error: {}", message);
                self.notify(Notification::TrackerError(message));
            }
        }
    }

    fn notify(&self, notification: Notification) {
        // The delivery thread outlives this one
        let _ = self.notify_tx.send(notification);
    }
}
