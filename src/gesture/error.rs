//! Gesture recognition error types

use thiserror::Error;

/// Result type for gesture operations
pub type Result<T> = std::result::Result<T, GestureError>;

/// Gesture module error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// The pose estimator delivered fewer landmarks than a full hand
    #[error("Too few landmarks: expected {expected}, got {actual}")]
    TooFewLandmarks {
        /// Number of landmarks a frame requires
        expected: usize,
        /// Number of landmarks actually supplied
        actual: usize,
    },
}
