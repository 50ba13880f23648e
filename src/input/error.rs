//! Input Synthesis Error Types
//!
//! Errors raised while turning gestures into injected strokes. None of them
//! are fatal: the frame loop keeps running and the next gesture is tried
//! independently.

use thiserror::Error;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input module error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// The injection collaborator is missing or refused the gesture
    #[error("Input injection unavailable: {0}")]
    InjectionUnavailable(String),

    /// Viewport has a zero dimension
    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport {
        /// Viewport width in device pixels
        width: u32,
        /// Viewport height in device pixels
        height: u32,
    },

    /// A stroke that no injector could perform
    #[error("Invalid stroke: {0}")]
    InvalidStroke(String),
}

/// Error classification for recovery strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Injection collaborator errors
    Injection,
    /// Viewport / configuration errors
    Configuration,
    /// Malformed gesture description
    Stroke,
}

/// Classify error for recovery strategy selection
pub fn classify_error(error: &InputError) -> ErrorType {
    match error {
        InputError::InjectionUnavailable(_) => ErrorType::Injection,
        InputError::InvalidViewport { .. } => ErrorType::Configuration,
        InputError::InvalidStroke(_) => ErrorType::Stroke,
    }
}

/// Recovery action to take after error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Drop this gesture and continue with the next frame
    Skip,
    /// Report to the user that injection must be enabled
    NotifyUser,
    /// Fail and propagate error
    Fail,
}

impl InputError {
    /// Whether the frame loop can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, InputError::InvalidViewport { .. })
    }

    /// Recovery strategy for this error.
    ///
    /// Gestures are transient, so nothing here is ever retried: a stale
    /// coordinate replayed later would land on the wrong UI.
    pub fn recovery_action(&self) -> RecoveryAction {
        match classify_error(self) {
            ErrorType::Injection => RecoveryAction::NotifyUser,
            ErrorType::Stroke => RecoveryAction::Skip,
            ErrorType::Configuration => RecoveryAction::Fail,
        }
    }
}
