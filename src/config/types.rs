//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::input::{InputError, Viewport};

/// Host surface configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Surface width in device pixels
    #[serde(default = "default_viewport_width")]
    pub width: u32,

    /// Surface height in device pixels
    #[serde(default = "default_viewport_height")]
    pub height: u32,
}

fn default_viewport_width() -> u32 {
    1080
}
fn default_viewport_height() -> u32 {
    2340
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

impl ViewportConfig {
    /// Build the runtime viewport
    pub fn to_viewport(&self) -> Result<Viewport, InputError> {
        Viewport::new(self.width, self.height)
    }
}

/// What happens when a frame arrives while the previous one is still queued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backpressure {
    /// Evict the pending frame in favor of the new one (live camera)
    #[default]
    KeepLatest,
    /// Block the producer until the classifier catches up (replay)
    Block,
}

/// Frame pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Backpressure policy for incoming frames
    #[serde(default)]
    pub backpressure: Backpressure,

    /// Start with tracking active instead of paused
    #[serde(default)]
    pub start_tracking: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// File to mirror logs into (None = console only)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: None,
        }
    }
}
