//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments
//!
//! Every section and field has a default, so a partial file only needs the
//! values it overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod types;

pub use types::{Backpressure, LoggingConfig, PipelineConfig, ViewportConfig};

pub use crate::gesture::ClassifierConfig;
pub use crate::input::SynthesizerConfig;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Gesture classifier thresholds
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Input synthesis durations and distances
    #[serde(default)]
    pub synthesizer: SynthesizerConfig,
    /// Host surface dimensions
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Frame pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let c = &self.classifier;
        for (name, value) in [
            ("pinch_threshold", c.pinch_threshold),
            ("point_threshold", c.point_threshold),
            ("swipe_threshold", c.swipe_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("Invalid classifier.{}: {} (must be > 0)", name, value);
            }
        }

        if c.hold_duration_ms == 0 {
            anyhow::bail!("classifier.hold_duration_ms must be > 0");
        }

        let s = &self.synthesizer;
        for (name, value) in [
            ("tap_duration_ms", s.tap_duration_ms),
            ("swipe_duration_ms", s.swipe_duration_ms),
            ("pinch_duration_ms", s.pinch_duration_ms),
        ] {
            if value == 0 {
                anyhow::bail!("synthesizer.{} must be > 0", name);
            }
        }

        if !s.swipe_offset_px.is_finite() || s.swipe_offset_px <= 0.0 {
            anyhow::bail!(
                "Invalid synthesizer.swipe_offset_px: {} (must be > 0)",
                s.swipe_offset_px
            );
        }

        self.viewport
            .to_viewport()
            .context("Invalid viewport configuration")?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(width) = width {
            self.viewport.width = width;
        }
        if let Some(height) = height {
            self.viewport.height = height;
        }

        self
    }
}
