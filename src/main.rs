//! handgesture-input - Hand Gesture Replay
//!
//! Entry point for the replay binary. Reads tracking records as JSON lines,
//! runs them through the gesture pipeline and writes synthesized strokes.
//! Stdout carries only stroke records; logs and the closing stats snapshot
//! go to stderr.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handgesture_input::config::{Backpressure, Config};
use handgesture_input::gesture::{Landmark, TimestampMs};
use handgesture_input::input::{GestureInjector, JsonLinesInjector, RecordingInjector};
use handgesture_input::pipeline::{GesturePipeline, StatsSnapshot, TrackingInput};

/// Command-line arguments for handgesture-input
#[derive(Parser, Debug)]
#[command(name = "handgesture-input")]
#[command(version, about = "Replay hand landmarks as touch gestures", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "HANDGESTURE_CONFIG", default_value = "handgesture.toml")]
    pub config: String,

    /// Tracking records, one JSON object per line ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Surface width in pixels
    #[arg(long, env = "HANDGESTURE_WIDTH")]
    pub width: Option<u32>,

    /// Surface height in pixels
    #[arg(long, env = "HANDGESTURE_HEIGHT")]
    pub height: Option<u32>,

    /// Record gestures in memory instead of writing strokes to stdout
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// One line of tracking input
#[derive(Debug, Deserialize)]
struct TrackingRecord {
    timestamp_ms: TimestampMs,
    #[serde(default)]
    landmarks: Option<Vec<Landmark>>,
    #[serde(default)]
    error: Option<String>,
}

impl From<TrackingRecord> for TrackingInput {
    fn from(record: TrackingRecord) -> Self {
        match (record.error, record.landmarks) {
            (Some(message), _) => TrackingInput::Error { message },
            (None, Some(landmarks)) => TrackingInput::Hand {
                landmarks,
                timestamp_ms: record.timestamp_ms,
            },
            (None, None) => TrackingInput::NoHand {
                timestamp_ms: record.timestamp_ms,
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging depends on the config level, so load first and report later
    let loaded = Config::load(&args.config);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default_config(),
    };

    let log_file = args
        .log_file
        .clone()
        .or_else(|| config.logging.log_file.clone());
    init_logging(&args, &config.logging.level, log_file.as_deref())?;

    info!("════════════════════════════════════════════════════════");
    info!("  handgesture-input v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {}", env!("BUILD_DATE"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("  Profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });
    info!("════════════════════════════════════════════════════════");

    if let Err(e) = loaded {
        warn!("Failed to load config: {:#}, using defaults", e);
    }

    let mut config = config.with_overrides(args.width, args.height);
    config.validate().context("Invalid configuration")?;

    // Replay must not lose frames, and there is no camera to wait for
    config.pipeline.backpressure = Backpressure::Block;
    config.pipeline.start_tracking = true;

    info!("Configuration loaded successfully");
    tracing::debug!("Config: {:?}", config);

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open tracking input: {}", args.input))?;
        Box::new(BufReader::new(file))
    };

    if args.dry_run {
        let injector = RecordingInjector::new();
        run(&config, reader, injector.clone(), std::io::stderr())?;
        info!("Dry run: {} gestures recorded", injector.dispatch_count());
    } else {
        run(
            &config,
            reader,
            JsonLinesInjector::new(std::io::stdout()),
            std::io::stderr(),
        )?;
    }

    Ok(())
}

fn run<I>(
    config: &Config,
    reader: impl BufRead,
    injector: I,
    stats_out: impl Write,
) -> Result<StatsSnapshot>
where
    I: GestureInjector + 'static,
{
    let pipeline = GesturePipeline::spawn(config, injector)?;
    let statuses = pipeline.status_receiver();

    let replayed = replay(reader, &pipeline)?;
    info!("Replayed {} tracking records", replayed);

    let stats = pipeline.shutdown()?;
    for status in statuses.try_iter() {
        if status.gesture().is_some() {
            info!("{}", status.message());
        } else {
            tracing::debug!("{}", status.message());
        }
    }

    write_stats(stats_out, &stats)?;
    Ok(stats)
}

fn write_stats(mut out: impl Write, stats: &StatsSnapshot) -> Result<()> {
    info!(
        "Processed {} of {} frames, {} gestures",
        stats.frames_processed(),
        stats.frames_received,
        stats.gestures_emitted
    );
    writeln!(out, "{}", serde_json::to_string(stats)?).context("Failed to write stats")?;
    out.flush().context("Failed to write stats")?;
    Ok(())
}

fn replay(reader: impl BufRead, pipeline: &GesturePipeline) -> Result<u64> {
    let mut replayed = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read tracking input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: TrackingRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed record on line {}: {}", index + 1, e);
                continue;
            }
        };

        pipeline.submit(record.into())?;
        replayed += 1;
    }

    Ok(replayed)
}

fn init_logging(args: &Args, configured_level: &str, log_file: Option<&Path>) -> Result<()> {
    let log_level = match args.verbose {
        0 => configured_level,
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "handgesture_input={level},warn",
            level = log_level
        ))
    });

    // Stdout carries strokes, so console logs go to stderr
    if let Some(log_file_path) = log_file {
        let file = File::create(log_file_path)
            .with_context(|| format!("Failed to create log file: {}", log_file_path.display()))?;

        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path.display());
    } else {
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
        }
    }

    Ok(())
}
