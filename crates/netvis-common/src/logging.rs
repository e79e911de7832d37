//! Structured logging infrastructure for netvis

use crate::{Result, VisError};
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "netvis_graphs=trace")
    pub level: String,
    /// Event format
    pub format: LogFormat,
    /// Optional file path for log output; stderr otherwise
    pub file_path: Option<String>,
    /// Whether to include spans in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to use ANSI colours (ignored for file output)
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file_path: None,
            include_spans: false,
            include_targets: true,
            ansi: true,
        }
    }
}

/// Parse a filter directive string exactly as the subscriber will
pub fn parse_env_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| VisError::config_with_source("Invalid log filter", e))
}

/// Build the env filter, falling back to `info` when the level is unparsable
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    parse_env_filter(level).or_else(|_| parse_env_filter("info"))
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Events are written to stderr unless `file_path` is set, so stdout stays
/// free for machine readable output.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(&config.level)?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let (writer, ansi) = match &config.file_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| VisError::input(path, e))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), config.ansi),
    };

    let (pretty, compact, json) = match config.format {
        LogFormat::Pretty => (
            Some(
                fmt::layer()
                    .pretty()
                    .with_span_events(span_events)
                    .with_ansi(ansi)
                    .with_target(config.include_targets)
                    .with_writer(writer),
            ),
            None,
            None,
        ),
        LogFormat::Compact => (
            None,
            Some(
                fmt::layer()
                    .compact()
                    .with_span_events(span_events)
                    .with_ansi(ansi)
                    .with_target(config.include_targets)
                    .with_writer(writer),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(writer),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(compact)
        .with(json)
        .try_init()
        .map_err(|e| VisError::config_with_source("Failed to install log subscriber", e))
}
