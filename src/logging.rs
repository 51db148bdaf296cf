//! Logging System
//!
//! Structured logging via the `tracing` crate. The engine itself reports
//! through a `ReportSink`; this module only wires the CLI's `TracingSink`
//! output to a subscriber.

use crate::error::ReconcileError;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration assembled from CLI flags and the environment.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,

    /// Output format: json, text (default: text)
    pub format: String,

    /// Enable colored output (text format only)
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            color: true,
        }
    }
}

/// Initialize the logging system.
///
/// The `ARCLINK_LOG` environment variable overrides the configured level and
/// accepts full `tracing` filter directives.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ReconcileError> {
    let filter = build_env_filter(config)?;

    if config.format != "json" && config.format != "text" {
        return Err(ReconcileError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            config.format
        )));
    }

    let base_subscriber = Registry::default().with(filter);

    if config.format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stdout),
            )
            .init();
    }

    Ok(())
}

/// Build the filter from `ARCLINK_LOG` or the configured level.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ReconcileError> {
    if let Ok(filter) = EnvFilter::try_from_env("ARCLINK_LOG") {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| ReconcileError::ConfigError(format!("Invalid log level: {}", e)))
}
