//! Arclink CLI Binary
//!
//! Thin command-line wrapper around the reconciliation engine. All decision
//! logic lives in `arclink::engine`.

use anyhow::Context;
use arclink::cli::Cli;
use arclink::engine::reconcile;
use arclink::logging::{init_logging, LoggingConfig};
use arclink::report::TracingSink;
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    init_logging(&logging_config).context("Failed to initialize logging")?;

    info!("Arclink starting");

    let sink = TracingSink;
    if let Err(e) = reconcile(&cli.gws_root, &cli.archive_root, &sink) {
        // The sink already carried the report line; the exit status is the
        // only signal left to give.
        error!("Reconciliation aborted: {}", e);
        process::exit(1);
    }

    info!("Reconciliation complete");
    Ok(())
}

/// Build logging configuration from CLI flags.
/// Precedence: explicit flags override --verbose override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}
