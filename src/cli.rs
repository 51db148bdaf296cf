//! CLI definitions: clap types only, no behavior.

use clap::Parser;
use std::path::PathBuf;

/// Arclink CLI - working-space to archive reconciliation
#[derive(Parser)]
#[command(name = "arclink")]
#[command(about = "Replaces archived working-space dataset versions with symlinks into the archive")]
pub struct Cli {
    /// Working-space hierarchy root (mutable, gets cleaned up)
    pub gws_root: PathBuf,

    /// Archive hierarchy root (authoritative, never written)
    pub archive_root: PathBuf,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}
