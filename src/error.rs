//! Error types for working-space reconciliation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reconciling the working space against the archive.
///
/// Only `MissingRoot` aborts a run; everything else is reported through the
/// sink and skips the container or version it occurred in.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Top-level directory does not exist: {0}")]
    MissingRoot(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Version directory contains nested directories: {0}")]
    NestedVersionDirectory(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for ReconcileError {
    fn from(err: walkdir::Error) -> Self {
        ReconcileError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to walk directory: {}", err),
        ))
    }
}
