//! Recursive file listing with normalized relative paths

use crate::error::ReconcileError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List every regular file under `dir`, relative to `base`, sorted by path.
///
/// Directories are excluded and symlinked files are followed, so a version
/// entry that borrows files from the archive lists the same as one that owns
/// them. Two calls over identical trees yield identical sequences.
///
/// Fails with `NotADirectory` when `dir` is not a directory. Walk errors,
/// including symlink cycles detected while following links, surface as I/O
/// errors.
pub fn nested_list(dir: &Path, base: &Path) -> Result<Vec<PathBuf>, ReconcileError> {
    if !dir.is_dir() {
        return Err(ReconcileError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(base)
            .unwrap_or(entry.path())
            .to_path_buf();
        files.push(relative);
    }

    files.sort();
    Ok(files)
}
