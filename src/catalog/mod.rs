//! Container and version discovery
//!
//! Dataset containers are directories holding dated `vYYYYMMDD` version
//! subdirectories. Discovery is fresh on every invocation; the filesystem is
//! the only state.

pub mod container;

use crate::error::ReconcileError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Version directory names: `v` followed by an eight-digit date stamp.
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^v\d{8}$").expect("version pattern is valid"));

/// Identifier of a dated dataset version (`vYYYYMMDD`).
///
/// Lexicographic order equals chronological order for the fixed-width date
/// stamp, so deriving `Ord` on the raw name is sufficient for version
/// ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionId(String);

impl VersionId {
    /// Parse a directory name as a version identifier.
    ///
    /// Returns `None` unless the whole name matches the version pattern.
    pub fn parse(name: &str) -> Option<Self> {
        VERSION_PATTERN
            .is_match(name)
            .then(|| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<Path> for VersionId {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Find dataset containers under `root`.
///
/// A directory qualifies when any of its immediate children is named like a
/// version directory. Symlinked children count: a fully reconciled container
/// holds only links back into the archive and must still be found on the
/// next run. Results are sorted by path so repeated runs visit containers in
/// the same order.
pub fn identify_containers(root: &Path) -> Result<Vec<PathBuf>, ReconcileError> {
    let mut containers = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if has_version_child(entry.path())? {
            containers.push(entry.path().to_path_buf());
        }
    }

    containers.sort();
    Ok(containers)
}

fn has_version_child(dir: &Path) -> Result<bool, ReconcileError> {
    for child in std::fs::read_dir(dir)? {
        let child = child?;
        let name = child.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if VERSION_PATTERN.is_match(name) {
            let file_type = child.file_type()?;
            if file_type.is_dir() || file_type.is_symlink() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// List version entries directly inside `container`, sorted ascending.
///
/// Both real directories and symbolic links count as version entries.
pub fn find_versions(container: &Path) -> Result<Vec<VersionId>, ReconcileError> {
    let mut versions = Vec::new();

    for child in std::fs::read_dir(container)? {
        let child = child?;
        let name = child.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(version) = VersionId::parse(name) {
            let file_type = child.file_type()?;
            if file_type.is_dir() || file_type.is_symlink() {
                versions.push(version);
            }
        }
    }

    versions.sort();
    Ok(versions)
}
