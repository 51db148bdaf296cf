//! Container models for the working space and the archive

use super::{find_versions, VersionId};
use crate::error::ReconcileError;
use crate::report::ReportSink;
use std::path::{Path, PathBuf};

/// A working-space container and its discovered versions.
#[derive(Debug, Clone)]
pub struct WorkspaceContainer {
    pub path: PathBuf,
    pub versions: Vec<VersionId>,
}

impl WorkspaceContainer {
    pub fn discover(path: &Path) -> Result<Self, ReconcileError> {
        let versions = find_versions(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            versions,
        })
    }

    /// Absolute path of a version entry inside this container.
    pub fn version_path(&self, version: &VersionId) -> PathBuf {
        self.path.join(version.as_str())
    }

    /// Path of the container's `latest` link (whether or not it exists).
    pub fn latest_link(&self) -> PathBuf {
        self.path.join("latest")
    }

    pub fn newest(&self) -> Option<&VersionId> {
        self.versions.last()
    }
}

/// Why an archive container cannot be reconciled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveIssue {
    /// The container directory itself is absent.
    Missing,
    /// No version subdirectories were found.
    NoVersions,
    /// The `latest` symbolic link is absent.
    NoLatestLink,
    /// The `latest` link does not name the greatest version present.
    StaleLatestLink,
}

/// An archive container with validity computed once at discovery time.
///
/// The archive is authoritative and never written to; `issues` captures
/// everything that would make reconciling against this container unsafe.
#[derive(Debug, Clone)]
pub struct ArchiveContainer {
    pub path: PathBuf,
    pub versions: Vec<VersionId>,
    /// Raw target of the `latest` link, when present.
    pub latest_target: Option<PathBuf>,
    issues: Vec<ArchiveIssue>,
}

impl ArchiveContainer {
    /// Discover an archive container and compute its validity.
    ///
    /// Discovery itself never fails: a missing or malformed container is
    /// recorded as invalid rather than an error, since an unusable archive
    /// only skips its working-space counterpart.
    pub fn discover(path: &Path) -> Self {
        let mut issues = Vec::new();
        let mut versions = Vec::new();

        if !path.is_dir() {
            issues.push(ArchiveIssue::Missing);
        } else {
            // An unreadable container shows up as having no versions
            versions = find_versions(path).unwrap_or_default();
            if versions.is_empty() {
                issues.push(ArchiveIssue::NoVersions);
            }
        }

        let latest_target = std::fs::read_link(path.join("latest")).ok();
        match &latest_target {
            None => issues.push(ArchiveIssue::NoLatestLink),
            Some(target) => {
                let points_at_newest = versions
                    .last()
                    .is_some_and(|newest| target.as_os_str() == newest.as_str());
                if !points_at_newest {
                    issues.push(ArchiveIssue::StaleLatestLink);
                }
            }
        }

        Self {
            path: path.to_path_buf(),
            versions,
            latest_target,
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ArchiveIssue] {
        &self.issues
    }

    /// Emit one report line per validity issue.
    pub fn report_issues(&self, sink: &dyn ReportSink) {
        for issue in &self.issues {
            let message = match issue {
                ArchiveIssue::Missing => format!(
                    "Archive container directory is missing: {}",
                    self.path.display()
                ),
                ArchiveIssue::NoVersions => format!(
                    "No version directories found in container directory: {}",
                    self.path.display()
                ),
                ArchiveIssue::NoLatestLink => format!(
                    "No latest link in container directory: {}",
                    self.path.display()
                ),
                ArchiveIssue::StaleLatestLink => format!(
                    "Latest link is not pointing to most recent version in: {}",
                    self.path.display()
                ),
            };
            sink.error(&message);
        }
    }

    pub fn newest(&self) -> Option<&VersionId> {
        self.versions.last()
    }

    /// Absolute path of a version directory inside this container.
    pub fn version_path(&self, version: &VersionId) -> PathBuf {
        self.path.join(version.as_str())
    }
}
