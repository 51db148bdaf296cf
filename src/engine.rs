//! Reconciliation engine
//!
//! Walks every container discovered under the working-space root, pairs it
//! with its archive counterpart, and applies the per-version state machine:
//! versions older than the archive's latest are deleted, the version equal
//! to the archive's latest is replaced with a symbolic link once proven
//! byte-identical, and anything newer is left alone and flagged.

use crate::catalog::container::{ArchiveContainer, WorkspaceContainer};
use crate::catalog::{identify_containers, VersionId};
use crate::compare::{EquivalenceChecker, Verdict};
use crate::error::ReconcileError;
use crate::report::ReportSink;
use std::cmp::Ordering;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

/// Reconcile every container under `gws_root` against `archive_root`.
///
/// All outcomes surface through `sink`; the returned error covers only the
/// fatal case of a missing hierarchy root. Per-container problems are
/// reported and skipped, since a large fleet always has a few containers
/// awaiting ingestion or repair.
pub fn reconcile(
    gws_root: &Path,
    archive_root: &Path,
    sink: &dyn ReportSink,
) -> Result<(), ReconcileError> {
    Reconciler::new(gws_root, archive_root, sink)?.run()
}

/// Single-pass reconciler over one pair of hierarchy roots.
pub struct Reconciler<'a> {
    gws_root: PathBuf,
    archive_root: PathBuf,
    sink: &'a dyn ReportSink,
}

impl<'a> Reconciler<'a> {
    /// Validate both roots and resolve them to absolute paths.
    ///
    /// Absolute paths keep created symlinks unambiguous no matter where the
    /// process was started from.
    pub fn new(
        gws_root: &Path,
        archive_root: &Path,
        sink: &'a dyn ReportSink,
    ) -> Result<Self, ReconcileError> {
        for root in [gws_root, archive_root] {
            if !root.is_dir() {
                sink.error(&format!(
                    "Top-level directory does not exist: {}",
                    root.display()
                ));
                return Err(ReconcileError::MissingRoot(root.to_path_buf()));
            }
        }

        Ok(Self {
            gws_root: dunce::canonicalize(gws_root)?,
            archive_root: dunce::canonicalize(archive_root)?,
            sink,
        })
    }

    /// Discover containers and reconcile each one in turn.
    pub fn run(&self) -> Result<(), ReconcileError> {
        let containers = identify_containers(&self.gws_root)?;
        if containers.is_empty() {
            self.sink.error(&format!(
                "No content found in directory: {}",
                self.gws_root.display()
            ));
            return Ok(());
        }

        for container_path in containers {
            if let Err(err) = self.reconcile_container(&container_path) {
                self.sink.error(&format!(
                    "Skipping container {}: {}",
                    container_path.display(),
                    err
                ));
            }
        }

        Ok(())
    }

    fn reconcile_container(&self, path: &Path) -> Result<(), ReconcileError> {
        let gws = WorkspaceContainer::discover(path)?;

        let relative = path.strip_prefix(&self.gws_root).map_err(|_| {
            ReconcileError::InvalidPath(format!(
                "{} is outside the working-space root",
                path.display()
            ))
        })?;
        let archive = ArchiveContainer::discover(&self.archive_root.join(relative));
        archive.report_issues(self.sink);
        // An invalid archive needs ingestion or repair first; leave the
        // working-space container untouched.
        if !archive.is_valid() {
            return Ok(());
        }
        let Some(arc_latest) = archive.newest().cloned() else {
            return Ok(());
        };

        let mut versions = gws.versions.clone();

        // Bootstrap: the archive holds a version the working space has never
        // seen. Link it into place and fold it into this run's version list
        // rather than re-scanning the filesystem.
        if gws.newest().map_or(true, |newest| arc_latest > *newest) {
            self.sink.warn(
                "Most recent archive version directory newer than most recent GWS version directory.",
            );
            let gv_path = gws.version_path(&arc_latest);
            let av_path = archive.version_path(&arc_latest);
            self.symlink_absolute(&av_path, &gv_path)?;
            versions.push(arc_latest.clone());
        }

        // Newest first: the bootstrap link (if any) must be classified in
        // this same pass, before any older version is touched.
        for version in versions.iter().rev() {
            let gv_path = gws.version_path(version);
            let av_path = archive.version_path(version);
            self.sink.debug(&format!(
                "Working on: {} and: {}",
                gv_path.display(),
                av_path.display()
            ));

            let outcome = match version.cmp(&arc_latest) {
                Ordering::Less => self.remove_obsolete(&gv_path),
                Ordering::Equal => self.align_current(&gws, &archive, version, &gv_path, &av_path),
                Ordering::Greater => {
                    self.flag_newer(&gws, &gv_path, &archive.version_path(&arc_latest))
                }
            };
            // A failed version is reported and left as-is; the next
            // invocation observes whatever state remains.
            if let Err(err) = outcome {
                self.sink.error(&format!(
                    "Failed to process {}: {}",
                    gv_path.display(),
                    err
                ));
            }
        }

        Ok(())
    }

    /// Strictly older than the archive's newest: the entry is obsolete.
    fn remove_obsolete(&self, gv_path: &Path) -> Result<(), ReconcileError> {
        if gv_path.is_symlink() {
            fs::remove_file(gv_path)?;
            self.sink.warn(&format!(
                "[ACTION] Deleted symlink to older version: {}",
                gv_path.display()
            ));
        } else {
            self.delete_version_dir(gv_path)?;
            self.sink.warn(&format!(
                "[ACTION] Deleted old version in GWS: {}",
                gv_path.display()
            ));
        }
        Ok(())
    }

    /// Equal to the archive's newest: the entry should become (or already
    /// be) a link into the archive.
    fn align_current(
        &self,
        gws: &WorkspaceContainer,
        archive: &ArchiveContainer,
        version: &VersionId,
        gv_path: &Path,
        av_path: &Path,
    ) -> Result<(), ReconcileError> {
        if gv_path.is_symlink() {
            if self.link_resolves_to(gv_path, av_path) {
                self.sink.info(&format!(
                    "{} correctly points to: {}",
                    gv_path.display(),
                    av_path.display()
                ));
            } else {
                self.sink.warn(&format!(
                    "{} is a link but does not point to: {}",
                    gv_path.display(),
                    av_path.display()
                ));
            }
        } else {
            let checker = EquivalenceChecker::new(self.sink);
            match checker.compare(gv_path, av_path, &self.gws_root, &self.archive_root)? {
                Verdict::Equivalent => {
                    self.sink
                        .info("Found matching directories, so deleting and symlinking.");
                    self.delete_version_dir(gv_path)?;
                    self.symlink_absolute(av_path, gv_path)?;
                    self.sink.warn(&format!(
                        "[ACTION] Deleted {} and symlinked to: {}",
                        gv_path.display(),
                        av_path.display()
                    ));
                }
                // Content differs despite a matching version stamp; each
                // difference was already reported, so the directory is left
                // for manual inspection.
                Verdict::StructureDiffers | Verdict::ContentDiffers { .. } => {}
            }
        }

        self.refresh_latest_link(gws, archive, version, gv_path)
    }

    /// Newer than anything archived: a candidate for ingestion, not ours to
    /// touch.
    fn flag_newer(
        &self,
        gws: &WorkspaceContainer,
        gv_path: &Path,
        archive_latest_path: &Path,
    ) -> Result<(), ReconcileError> {
        self.sink.warn(&format!(
            "GWS version is newer than archive dir: {} newer than {}",
            gv_path.display(),
            archive_latest_path.display()
        ));
        match fs::read_link(gws.latest_link()) {
            Ok(target) => self.sink.warn(&format!(
                "    GWS latest link points to {}",
                target.display()
            )),
            Err(_) => self.sink.warn(&format!(
                "    No latest link exists for {}",
                gv_path.display()
            )),
        }
        Ok(())
    }

    /// Point the container's `latest` link at the version just processed.
    fn refresh_latest_link(
        &self,
        gws: &WorkspaceContainer,
        archive: &ArchiveContainer,
        version: &VersionId,
        gv_path: &Path,
    ) -> Result<(), ReconcileError> {
        if let Some(target) = &archive.latest_target {
            self.sink.warn(&format!(
                "    Archive latest link points to {}",
                target.display()
            ));
        }

        let latest = gws.latest_link();
        match fs::read_link(&latest) {
            Ok(target) => {
                self.sink.warn(&format!(
                    "    GWS latest link points to {}",
                    target.display()
                ));
                fs::remove_file(&latest)?;
            }
            Err(_) => {
                self.sink.warn(&format!(
                    "    No latest link exists for {}",
                    gv_path.display()
                ));
            }
        }

        // Relative link: `latest` names its sibling version directory, so
        // the container can be relocated wholesale without breaking it.
        self.sink
            .warn(&format!("Symlinking latest to: {}", gv_path.display()));
        symlink(Path::new(version.as_str()), &latest)?;
        Ok(())
    }

    /// Remove a version directory and everything in it.
    ///
    /// Version directories are expected to be flat. When one contains a
    /// nested subdirectory nothing is removed and the caller gets an error,
    /// so a surprising layout is surfaced rather than half-deleted.
    fn delete_version_dir(&self, dir: &Path) -> Result<(), ReconcileError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                return Err(ReconcileError::NestedVersionDirectory(entry.path()));
            }
            files.push(entry.path());
        }

        self.sink
            .warn(&format!("Deleting files in: {}", dir.display()));
        for file in files {
            fs::remove_file(&file)?;
        }
        self.sink
            .warn(&format!("Deleting directory: {}", dir.display()));
        fs::remove_dir(dir)?;
        Ok(())
    }

    /// Create an absolute symlink at `link` pointing to `target`.
    fn symlink_absolute(&self, target: &Path, link: &Path) -> Result<(), ReconcileError> {
        self.sink.warn(&format!(
            "Symlinking {} to: {}",
            link.display(),
            target.display()
        ));
        symlink(target, link)?;
        Ok(())
    }

    /// Tightened check for an existing link: the target must resolve to the
    /// archive version directory, not merely be a link.
    fn link_resolves_to(&self, link: &Path, target: &Path) -> bool {
        match (dunce::canonicalize(link), dunce::canonicalize(target)) {
            (Ok(resolved_link), Ok(resolved_target)) => resolved_link == resolved_target,
            _ => false,
        }
    }
}
