//! Directory equivalence checking
//!
//! Two directories are equivalent when they contain the same relative file
//! paths and every shared file matches in size and content digest.

pub mod hasher;
pub mod lister;

use crate::error::ReconcileError;
use crate::report::ReportSink;
use std::path::Path;

/// Outcome of comparing two directory trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Identical relative listings, sizes, and digests.
    Equivalent,
    /// The relative file listings differ; no per-file checks were run.
    StructureDiffers,
    /// Listings matched but this many files differed in size or digest.
    ContentDiffers { files: usize },
}

impl Verdict {
    pub fn is_equivalent(self) -> bool {
        matches!(self, Verdict::Equivalent)
    }
}

/// Compares directory trees file by file, reporting each difference.
pub struct EquivalenceChecker<'a> {
    sink: &'a dyn ReportSink,
}

impl<'a> EquivalenceChecker<'a> {
    pub fn new(sink: &'a dyn ReportSink) -> Self {
        Self { sink }
    }

    /// Decide whether `left` and `right` are content-equivalent.
    ///
    /// Listings are compared relative to `left_base` and `right_base` so the
    /// two hierarchies line up. A listing difference stops the check
    /// immediately; size and digest mismatches are accumulated across all
    /// files so a single run reports every differing file.
    pub fn compare(
        &self,
        left: &Path,
        right: &Path,
        left_base: &Path,
        right_base: &Path,
    ) -> Result<Verdict, ReconcileError> {
        let left_files = lister::nested_list(left, left_base)?;
        let right_files = lister::nested_list(right, right_base)?;

        if left_files != right_files {
            self.sink.error(&format!(
                "Dirs have different listed contents: {} vs {}",
                left.display(),
                right.display()
            ));
            return Ok(Verdict::StructureDiffers);
        }

        let mut mismatches = 0usize;
        for relative in &left_files {
            let left_file = left_base.join(relative);
            let right_file = right_base.join(relative);
            self.sink
                .debug(&format!("Comparing at file level: {}", relative.display()));

            let left_size = hasher::file_size(&left_file)?;
            let right_size = hasher::file_size(&right_file)?;
            if left_size != right_size {
                self.sink.error(&format!(
                    "Files differ in size: {} = {} vs {} = {}",
                    left_file.display(),
                    left_size,
                    right_file.display(),
                    right_size
                ));
                mismatches += 1;
                continue;
            }

            // Digest only when sizes agree; a size mismatch already settles it
            if hasher::file_digest(&left_file)? != hasher::file_digest(&right_file)? {
                self.sink.error(&format!(
                    "Files differ in digest: {} vs {}",
                    left_file.display(),
                    right_file.display()
                ));
                mismatches += 1;
            }
        }

        if mismatches == 0 {
            Ok(Verdict::Equivalent)
        } else {
            Ok(Verdict::ContentDiffers { files: mismatches })
        }
    }
}
