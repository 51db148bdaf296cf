//! Shared test utilities for integration tests
//!
//! Builds working-space and archive container trees under a tempdir and
//! provides ordering assertions over captured report messages.

use std::fs;
use std::path::Path;

/// Create a container at `path` holding the given versions as real
/// directories, each populated with `(file name, content)` pairs. When
/// `latest` is given, a relative `latest` symlink to that version name is
/// created, matching the layout the archive guarantees.
pub fn setup_container(path: &Path, versions: &[(&str, &[(&str, &str)])], latest: Option<&str>) {
    fs::create_dir_all(path).unwrap();
    for (version, files) in versions {
        let version_dir = path.join(version);
        fs::create_dir(&version_dir).unwrap();
        for (name, content) in *files {
            fs::write(version_dir.join(name), content).unwrap();
        }
    }
    if let Some(target) = latest {
        std::os::unix::fs::symlink(target, path.join("latest")).unwrap();
    }
}

/// Create a version entry in `container` as an absolute symlink to `target`.
pub fn link_version(container: &Path, version: &str, target: &Path) {
    std::os::unix::fs::symlink(target, container.join(version)).unwrap();
}

/// Index of the first message containing `needle`; panics with the full
/// message list when absent, so ordering assertions fail loudly.
pub fn index_of(messages: &[String], needle: &str) -> usize {
    messages
        .iter()
        .position(|m| m.contains(needle))
        .unwrap_or_else(|| panic!("no message containing {:?} in {:#?}", needle, messages))
}

/// Assert that no captured message contains `needle`.
pub fn assert_no_message(messages: &[String], needle: &str) {
    assert!(
        !messages.iter().any(|m| m.contains(needle)),
        "unexpected message containing {:?} in {:#?}",
        needle,
        messages
    );
}
