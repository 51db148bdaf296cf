//! Container discovery across realistic hierarchy shapes

use super::test_utils::{index_of, link_version, setup_container};
use arclink::catalog::identify_containers;
use arclink::engine::reconcile;
use arclink::report::CaptureSink;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_deeply_nested_containers_found() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let deep = root
        .join("ukcp18")
        .join("data")
        .join("land-prob")
        .join("tasAnom")
        .join("ann");
    setup_container(&deep, &[("v20190429", &[("f.nc", "x")])], None);

    let containers = identify_containers(root).unwrap();
    assert_eq!(containers, vec![deep]);
}

#[test]
fn test_fully_reconciled_container_rediscovered() {
    // A container whose versions were all replaced by links on a previous
    // run must still be discovered, or repeated invocations would stop
    // maintaining its latest link.
    let temp_dir = TempDir::new().unwrap();
    let gws = temp_dir.path().join("gws");
    let arc = temp_dir.path().join("arc");
    fs::create_dir_all(&gws).unwrap();

    setup_container(&arc.join("ds"), &[("v20220203", &[("a.nc", "a")])], Some("v20220203"));
    fs::create_dir_all(gws.join("ds")).unwrap();
    link_version(&gws.join("ds"), "v20220203", &arc.join("ds").join("v20220203"));

    let containers = identify_containers(&gws).unwrap();
    assert_eq!(containers, vec![gws.join("ds")]);

    let sink = CaptureSink::new();
    reconcile(&gws, &arc, &sink).unwrap();
    assert!(sink.contains("correctly points to:"));
}

#[test]
fn test_containers_processed_in_path_order() {
    let temp_dir = TempDir::new().unwrap();
    let gws = temp_dir.path().join("gws");
    let arc = temp_dir.path().join("arc");

    let files: &[(&str, &str)] = &[("a.nc", "a")];
    for name in ["beta", "alpha"] {
        setup_container(&gws.join(name), &[("v20220203", files)], None);
        setup_container(&arc.join(name), &[("v20220203", files)], Some("v20220203"));
    }

    let sink = CaptureSink::new();
    reconcile(&gws, &arc, &sink).unwrap();

    let messages = sink.messages();
    let alpha = index_of(&messages, "alpha");
    let beta = index_of(&messages, "beta");
    assert!(alpha < beta);
}

#[test]
fn test_non_version_children_do_not_make_a_container() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::create_dir_all(root.join("ds").join("not_a_version")).unwrap();
    fs::write(root.join("ds").join("v20220101"), "a file, not a directory").unwrap();

    let containers = identify_containers(root).unwrap();
    assert_eq!(containers, Vec::<PathBuf>::new());
}
