use std::path::Path;

use crate::paths::{absolutize_under, display_path, ensure_dir};

#[test]
fn relative_paths_land_under_base_exactly_once() {
    let joined = absolutize_under(Path::new("/repo"), "target/test-out");
    assert_eq!(joined, Path::new("/repo/target/test-out"));
}

#[test]
fn absolute_paths_pass_through_unchanged() {
    let joined = absolutize_under(Path::new("/repo"), "/elsewhere/conf");
    assert_eq!(joined, Path::new("/elsewhere/conf"));
}

#[test]
fn ensure_dir_creates_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b").join("c");

    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());

    // Creating an already-existing directory is fine.
    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn display_path_falls_back_for_nonexistent_paths() {
    let rendered = display_path(Path::new("/no/such/path/here"));
    assert_eq!(rendered, "/no/such/path/here");
}
