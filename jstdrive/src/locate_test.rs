use std::path::Path;

use crate::locate::{Coordinate, resolve_runner_jar};
use crate::run::RunError;

#[test]
fn repository_path_follows_the_group_artifact_version_layout() {
    let coordinate = Coordinate::jstestdriver();
    assert_eq!(
        coordinate.repository_path(),
        Path::new("com/google/jstestdriver/jstestdriver/1.3.5/jstestdriver-1.3.5.jar")
    );
}

#[test]
fn coordinate_renders_colon_separated() {
    assert_eq!(
        Coordinate::jstestdriver().to_string(),
        "com.google.jstestdriver:jstestdriver:1.3.5:jar"
    );
}

#[test]
fn explicit_jar_short_circuits_resolution() {
    let jar = resolve_runner_jar(Some("lib/runner.jar"), None, &Coordinate::jstestdriver());
    assert_eq!(jar.unwrap(), Path::new("lib/runner.jar"));
}

#[test]
fn blank_explicit_jar_does_not_short_circuit() {
    let repo = tempfile::tempdir().unwrap();
    let err = resolve_runner_jar(Some("  "), Some(repo.path()), &Coordinate::jstestdriver());
    assert!(matches!(err, Err(RunError::ArtifactNotFound { .. })));
}

#[test]
fn missing_archive_fails_with_the_coordinate() {
    let repo = tempfile::tempdir().unwrap();
    let err = resolve_runner_jar(None, Some(repo.path()), &Coordinate::jstestdriver())
        .unwrap_err();
    assert!(err.to_string().contains("com.google.jstestdriver"));
}

#[test]
fn present_archive_resolves_to_its_absolute_location() {
    let repo = tempfile::tempdir().unwrap();
    let coordinate = Coordinate::jstestdriver();
    let archive = repo.path().join(coordinate.repository_path());
    std::fs::create_dir_all(archive.parent().unwrap()).unwrap();
    std::fs::write(&archive, b"").unwrap();

    let resolved = resolve_runner_jar(None, Some(repo.path()), &coordinate).unwrap();
    assert_eq!(resolved, archive);
}
