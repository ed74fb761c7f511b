//! Integration tests for reading and writing trajectory files.

use std::io::Write;

use trajectory_player::persist;
use trajectory_player::prelude::*;

use tempfile::NamedTempFile;

#[test]
fn test_roundtrip_lists() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let path = temp.path();

    let lists = vec![
        vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 2.0)],
        vec![],
        vec![Vec3::new(-0.25, 3.5, 1e-3)],
    ];
    persist::save(path, &lists).expect("Failed to save");

    let back = persist::load(path).expect("Failed to load");
    assert_eq!(back, lists);
}

#[test]
fn test_load_handwritten_file() {
    let mut temp = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        temp,
        "# Objeto 1\n\
         5 6 5\n\
         5 7 5\n\
         \n\
         # comment that is not a marker\n\
         # Objeto 3\n\
         0.5 0.5 0.5\n"
    )
    .expect("Failed to write");
    temp.flush().expect("Failed to flush");

    let lists = persist::load(temp.path()).expect("Failed to load");
    assert_eq!(lists.len(), 4);
    assert!(lists[0].is_empty());
    assert_eq!(lists[1], vec![Vec3::new(5.0, 6.0, 5.0), Vec3::new(5.0, 7.0, 5.0)]);
    assert!(lists[2].is_empty());
    assert_eq!(lists[3], vec![Vec3::splat(0.5)]);
}

#[test]
fn test_save_is_canonical() {
    let mut temp = NamedTempFile::new().expect("Failed to create temp file");
    write!(temp, "1 0 0\n   \n# Objeto 1\n2 2 2\n").expect("Failed to write");
    temp.flush().expect("Failed to flush");

    let lists = persist::load(temp.path()).expect("Failed to load");
    let out = NamedTempFile::new().expect("Failed to create temp file");
    persist::save(out.path(), &lists).expect("Failed to save");

    let text = std::fs::read_to_string(out.path()).expect("Failed to read back");
    assert_eq!(text, "# Objeto 0\n1 0 0\n\n# Objeto 1\n2 2 2\n\n");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = persist::load(dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}
