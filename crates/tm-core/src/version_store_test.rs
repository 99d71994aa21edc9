use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_init_then_read_is_zero() {
    let dir = tempdir().unwrap();
    let store = FileVersionStore::new(dir.path().join("version.state"));

    store.init().unwrap();

    assert_eq!(store.read().unwrap(), Version::ZERO);
    assert_eq!(
        fs::read_to_string(dir.path().join("version.state")).unwrap(),
        "0"
    );
}

#[test]
fn test_init_twice_is_rejected() {
    let dir = tempdir().unwrap();
    let store = FileVersionStore::new(dir.path().join("version.state"));

    store.init().unwrap();
    store.write(Version::new(42)).unwrap();

    let err = store.init().unwrap_err();
    assert!(matches!(err, CoreError::AlreadyInitialized { .. }));
    // The existing marker is left alone
    assert_eq!(store.read().unwrap(), Version::new(42));
}

#[test]
fn test_read_missing_marker_is_not_initialized() {
    let dir = tempdir().unwrap();
    let store = FileVersionStore::new(dir.path().join("version.state"));

    let err = store.read().unwrap_err();
    assert!(matches!(err, CoreError::NotInitialized { .. }));
}

#[test]
fn test_read_non_numeric_marker_is_corrupted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("version.state");
    fs::write(&path, "abc").unwrap();

    let err = FileVersionStore::new(&path).read().unwrap_err();
    match err {
        CoreError::Corrupted { content, .. } => assert_eq!(content, "abc"),
        other => panic!("expected Corrupted, got {other:?}"),
    }
}

#[test]
fn test_read_empty_and_multi_value_markers_are_corrupted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("version.state");
    let store = FileVersionStore::new(&path);

    for content in ["", "   \n", "10 20", "-5", "12abc", "1.5"] {
        fs::write(&path, content).unwrap();
        assert!(
            matches!(store.read(), Err(CoreError::Corrupted { .. })),
            "content {content:?} should be corrupted"
        );
    }
}

#[test]
fn test_read_tolerates_surrounding_whitespace() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("version.state");
    fs::write(&path, "  1700000000\n").unwrap();

    assert_eq!(
        FileVersionStore::new(&path).read().unwrap(),
        Version::new(1_700_000_000)
    );
}

#[test]
fn test_write_replaces_value_and_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("version.state");
    let store = FileVersionStore::new(&path);

    store.init().unwrap();
    store.write(Version::new(10)).unwrap();
    store.write(Version::new(20)).unwrap();

    assert_eq!(store.read().unwrap(), Version::new(20));
    assert!(!dir.path().join("version.state.tmp").exists());
}

#[test]
fn test_write_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("nested").join("version.state");
    let store = FileVersionStore::new(&path);

    store.write(Version::new(7)).unwrap();
    assert_eq!(store.read().unwrap(), Version::new(7));
}

#[test]
fn test_read_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("version.state");
    fs::create_dir(&path).unwrap();

    let err = FileVersionStore::new(&path).read().unwrap_err();
    assert!(matches!(err, CoreError::MarkerIo { .. }));
}

#[test]
fn test_parse_marker() {
    assert_eq!(parse_marker("0"), Some(Version::ZERO));
    assert_eq!(parse_marker("30\n"), Some(Version::new(30)));
    assert_eq!(parse_marker("+3"), None);
    assert_eq!(parse_marker("99999999999999999999999"), None);
}
