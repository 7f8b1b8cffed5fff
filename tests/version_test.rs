use gmvault_build::error::Error;
use gmvault_build::version::extract_version;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_extract_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gmvault_utils.py");
    fs::write(
        &path,
        "import os\nLOG = None\nGMVAULT_VERSION = \"1.9.1\"\n\ndef get_home_dir_path():\n    pass\n",
    )
    .unwrap();

    assert_eq!(extract_version(&path).unwrap().as_str(), "1.9.1");
}

#[test]
fn test_extract_version_marker_mid_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gmvault_utils.py");
    fs::write(&path, "VERSIONS = {}; GMVAULT_VERSION = \"1.8.1-beta\"\n").unwrap();

    assert_eq!(extract_version(&path).unwrap().to_string(), "1.8.1-beta");
}

#[test]
fn test_extract_version_first_match_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gmvault_utils.py");
    fs::write(
        &path,
        "GMVAULT_VERSION = \"1.9.1\"\nGMVAULT_VERSION = \"2.0.0\"\n",
    )
    .unwrap();

    assert_eq!(extract_version(&path).unwrap().as_str(), "1.9.1");
}

#[test]
fn test_extract_version_last_line_without_newline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gmvault_utils.py");
    fs::write(&path, "x = 1\nGMVAULT_VERSION = \"1.9.1\"").unwrap();

    assert_eq!(extract_version(&path).unwrap().as_str(), "1.9.1");
}

#[test]
fn test_extract_version_crlf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gmvault_utils.py");
    fs::write(&path, "GMVAULT_VERSION = \"1.9.1\"\r\n").unwrap();

    assert_eq!(extract_version(&path).unwrap().as_str(), "1.9.1");
}

#[test]
fn test_extract_version_no_marker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gmvault_utils.py");
    fs::write(&path, "VERSION = \"1.9.1\"\n").unwrap();

    match extract_version(&path) {
        Err(Error::VersionFormatError { path: scanned }) => assert_eq!(scanned, path),
        other => panic!("Expected VersionFormatError, got {other:?}"),
    }
}

#[test]
fn test_extract_version_empty_literal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gmvault_utils.py");
    fs::write(&path, "GMVAULT_VERSION = \"  \"\nGMVAULT_VERSION = \"1.0\"\n").unwrap();

    assert!(matches!(
        extract_version(&path),
        Err(Error::VersionFormatError { .. })
    ));
}

#[test]
fn test_extract_version_missing_file() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(
        extract_version(dir.path().join("missing.py")),
        Err(Error::ReadError { .. })
    ));
}
