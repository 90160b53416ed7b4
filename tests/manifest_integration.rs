//! Integration tests for reading manifest files from disk.

use std::fs;

use tempfile::TempDir;
use vsix_mirror::{ExtensionRef, ManifestError, read_manifest};

fn write_manifest(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("extensions.txt");
    fs::write(&path, contents).expect("failed to write manifest");
    path
}

#[test]
fn test_read_manifest_recovers_every_field() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_manifest(
        &dir,
        "ms-python.python@2024.2.1\nredhat.vscode-yaml@1.14.0\nms-vscode.remote.ssh.edit@0.86.0\n",
    );

    let refs = read_manifest(&path).expect("manifest should parse");

    assert_eq!(
        refs,
        vec![
            ExtensionRef::new("ms-python", "python", "2024.2.1"),
            ExtensionRef::new("redhat", "vscode-yaml", "1.14.0"),
            ExtensionRef::new("ms-vscode", "remote.ssh.edit", "0.86.0"),
        ]
    );
}

#[test]
fn test_read_manifest_handles_crlf_line_endings() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_manifest(&dir, "foo.bar@1.2.3\r\nbaz.qux@0.1.0\r\n");

    let refs = read_manifest(&path).expect("manifest should parse");

    assert_eq!(refs[0].version(), "1.2.3");
    assert_eq!(refs[1].version(), "0.1.0");
}

#[test]
fn test_read_manifest_empty_file_yields_no_entries() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_manifest(&dir, "");

    let refs = read_manifest(&path).expect("empty manifest is not an error");

    assert!(refs.is_empty());
}

#[test]
fn test_read_manifest_line_without_at_fails_whole_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_manifest(&dir, "foo.bar@1.2.3\nfoo.baz\nfoo.qux@2.0.0\n");

    let err = read_manifest(&path).unwrap_err();

    match err {
        ManifestError::MissingVersion { line_number, line } => {
            assert_eq!(line_number, 2);
            assert_eq!(line, "foo.baz");
        }
        other => panic!("expected MissingVersion, got {other:?}"),
    }
}

#[test]
fn test_read_manifest_line_without_dot_fails() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_manifest(&dir, "foobar@1.2.3\n");

    let err = read_manifest(&path).unwrap_err();

    assert!(matches!(err, ManifestError::MissingPublisher { line_number: 1, .. }));
}

#[test]
fn test_read_manifest_missing_file_is_read_error() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("does-not-exist.txt");

    let err = read_manifest(&path).unwrap_err();

    assert!(matches!(err, ManifestError::Read { .. }));
    assert!(err.to_string().contains("does-not-exist.txt"));
}
