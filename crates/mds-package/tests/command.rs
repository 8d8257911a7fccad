//! Tests for the subprocess packager adapter, driven by fixture scripts.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use mds_package::{CommandPackager, Packager};
use tempfile::tempdir;

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("packager.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn zero_exit_is_success_and_arguments_are_key_dataset_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out");
    fs::create_dir_all(&output).unwrap();
    let script = write_script(
        dir.path(),
        "printf '%s;%s;%s' \"$1\" \"$2\" \"$3\" > \"$3/args\"\n",
    );
    let packager = CommandPackager::new(&script);

    let keys = dir.path().join("keys");
    let dataset = dir.path().join("AGE");
    packager.package(&keys, &dataset, &output).unwrap();

    let recorded = fs::read_to_string(output.join("args")).unwrap();
    assert_eq!(
        recorded,
        format!("{};{};{}", keys.display(), dataset.display(), output.display())
    );
}

#[test]
fn nonzero_exit_carries_trimmed_stderr() {
    let dir = tempdir().unwrap();
    let script = write_script(
        dir.path(),
        "echo \"  key material unreadable  \" >&2\nexit 2\n",
    );
    let packager = CommandPackager::new(&script);

    let error = packager
        .package(dir.path(), dir.path(), dir.path())
        .unwrap_err();
    let message = error.to_string();
    assert!(message.contains("key material unreadable"));
    assert!(!message.ends_with(' '));
}

#[test]
fn spawn_failure_is_an_error_naming_the_program() {
    let dir = tempdir().unwrap();
    let packager = CommandPackager::new("/nonexistent/packager");

    let error = packager
        .package(dir.path(), dir.path(), dir.path())
        .unwrap_err();
    assert!(error.to_string().contains("/nonexistent/packager"));
}
