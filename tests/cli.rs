//! End-to-end checks against the built binary.
//!
//! Only failure paths are exercised here: they exit before a window is
//! created, so they run on headless machines.

use std::io::Write;
use std::process::Command;

use bytecanvas::{pack, SourceBytes, VizError};

fn bytecanvas() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bytecanvas"));
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_missing_file_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.bin");

    let output = bytecanvas().arg(&missing).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not open file"), "stderr: {stderr}");
    assert!(stderr.contains("missing.bin"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_argument_is_usage_error() {
    let output = bytecanvas().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_directory_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = bytecanvas().arg(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_load_and_pack_file() {
    let bytes: Vec<u8> = (0..300u32).map(|i| (i % 251) as u8).collect();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let source = SourceBytes::load(file.path()).unwrap();
    let canvas = pack(source.as_bytes());

    assert_eq!(canvas.dimension(), 11);
    assert_eq!(canvas.as_bytes().len(), 11 * 11 * 3);
    assert_eq!(&canvas.as_bytes()[..300], bytes.as_slice());
    assert!(canvas.as_bytes()[300..].iter().all(|&b| b == 0));
}

#[test]
fn test_missing_file_is_file_read_error() {
    let err = SourceBytes::load("/nonexistent/bytecanvas/input.bin").unwrap_err();
    assert!(err.is_file_read());
    assert!(matches!(err, VizError::FileRead { .. }));
}
