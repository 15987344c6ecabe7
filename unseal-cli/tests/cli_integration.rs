//! CLI integration tests for unseal-cli.
//!
//! These tests verify the CLI behavior by running the actual binary
//! and checking outputs, exit codes, and file artifacts.

use std::fs;
use std::io::Cursor;

use assert_cmd::Command;
use image::{DynamicImage, ImageFormat, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the unseal binary.
fn unseal() -> Command {
    Command::cargo_bin("unseal").unwrap()
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(16, 16, |x, y| image::Rgb([(x * 16) as u8, (y * 16) as u8, 90]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}

fn clean_jpeg() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

fn clean_png() -> Vec<u8> {
    encode(ImageFormat::Png)
}

/// A JPEG carrying an APP11 segment right after SOI.
fn c2pa_jpeg() -> Vec<u8> {
    let base = clean_jpeg();
    let payload = b"JP\x00\x01\x00\x00\x00\x01c2pa manifest store";
    let mut out = base[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xEB]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&base[2..]);
    out
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    unseal()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detect and remove C2PA metadata"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("check-dir"))
        .stdout(predicate::str::contains("filter"));
}

#[test]
fn test_version_displays_version() {
    unseal()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unseal"));
}

#[test]
fn test_help_shows_exit_codes() {
    unseal()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("65"))
        .stdout(predicate::str::contains("66"))
        .stdout(predicate::str::contains("74"));
}

#[test]
fn test_remove_help_shows_options() {
    unseal()
        .args(["remove", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--no-smart"))
        .stdout(predicate::str::contains("--quality"))
        .stdout(predicate::str::contains("--dry-run"));
}

// ============================================================================
// Exit Code Tests
// ============================================================================

#[test]
fn test_unknown_subcommand_is_usage_error() {
    // Exit code 64 = EX_USAGE
    unseal().arg("scrub").assert().code(64);
    unseal().arg("check").assert().code(64);
}

#[test]
fn test_quality_out_of_range_is_usage_error() {
    unseal()
        .args(["remove", "--quality", "0", "x.jpg"])
        .assert()
        .code(64);
}

#[test]
fn test_missing_file_returns_input_error() {
    // Exit code 66 = EX_NOINPUT
    unseal()
        .args(["remove", "nonexistent_file.jpg"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read file"));

    unseal()
        .args(["check", "nonexistent_file.jpg"])
        .assert()
        .code(66);
}

#[test]
fn test_missing_directory_returns_input_error() {
    unseal()
        .args(["check-dir", "no/such/dir"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read directory"));
}

#[test]
fn test_remove_unsupported_file_is_data_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("fake.jpg");
    fs::write(&file, b"definitely not an image").unwrap();

    unseal()
        .args(["remove", file.to_str().unwrap()])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Unsupported image format"));
}

// ============================================================================
// Check Tests
// ============================================================================

#[test]
fn test_check_reports_detection() {
    let temp = TempDir::new().unwrap();
    let flagged = temp.path().join("flagged.jpg");
    let clean = temp.path().join("clean.png");
    fs::write(&flagged, c2pa_jpeg()).unwrap();
    fs::write(&clean, clean_png()).unwrap();

    unseal()
        .args(["check", flagged.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("C2PA metadata detected"))
        .stdout(predicate::str::contains("APP11 segment"));

    unseal()
        .args(["check", clean.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No C2PA metadata found"));
}

#[test]
fn test_check_json_output() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("flagged.jpg");
    fs::write(&file, c2pa_jpeg()).unwrap();

    let output = unseal()
        .args(["check", "--json", file.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["format"], "jpeg");
    assert_eq!(report["detected"], true);
    assert_eq!(report["evidence"]["kind"], "app11_segment");
    assert_eq!(report["evidence"]["offset"], 2);
}

#[test]
fn test_quiet_suppresses_output() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("flagged.jpg");
    fs::write(&file, c2pa_jpeg()).unwrap();

    unseal()
        .args(["--quiet", "check", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// Remove Tests
// ============================================================================

#[test]
fn test_remove_writes_cleaned_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("photo.jpg");
    fs::write(&file, c2pa_jpeg()).unwrap();

    unseal()
        .args(["remove", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("C2PA metadata removed"))
        .stdout(predicate::str::contains("No C2PA metadata in cleaned file"));

    let cleaned = temp.path().join("photo.jpg.cleaned.jpg");
    assert!(cleaned.exists(), "cleaned file should be written");
    assert!(!unseal_core::detect(&fs::read(&cleaned).unwrap()));
    assert_eq!(fs::read(&file).unwrap(), c2pa_jpeg(), "input must not change");
}

#[test]
fn test_remove_selective_copy_with_output_path() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("photo.jpg");
    let out = temp.path().join("out.jpg");
    fs::write(&file, c2pa_jpeg()).unwrap();

    unseal()
        .args([
            "remove",
            "--no-smart",
            "-o",
            out.to_str().unwrap(),
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("selective copy"));

    assert_eq!(fs::read(&out).unwrap(), clean_jpeg());
}

#[test]
fn test_remove_clean_file_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("clean.png");
    fs::write(&file, clean_png()).unwrap();

    unseal()
        .args(["remove", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no changes needed"));

    assert!(!temp.path().join("clean.png.cleaned.png").exists());
}

#[test]
fn test_remove_dry_run_shows_preview() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("photo.jpg");
    fs::write(&file, c2pa_jpeg()).unwrap();

    unseal()
        .args(["remove", "--dry-run", "--quality", "80", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN]"))
        .stdout(predicate::str::contains("Output file:"))
        .stdout(predicate::str::contains("photo.jpg.cleaned.jpg"))
        .stdout(predicate::str::contains("JPEG quality:"))
        .stdout(predicate::str::contains("80"));

    assert!(!temp.path().join("photo.jpg.cleaned.jpg").exists());
}

#[test]
fn test_remove_dry_run_respects_quiet() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("photo.jpg");
    fs::write(&file, c2pa_jpeg()).unwrap();

    unseal()
        .args(["--quiet", "remove", "--dry-run", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!temp.path().join("photo.jpg.cleaned.jpg").exists());
}

// ============================================================================
// Filter Tests
// ============================================================================

#[test]
fn test_filter_cleans_stdin() {
    let output = unseal()
        .arg("filter")
        .write_stdin(c2pa_jpeg())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.starts_with(&[0xFF, 0xD8]));
    assert!(!unseal_core::detect(&output.stdout));
}

#[test]
fn test_filter_passes_clean_input_through() {
    let input = clean_png();
    unseal()
        .arg("filter")
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout(predicate::eq(input));
}

#[test]
fn test_filter_unsupported_returns_original() {
    let input = b"GIF89a not handled".to_vec();
    unseal()
        .arg("filter")
        .write_stdin(input.clone())
        .assert()
        .code(65)
        .stdout(predicate::eq(input))
        .stderr(predicate::str::contains("Removal failed"));
}

#[test]
fn test_filter_empty_input() {
    unseal()
        .arg("filter")
        .write_stdin(Vec::new())
        .assert()
        .code(66)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No input data"));
}
