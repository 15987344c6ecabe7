//! Check-dir command implementation.
//!
//! Looks at the JPEG and PNG files directly inside a directory; nothing is
//! modified.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::warn;

use super::check::FileReport;
use crate::exit_codes::ExitCode;
use crate::utils::{is_image_path, read_input, sha3_hex};

#[derive(Debug, Default, Serialize)]
struct Summary {
    checked: usize,
    with_c2pa: usize,
    unreadable: usize,
}

/// Execute the check-dir command.
pub fn execute(dir: PathBuf, json: bool, quiet: bool) -> Result<ExitCode> {
    let entries = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| is_image_path(path))
        .collect();
    files.sort();

    let mut summary = Summary::default();

    for path in &files {
        let content = match read_input(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Skipping unreadable file");
                summary.unreadable += 1;
                continue;
            }
        };

        summary.checked += 1;
        let mut report = FileReport::new(path, &content);
        if report.detected {
            summary.with_c2pa += 1;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.file.clone());

        if json {
            report.sha3_256 = Some(sha3_hex(&content));
            println!(
                "{}",
                serde_json::to_string(&report).context("Failed to serialize report")?
            );
        } else if !quiet {
            if report.detected {
                println!("{} {}: C2PA metadata detected", "!".yellow().bold(), name);
            } else {
                println!("{} {}: No C2PA metadata", "✓".green(), name);
            }
        }
    }

    if json {
        println!(
            "{}",
            serde_json::to_string(&summary).context("Failed to serialize summary")?
        );
    } else if !quiet {
        println!();
        println!(
            "{} Checked {} images, found C2PA metadata in {} images",
            "Summary:".bold(),
            summary.checked,
            summary.with_c2pa
        );
    }

    Ok(ExitCode::success())
}
