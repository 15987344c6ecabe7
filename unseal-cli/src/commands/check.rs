//! Check command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;
use unseal_core::{inspect, Evidence, ImageFormat};

use crate::exit_codes::ExitCode;
use crate::utils::read_input;

/// Per-file detection result, as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub format: ImageFormat,
    pub detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha3_256: Option<String>,
}

impl FileReport {
    pub fn new(path: &Path, content: &[u8]) -> Self {
        let detection = inspect(content);
        debug!(
            path = %path.display(),
            format = %detection.format,
            detected = detection.is_detected(),
            "Checked file"
        );
        Self {
            file: path.display().to_string(),
            format: detection.format,
            detected: detection.is_detected(),
            evidence: detection.evidence,
            sha3_256: None,
        }
    }
}

/// Execute the check command.
pub fn execute(file: PathBuf, json: bool, quiet: bool) -> Result<ExitCode> {
    let content = read_input(&file)?;
    let report = FileReport::new(&file, &content);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
        return Ok(ExitCode::success());
    }

    if quiet {
        return Ok(ExitCode::success());
    }

    println!();
    if !report.format.is_supported() {
        println!("{}", "Not a supported image format".yellow());
        println!("   {} {}", "File:".dimmed(), report.file);
        return Ok(ExitCode::success());
    }

    match &report.evidence {
        Some(evidence) => {
            println!("{}", "C2PA metadata detected".yellow().bold());
            println!();
            println!("   {} {}", "File:".dimmed(), report.file);
            println!("   {} {}", "Format:".dimmed(), report.format);
            println!("   {} {}", "Evidence:".dimmed(), evidence);
            println!(
                "   {}",
                format!("Remove with: unseal remove {}", report.file).dimmed()
            );
        }
        None => {
            println!("{}", "No C2PA metadata found".green().bold());
            println!();
            println!("   {} {}", "File:".dimmed(), report.file);
            println!("   {} {}", "Format:".dimmed(), report.format);
        }
    }

    Ok(ExitCode::success())
}
