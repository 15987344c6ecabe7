//! Remove command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::{info, warn};
use unseal_core::{detect, inspect, RemovalConfig, Remover, TracingSink};

use crate::exit_codes::ExitCode;
use crate::utils::{build_cleaned_path, read_input, size_ratio};

/// Execute the remove command.
pub fn execute(
    file: PathBuf,
    output: Option<PathBuf>,
    config: RemovalConfig,
    dry_run: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let content = read_input(&file)?;
    let output_path = output.unwrap_or_else(|| build_cleaned_path(&file));
    let detection = inspect(&content);

    if dry_run {
        if quiet {
            return Ok(ExitCode::success());
        }
        println!("{}", "[DRY RUN] Would perform the following:".cyan().bold());
        println!();
        println!("   {} {}", "Input file:".dimmed(), file.display());
        println!("   {} {}", "Format:".dimmed(), detection.format);
        println!(
            "   {} {}",
            "C2PA metadata:".dimmed(),
            detection
                .evidence
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        println!("   {} {}", "Output file:".dimmed(), output_path.display());
        println!(
            "   {} {}",
            "Smart mode:".dimmed(),
            if config.smart_mode { "on" } else { "off" }
        );
        println!("   {} {}", "JPEG quality:".dimmed(), config.jpeg_quality);
        return Ok(ExitCode::success());
    }

    if !detection.format.is_supported() {
        bail!("Unsupported image format: {}", file.display());
    }

    if !detection.is_detected() {
        info!(path = %file.display(), "No C2PA metadata, nothing written");
        if !quiet {
            println!("{}", "No C2PA metadata found, no changes needed".green());
        }
        return Ok(ExitCode::success());
    }

    let removal = Remover::new(config).with_sink(&TracingSink).remove(&content);
    if !removal.is_cleaned() {
        return Ok(ExitCode::from_outcome(removal.outcome));
    }

    std::fs::write(&output_path, &removal.bytes)
        .with_context(|| format!("Failed to write cleaned file: {}", output_path.display()))?;

    info!(
        output = %output_path.display(),
        bytes = removal.bytes.len(),
        strategy = ?removal.strategy,
        "Cleaned file written"
    );

    // Re-check what actually landed on disk
    let written = read_input(&output_path)?;
    let verified = !detect(&written);
    if !verified {
        warn!(output = %output_path.display(), "C2PA metadata still detected in written file");
    }

    if !quiet {
        println!();
        println!("{}", "C2PA metadata removed!".green().bold());
        println!();
        println!("   {} {}", "Output file:".dimmed(), output_path.display());
        if let Some(strategy) = removal.strategy {
            println!("   {} {}", "Method:".dimmed(), strategy);
        }
        println!(
            "   {} {:.1}% of original",
            "Size:".dimmed(),
            size_ratio(removal.bytes.len(), content.len())
        );
        if verified {
            println!(
                "   {} {}",
                "Verification:".dimmed(),
                "No C2PA metadata in cleaned file".green()
            );
        }
    }

    if !verified {
        bail!(
            "Removal failed: C2PA metadata still detected in {}",
            output_path.display()
        );
    }

    Ok(ExitCode::success())
}
