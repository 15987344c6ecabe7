//! Filter command implementation.
//!
//! Reads one complete image from stdin and writes an image to stdout: the
//! cleaned bytes on success, the input unchanged otherwise. Everything else
//! goes to stderr.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};
use unseal_core::{Outcome, RemovalConfig, Remover, TracingSink};

use crate::exit_codes::{ExitCode, INPUT_ERROR};

/// Execute the filter command.
pub fn execute(config: RemovalConfig) -> Result<ExitCode> {
    let mut input = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut input)
        .context("Failed to read image from stdin")?;

    if input.is_empty() {
        return Ok(ExitCode::error(INPUT_ERROR, "No input data received on stdin"));
    }
    info!(bytes = input.len(), "Read stdin");

    let removal = Remover::new(config).with_sink(&TracingSink).remove(&input);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&removal.bytes)
        .and_then(|()| stdout.flush())
        .context("Failed to write image to stdout")?;

    match removal.outcome {
        Outcome::Cleaned => {
            info!(bytes = removal.bytes.len(), strategy = ?removal.strategy, "Wrote cleaned image")
        }
        Outcome::NoMetadataFound => info!("Input does not contain C2PA metadata"),
        outcome => warn!(outcome = %outcome, "Wrote input unchanged"),
    }

    Ok(ExitCode::from_outcome(removal.outcome))
}
