//! Exit codes following sysexits.h conventions.
//!
//! Scripts and batch pipelines can tell "nothing to do" apart from
//! "could not clean this file" without parsing output.

use unseal_core::Outcome;

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (invalid arguments).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Data format error (removal failed, unsupported or unverifiable image).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file, or empty input on stdin.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// I/O error (cannot write output file).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// Represents an exit code with optional error context.
#[derive(Debug)]
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Exit code for a finished removal.
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Cleaned | Outcome::NoMetadataFound => Self::success(),
            other => Self::error(DATA_ERROR, format!("Removal failed: {other}")),
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Classify error by inspecting the chain
        let code = if message.contains("Failed to read") {
            INPUT_ERROR
        } else if message.contains("Removal failed") || message.contains("Unsupported") {
            DATA_ERROR
        } else if message.contains("Failed to write") || message.contains("serialize") {
            IO_ERROR
        } else {
            GENERAL_ERROR
        };

        Self {
            code,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_outcome_codes() {
        assert_eq!(ExitCode::from_outcome(Outcome::Cleaned).code, SUCCESS);
        assert_eq!(ExitCode::from_outcome(Outcome::NoMetadataFound).code, SUCCESS);
        assert_eq!(
            ExitCode::from_outcome(Outcome::VerificationFailure).code,
            DATA_ERROR
        );
        let unsupported = ExitCode::from_outcome(Outcome::UnsupportedFormat);
        assert_eq!(unsupported.code, DATA_ERROR);
        assert_eq!(
            unsupported.message.as_deref(),
            Some("Removal failed: unsupported format")
        );
    }

    #[test]
    fn test_error_classification() {
        let read: anyhow::Result<()> =
            Err(anyhow!("No such file")).context("Failed to read file: a.jpg");
        assert_eq!(ExitCode::from_anyhow(&read.unwrap_err()).code, INPUT_ERROR);

        let write = anyhow!("Failed to write cleaned file");
        assert_eq!(ExitCode::from_anyhow(&write).code, IO_ERROR);

        let removal = anyhow!("Removal failed: verification failure");
        assert_eq!(ExitCode::from_anyhow(&removal).code, DATA_ERROR);

        assert_eq!(ExitCode::from_anyhow(&anyhow!("boom")).code, GENERAL_ERROR);
    }
}
