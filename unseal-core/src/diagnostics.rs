//! Diagnostics reported while removing metadata.
//!
//! The remover never logs on its own. Callers that want to know what
//! happened hand it a [`DiagnosticSink`]: [`TracingSink`] forwards to
//! `tracing`, [`RecordingSink`] keeps everything for later inspection.

use std::fmt;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::detect::Evidence;
use crate::error::UnsealError;
use crate::format::ImageFormat;
use crate::png::ChunkType;
use crate::remove::{Stage, Strategy};

/// Bytes of the input head included in [`Diagnostic::FormatDetected`].
pub const HEAD_PREVIEW_LEN: usize = 8;

/// One event in a removal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    FormatDetected {
        format: ImageFormat,
        size: usize,
        /// Hex of the first [`HEAD_PREVIEW_LEN`] bytes.
        head: String,
    },
    StageEntered(Stage),
    /// A walker stopped early; entries past the damage were not inspected.
    PartialParse(UnsealError),
    /// Unparsed bytes from the point of damage, copied through unchanged.
    DamagedTailKept { offset: usize, len: usize },
    SmartModeFailed(UnsealError),
    /// Re-encoded output still looked like it carried C2PA metadata.
    SmartModeResidual { evidence: Evidence },
    SegmentDropped {
        marker: u8,
        offset: usize,
        evidence: Evidence,
    },
    ChunkDropped {
        index: usize,
        kind: ChunkType,
        evidence: Evidence,
    },
    EoiAppended,
    /// The source had no explicit EOI before its scan data, so none was added.
    EoiOmitted,
    Verified { strategy: Strategy },
    VerificationFailed { evidence: Evidence },
}

impl Diagnostic {
    pub(crate) fn format_detected(format: ImageFormat, data: &[u8]) -> Self {
        let head = &data[..data.len().min(HEAD_PREVIEW_LEN)];
        Self::FormatDetected {
            format,
            size: data.len(),
            head: hex::encode(head),
        }
    }

    /// Whether the event means the input was damaged or removal went wrong.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::PartialParse(_) | Self::SmartModeFailed(_) | Self::VerificationFailed { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormatDetected { format, size, head } => {
                write!(f, "detected {format} ({size} bytes, head {head})")
            }
            Self::StageEntered(stage) => write!(f, "entering {stage}"),
            Self::PartialParse(err) => write!(f, "partial parse: {err}"),
            Self::DamagedTailKept { offset, len } => {
                write!(f, "kept {len} unparsed bytes from offset {offset}")
            }
            Self::SmartModeFailed(err) => write!(f, "smart mode failed: {err}"),
            Self::SmartModeResidual { evidence } => {
                write!(f, "re-encoded output still flagged: {evidence}")
            }
            Self::SegmentDropped {
                marker,
                offset,
                evidence,
            } => write!(
                f,
                "dropped segment 0xFF{marker:02X} at offset {offset}: {evidence}"
            ),
            Self::ChunkDropped {
                index,
                kind,
                evidence,
            } => write!(f, "dropped {kind} chunk #{index}: {evidence}"),
            Self::EoiAppended => write!(f, "appended EOI marker"),
            Self::EoiOmitted => write!(f, "source had no EOI marker, none appended"),
            Self::Verified { strategy } => write!(f, "{strategy} output verified clean"),
            Self::VerificationFailed { evidence } => {
                write!(f, "output still flagged after removal: {evidence}")
            }
        }
    }
}

/// Receiver for removal diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: &Diagnostic);
}

/// Forward to an optional sink.
pub(crate) fn emit(sink: Option<&dyn DiagnosticSink>, diagnostic: Diagnostic) {
    if let Some(sink) = sink {
        sink.record(&diagnostic);
    }
}

/// Sink that logs through `tracing`: warnings at `warn`, the rest at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        if diagnostic.is_warning() {
            warn!(diagnostic = %diagnostic, "Removal warning");
        } else {
            debug!(diagnostic = %diagnostic, "Removal step");
        }
    }
}

/// Sink that keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drain the recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic.clone());
    }
}
