use super::{JpegWalk, EOI};
use crate::detect::Detector;
use crate::diagnostics::{emit, Diagnostic, DiagnosticSink};
use crate::error::{Result, UnsealError};
use crate::format::JPEG_SOI;

/// Rebuild a JPEG without the segments the detector flags.
///
/// Every other segment is copied verbatim, followed by the scan data when the
/// walk reached SOS. When the walk stopped on damage, everything from the
/// damaged segment onward is copied as one opaque block. Stray bytes before
/// that point are not carried over. EOI is written only if the walk saw one.
///
/// Returns `NoRemovableMetadataFound` when nothing was dropped.
pub fn strip(
    data: &[u8],
    walk: &JpegWalk,
    detector: &Detector,
    sink: Option<&dyn DiagnosticSink>,
) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(&JPEG_SOI);

    let mut dropped = 0usize;
    for segment in walk.segments.iter().filter(|s| s.marker != EOI) {
        if let Some(evidence) = detector.segment_evidence(data, segment) {
            emit(
                sink,
                Diagnostic::SegmentDropped {
                    marker: segment.marker,
                    offset: segment.offset,
                    evidence,
                },
            );
            dropped += 1;
            continue;
        }
        out.extend_from_slice(segment.span().slice(data));
    }

    if dropped == 0 {
        return Err(UnsealError::NoRemovableMetadataFound);
    }

    if let Some(scan) = walk.scan {
        out.extend_from_slice(scan.slice(data));
    } else if let Some(tail) = walk.damaged_tail(data.len()) {
        out.extend_from_slice(tail.slice(data));
        emit(
            sink,
            Diagnostic::DamagedTailKept {
                offset: tail.offset,
                len: tail.len,
            },
        );
    } else if walk.has_eoi() {
        out.extend_from_slice(&[0xFF, EOI]);
        emit(sink, Diagnostic::EoiAppended);
    } else {
        emit(sink, Diagnostic::EoiOmitted);
    }

    Ok(out)
}
