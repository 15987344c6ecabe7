use tracing::trace;

use super::{is_standalone, APP0, APP15, EOI, SOS};
use crate::error::{Result, UnsealError};
use crate::format::{ImageFormat, JPEG_SOI};
use crate::span::Span;
use crate::walk::WalkStop;

/// One marker segment. Payload bytes stay in the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Marker code (the byte after `0xFF`).
    pub marker: u8,
    /// Offset of the `0xFF` that introduces the marker.
    pub offset: usize,
    /// Declared length (includes the 2 length bytes); `None` for standalone markers.
    pub length: Option<u16>,
    /// Payload after the length field; empty for standalone markers.
    pub payload: Span,
}

impl Segment {
    /// Marker, length field and payload, exactly as they appear in the input.
    pub fn span(&self) -> Span {
        Span::between(self.offset, self.payload.end())
    }

    pub fn is_app(&self) -> bool {
        (APP0..=APP15).contains(&self.marker)
    }
}

/// Result of walking a JPEG up to its first SOS or EOI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegWalk {
    pub segments: Vec<Segment>,
    /// Entropy-coded data after the SOS header, through end of buffer.
    pub scan: Option<Span>,
    /// Offset where marker parsing stopped.
    pub end: usize,
    /// Stray and fill bytes passed over while looking for markers.
    pub skipped: usize,
    pub stop: WalkStop,
}

impl JpegWalk {
    /// Whether the stream had an explicit EOI before any scan data.
    pub fn has_eoi(&self) -> bool {
        self.stop == WalkStop::EndOfImage
    }

    /// Bytes accounted for by SOI, segments and skipped bytes.
    pub fn consumed_len(&self) -> usize {
        self.end
    }

    pub fn truncation(&self) -> Option<UnsealError> {
        self.stop.as_error()
    }

    /// Unparsed bytes from the damaged segment to the end of the buffer.
    pub fn damaged_tail(&self, total_len: usize) -> Option<Span> {
        self.stop
            .is_damaged()
            .then(|| Span::between(self.end, total_len))
    }
}

/// Walk the marker segments of a JPEG buffer.
///
/// Fails only when `data` does not start with SOI. Damaged input ends the
/// walk early and the segments collected so far are returned.
pub fn walk(data: &[u8]) -> Result<JpegWalk> {
    if !data.starts_with(&JPEG_SOI) {
        return Err(UnsealError::MissingSignature {
            format: ImageFormat::Jpeg,
        });
    }

    let mut segments = Vec::new();
    let mut pos = JPEG_SOI.len();
    let mut skipped = 0;

    let stop = loop {
        if pos + 1 >= data.len() {
            skipped += data.len() - pos;
            pos = data.len();
            break WalkStop::Exhausted;
        }

        // Stray bytes, fill bytes and stuffed zeros are stepped over one at a time
        if data[pos] != 0xFF || data[pos + 1] == 0xFF || data[pos + 1] == 0x00 {
            trace!(offset = pos, byte = data[pos], "Skipping non-marker byte");
            pos += 1;
            skipped += 1;
            continue;
        }

        let offset = pos;
        let marker = data[pos + 1];

        if is_standalone(marker) || marker == EOI {
            segments.push(Segment {
                marker,
                offset,
                length: None,
                payload: Span::new(offset + 2, 0),
            });
            pos += 2;
            if marker == EOI {
                break WalkStop::EndOfImage;
            }
            continue;
        }

        if offset + 4 > data.len() {
            break WalkStop::Truncated {
                offset,
                needed: offset + 4 - data.len(),
            };
        }

        let length = u16::from_be_bytes([data[offset + 2], data[offset + 3]]);
        if length < 2 {
            break WalkStop::InvalidLength { offset, length };
        }

        let end = offset + 2 + length as usize;
        if end > data.len() {
            break WalkStop::Truncated {
                offset,
                needed: end - data.len(),
            };
        }

        segments.push(Segment {
            marker,
            offset,
            length: Some(length),
            payload: Span::between(offset + 4, end),
        });
        pos = end;

        if marker == SOS {
            break WalkStop::StartOfScan;
        }
    };

    let scan = (stop == WalkStop::StartOfScan).then(|| Span::between(pos, data.len()));

    Ok(JpegWalk {
        segments,
        scan,
        end: pos,
        skipped,
        stop,
    })
}
