use super::ChunkType;
use crate::error::{Result, UnsealError};
use crate::format::{ImageFormat, PNG_SIGNATURE};
use crate::span::Span;
use crate::walk::WalkStop;

/// Length, type and CRC fields around every chunk's data.
pub const CHUNK_FRAMING: usize = 12;

/// One PNG chunk. Data bytes stay in the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Offset of the length field.
    pub offset: usize,
    pub length: u32,
    pub kind: ChunkType,
    pub data: Span,
    /// Declared CRC, as stored. Never recomputed.
    pub crc: u32,
}

impl Chunk {
    /// Length, type, data and CRC, exactly as they appear in the input.
    pub fn span(&self) -> Span {
        Span::new(self.offset, CHUNK_FRAMING + self.data.len)
    }
}

/// Result of walking a PNG up to IEND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngWalk {
    pub chunks: Vec<Chunk>,
    /// Offset where chunk parsing stopped.
    pub end: usize,
    pub stop: WalkStop,
}

impl PngWalk {
    pub fn has_iend(&self) -> bool {
        self.stop == WalkStop::EndOfImage
    }

    /// Bytes after IEND (or after the last whole chunk).
    pub fn trailing(&self, total_len: usize) -> Span {
        Span::between(self.end, total_len)
    }

    pub fn truncation(&self) -> Option<UnsealError> {
        self.stop.as_error()
    }

    /// The incomplete chunk (and anything after it) when the walk hit damage.
    pub fn damaged_tail(&self, total_len: usize) -> Option<Span> {
        self.stop
            .is_damaged()
            .then(|| Span::between(self.end, total_len))
    }
}

/// Walk the chunks of a PNG buffer.
///
/// Fails only when `data` does not start with the PNG signature. A chunk
/// that runs past the end of the buffer ends the walk; the chunks collected
/// before it are returned.
pub fn walk(data: &[u8]) -> Result<PngWalk> {
    if !data.starts_with(&PNG_SIGNATURE) {
        return Err(UnsealError::MissingSignature {
            format: ImageFormat::Png,
        });
    }

    let mut chunks = Vec::new();
    let mut pos = PNG_SIGNATURE.len();

    let stop = loop {
        let remaining = data.len() - pos;
        if remaining == 0 {
            break WalkStop::Exhausted;
        }
        if remaining < CHUNK_FRAMING {
            break WalkStop::Truncated {
                offset: pos,
                needed: CHUNK_FRAMING - remaining,
            };
        }

        let length = u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]);
        let kind = ChunkType([data[pos + 4], data[pos + 5], data[pos + 6], data[pos + 7]]);

        let total = (length as usize).saturating_add(CHUNK_FRAMING);
        if total > remaining {
            break WalkStop::Truncated {
                offset: pos,
                needed: total - remaining,
            };
        }

        let data_span = Span::new(pos + 8, length as usize);
        let crc_at = data_span.end();
        let crc = u32::from_be_bytes([
            data[crc_at],
            data[crc_at + 1],
            data[crc_at + 2],
            data[crc_at + 3],
        ]);

        chunks.push(Chunk {
            offset: pos,
            length,
            kind,
            data: data_span,
            crc,
        });
        pos += total;

        if kind == ChunkType::IEND {
            break WalkStop::EndOfImage;
        }
    };

    Ok(PngWalk {
        chunks,
        end: pos,
        stop,
    })
}
