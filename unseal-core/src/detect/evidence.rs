//! Evidence attached to a positive detection.
//!
//! Evidence is for diagnostics only. The detection result is the boolean;
//! the first piece of evidence found is kept to explain it.

use std::fmt;

use serde::Serialize;

use crate::png::ChunkType;

/// What made the detector answer `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// A JPEG APP11 segment. Conclusive on its own.
    App11Segment {
        offset: usize,
        /// The payload carries the `c2pa` JUMBF description label.
        jumbf_label: bool,
    },
    /// A JPEG XMP packet mentioning C2PA.
    XmpKeyword {
        offset: usize,
        keyword: &'static str,
    },
    /// A C2PA marker string anywhere in a PNG byte stream.
    RawSignature {
        offset: usize,
        needle: &'static str,
    },
    /// A PNG text chunk mentioning C2PA.
    TextChunk {
        index: usize,
        #[serde(serialize_with = "serialize_chunk_type")]
        chunk_type: ChunkType,
        needle: &'static str,
    },
    /// A PNG `caBX` manifest store chunk.
    ManifestChunk { index: usize },
}

fn serialize_chunk_type<S: serde::Serializer>(
    chunk_type: &ChunkType,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(chunk_type)
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App11Segment {
                offset,
                jumbf_label: true,
            } => write!(f, "APP11 segment with c2pa JUMBF box at offset {offset}"),
            Self::App11Segment { offset, .. } => write!(f, "APP11 segment at offset {offset}"),
            Self::XmpKeyword { offset, keyword } => {
                write!(f, "XMP packet at offset {offset} mentions \"{keyword}\"")
            }
            Self::RawSignature { offset, needle } => {
                write!(f, "\"{needle}\" found at offset {offset}")
            }
            Self::TextChunk {
                index,
                chunk_type,
                needle,
            } => write!(f, "{chunk_type} chunk #{index} mentions \"{needle}\""),
            Self::ManifestChunk { index } => write!(f, "caBX manifest chunk #{index}"),
        }
    }
}
