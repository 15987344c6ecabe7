//! C2PA signature detection.
//!
//! Detection favours recall: anything that looks like C2PA or CAI metadata
//! counts, and false positives are accepted.
//!
//! # JPEG
//!
//! - Any APP11 segment is conclusive. JUMBF boxes, and with them C2PA
//!   manifest stores, are carried there.
//! - An APP1 segment holding an XMP packet is searched, ignoring ASCII case,
//!   for the C2PA namespace, manifest or claim tags, and a few related words.
//!
//! Only segments before the first SOS are looked at.
//!
//! # PNG
//!
//! - The whole byte stream is searched, case-sensitively, for C2PA marker
//!   strings. Chunk typing for C2PA in PNG is not settled, so chunk
//!   boundaries are not trusted here.
//! - Every `tEXt`/`iTXt` chunk is searched ignoring ASCII case, and a `caBX`
//!   chunk is conclusive.

mod evidence;

pub use evidence::Evidence;

use serde::Serialize;
use tracing::debug;

use crate::format::{sniff, ImageFormat};
use crate::jpeg::{self, JpegWalk, Segment, APP1, APP11};
use crate::png::{self, Chunk, ChunkType, PngWalk};

/// XMP packets in APP1 start with this namespace and a NUL.
pub const XMP_PREFIX: &[u8] = b"http://ns.adobe.com/xap/1.0/";
pub const C2PA_NAMESPACE: &str = "http://c2pa.org/";
pub const C2PA_MANIFEST_TAG: &str = "c2pa:manifest";
pub const C2PA_CLAIM_TAG: &str = "c2pa:claim";

/// Searched in XMP packets, ignoring case. More specific entries first.
const XMP_KEYWORDS: &[&str] = &[
    C2PA_NAMESPACE,
    C2PA_MANIFEST_TAG,
    C2PA_CLAIM_TAG,
    "c2pa",
    "contentauthenticity",
    "contentcredentials",
    "cai",
    "jumbf",
];

/// Searched in raw PNG bytes, case-sensitive.
const PNG_RAW_NEEDLES: &[&str] = &[
    "C2PA",
    "c2pa",
    "cai:",
    "contentauthenticity",
    "contentcredentials",
];

/// Searched in PNG text chunks, ignoring case.
const PNG_TEXT_NEEDLES: &[&str] = &["c2pa", "cai:", "contentauthenticity", "contentcredentials"];

/// Offset of the JUMBF description label inside an APP11 payload:
/// CI(2) En(2) Z(4) LBox(4) "jumb"(4) LBox(4) "jumd"(4), then the UUID.
const JUMBF_LABEL_OFFSET: usize = 24;
const JUMBF_C2PA_LABEL: &[u8] = b"c2pa";

/// Result of inspecting one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub format: ImageFormat,
    pub evidence: Option<Evidence>,
}

impl Detection {
    pub fn is_detected(&self) -> bool {
        self.evidence.is_some()
    }
}

/// The C2PA signature detector.
#[derive(Debug, Clone)]
pub struct Detector {
    xmp_keywords: &'static [&'static str],
    raw_needles: &'static [&'static str],
    text_needles: &'static [&'static str],
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            xmp_keywords: XMP_KEYWORDS,
            raw_needles: PNG_RAW_NEEDLES,
            text_needles: PNG_TEXT_NEEDLES,
        }
    }
}

impl Detector {
    /// Inspect a buffer of any format. Never fails.
    pub fn scan(&self, data: &[u8]) -> Detection {
        let format = sniff(data);
        let evidence = match format {
            ImageFormat::Jpeg => jpeg::walk(data)
                .ok()
                .and_then(|walk| self.scan_jpeg(data, &walk)),
            ImageFormat::Png => self.scan_png(data, png::walk(data).ok().as_ref()),
            ImageFormat::Unknown => None,
        };

        if let Some(evidence) = &evidence {
            debug!(format = %format, evidence = %evidence, "C2PA metadata detected");
        }

        Detection { format, evidence }
    }

    /// First flagged segment of a walked JPEG.
    pub fn scan_jpeg(&self, data: &[u8], walk: &JpegWalk) -> Option<Evidence> {
        walk.segments
            .iter()
            .find_map(|segment| self.segment_evidence(data, segment))
    }

    /// Raw byte search first, then the text and manifest chunks of `walk`.
    pub fn scan_png(&self, data: &[u8], walk: Option<&PngWalk>) -> Option<Evidence> {
        self.raw_evidence(data).or_else(|| {
            walk?
                .chunks
                .iter()
                .enumerate()
                .find_map(|(index, chunk)| self.chunk_evidence(data, index, chunk))
        })
    }

    /// Whether a JPEG segment matches the C2PA criteria.
    pub fn segment_evidence(&self, data: &[u8], segment: &Segment) -> Option<Evidence> {
        let payload = segment.payload.slice(data);
        match segment.marker {
            APP11 => Some(Evidence::App11Segment {
                offset: segment.offset,
                jumbf_label: payload
                    .get(JUMBF_LABEL_OFFSET..JUMBF_LABEL_OFFSET + JUMBF_C2PA_LABEL.len())
                    == Some(JUMBF_C2PA_LABEL),
            }),
            APP1 if payload.starts_with(XMP_PREFIX) => self
                .xmp_keywords
                .iter()
                .find(|keyword| find_ignore_case(payload, keyword.as_bytes()).is_some())
                .map(|&keyword| Evidence::XmpKeyword {
                    offset: segment.offset,
                    keyword,
                }),
            _ => None,
        }
    }

    /// Whether a PNG chunk matches the C2PA criteria.
    pub fn chunk_evidence(&self, data: &[u8], index: usize, chunk: &Chunk) -> Option<Evidence> {
        if chunk.kind == ChunkType::caBX {
            return Some(Evidence::ManifestChunk { index });
        }
        if !chunk.kind.is_text() {
            return None;
        }
        let text = chunk.data.slice(data);
        self.text_needles
            .iter()
            .find(|needle| find_ignore_case(text, needle.as_bytes()).is_some())
            .map(|&needle| Evidence::TextChunk {
                index,
                chunk_type: chunk.kind,
                needle,
            })
    }

    fn raw_evidence(&self, data: &[u8]) -> Option<Evidence> {
        self.raw_needles.iter().find_map(|&needle| {
            find(data, needle.as_bytes()).map(|offset| Evidence::RawSignature { offset, needle })
        })
    }
}

/// Whether `data` carries C2PA metadata. Unrecognised containers yield `false`.
pub fn detect(data: &[u8]) -> bool {
    inspect(data).is_detected()
}

/// Detection with the format and the evidence behind a positive answer.
pub fn inspect(data: &[u8]) -> Detection {
    Detector::default().scan(data)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn find_ignore_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
