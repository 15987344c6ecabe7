//! Container identification from magic bytes.

use serde::{Deserialize, Serialize};

/// JPEG start-of-image marker.
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Container family of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Unknown,
}

impl ImageFormat {
    /// Short label for display (e.g. "JPEG").
    pub fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Unknown => "unknown",
        }
    }

    /// Preferred file extension; `None` for Unknown.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Jpeg => Some("jpg"),
            Self::Png => Some("png"),
            Self::Unknown => None,
        }
    }

    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            Self::Jpeg => Some("image/jpeg"),
            Self::Png => Some("image/png"),
            Self::Unknown => None,
        }
    }

    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            _ => Self::Unknown,
        }
    }

    pub fn is_supported(self) -> bool {
        self != Self::Unknown
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identify the container family. Never fails; unrecognised data is `Unknown`.
#[inline]
pub fn sniff(data: &[u8]) -> ImageFormat {
    if data.starts_with(&JPEG_SOI) {
        ImageFormat::Jpeg
    } else if data.starts_with(&PNG_SIGNATURE) {
        ImageFormat::Png
    } else {
        ImageFormat::Unknown
    }
}

/// Like [`sniff`], but a JPEG must also have a marker byte right after SOI.
///
/// The removal path uses this so that arbitrary data starting with `FF D8`
/// is not handed to a decoder or rebuilt as a JPEG.
#[inline]
pub fn sniff_strict(data: &[u8]) -> ImageFormat {
    match sniff(data) {
        ImageFormat::Jpeg if data.get(2) != Some(&0xFF) => ImageFormat::Unknown,
        format => format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(sniff(&[0xFF, 0xD8]), ImageFormat::Jpeg);
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
    }

    #[test]
    fn test_sniff_png() {
        assert_eq!(sniff(&PNG_SIGNATURE), ImageFormat::Png);
        // Seven bytes of the signature are not enough
        assert_eq!(sniff(&PNG_SIGNATURE[..7]), ImageFormat::Unknown);
    }

    #[test]
    fn test_sniff_unknown() {
        assert_eq!(sniff(b""), ImageFormat::Unknown);
        assert_eq!(sniff(b"GIF89a"), ImageFormat::Unknown);
        assert_eq!(sniff(&[0xD8, 0xFF]), ImageFormat::Unknown);
    }

    #[test]
    fn test_sniff_strict_requires_marker_after_soi() {
        assert_eq!(sniff_strict(&[0xFF, 0xD8]), ImageFormat::Unknown);
        assert_eq!(sniff_strict(&[0xFF, 0xD8, 0x00]), ImageFormat::Unknown);
        assert_eq!(sniff_strict(&[0xFF, 0xD8, 0xFF]), ImageFormat::Jpeg);
        assert_eq!(sniff_strict(&PNG_SIGNATURE), ImageFormat::Png);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormat::from_extension("JPG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("Png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("gif"), ImageFormat::Unknown);
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ImageFormat::Jpeg.mime_type(), Some("image/jpeg"));
        assert_eq!(ImageFormat::Png.extension(), Some("png"));
        assert_eq!(ImageFormat::Unknown.extension(), None);
        assert!(!ImageFormat::Unknown.is_supported());
        assert_eq!(ImageFormat::Png.to_string(), "PNG");
    }
}
