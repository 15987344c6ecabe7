//! JPEG marker-segment walking and selective segment copy.

mod strip;
mod walker;

pub use strip::strip;
pub use walker::{walk, JpegWalk, Segment};

/// Temporary private use marker (no length field).
pub const TEM: u8 = 0x01;
/// First restart marker; RST0-RST7 carry no length field.
pub const RST0: u8 = 0xD0;
pub const RST7: u8 = 0xD7;
pub const SOI: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOS: u8 = 0xDA;
pub const APP0: u8 = 0xE0;
/// APP1: EXIF and XMP.
pub const APP1: u8 = 0xE1;
/// APP11: JPEG XT boxes, where JUMBF/C2PA manifests are carried.
pub const APP11: u8 = 0xEB;
pub const APP15: u8 = 0xEF;

/// Markers that stand alone, without a length field.
#[inline]
pub fn is_standalone(marker: u8) -> bool {
    matches!(marker, RST0..=RST7 | TEM)
}
