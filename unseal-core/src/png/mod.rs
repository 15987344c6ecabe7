//! PNG chunk walking and selective chunk copy.

mod strip;
mod walker;

pub use strip::strip;
pub use walker::{walk, Chunk, PngWalk, CHUNK_FRAMING};

use std::fmt::{self, Write};

/// Four-byte ASCII chunk tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);

#[allow(non_upper_case_globals)]
impl ChunkType {
    pub const IHDR: Self = Self(*b"IHDR");
    pub const IDAT: Self = Self(*b"IDAT");
    pub const IEND: Self = Self(*b"IEND");
    pub const tEXt: Self = Self(*b"tEXt");
    pub const iTXt: Self = Self(*b"iTXt");
    pub const zTXt: Self = Self(*b"zTXt");
    /// JUMBF manifest store chunk written by C2PA tooling.
    pub const caBX: Self = Self(*b"caBX");

    /// Uncompressed text chunks, whose bytes can be searched directly.
    pub fn is_text(self) -> bool {
        self == Self::tEXt || self == Self::iTXt
    }

    /// Ancillary chunks have a lowercase first letter.
    pub fn is_ancillary(self) -> bool {
        self.0[0].is_ascii_lowercase()
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                f.write_char(b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_type_display() {
        assert_eq!(ChunkType::iTXt.to_string(), "iTXt");
        assert_eq!(ChunkType([b'a', 0, b'b', b'c']).to_string(), "a\\x00bc");
        assert_eq!(format!("{:?}", ChunkType::IEND), "ChunkType(IEND)");
    }

    #[test]
    fn test_chunk_type_classes() {
        assert!(ChunkType::tEXt.is_text());
        assert!(ChunkType::iTXt.is_text());
        assert!(!ChunkType::zTXt.is_text());
        assert!(ChunkType::caBX.is_ancillary());
        assert!(!ChunkType::IDAT.is_ancillary());
    }
}
