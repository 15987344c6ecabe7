//! Why a segment or chunk walk ended.

use crate::error::UnsealError;

/// Reason a walker stopped producing entries.
///
/// Only the last two variants describe damaged input. Both are recovered
/// locally: the walk keeps whatever it collected before the damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStop {
    /// JPEG EOI or PNG IEND was emitted.
    EndOfImage,
    /// JPEG SOS header was emitted; the rest is entropy-coded data.
    StartOfScan,
    /// Ran out of bytes on an entry boundary.
    Exhausted,
    /// An entry's declared size runs past the end of the buffer.
    Truncated { offset: usize, needed: usize },
    /// A JPEG length field below 2.
    InvalidLength { offset: usize, length: u16 },
}

impl WalkStop {
    pub fn is_damaged(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::InvalidLength { .. })
    }

    /// The parser-level error behind a damaged walk, for diagnostics.
    pub fn as_error(&self) -> Option<UnsealError> {
        match *self {
            Self::Truncated { offset, needed } => {
                Some(UnsealError::TruncatedInput { offset, needed })
            }
            Self::InvalidLength { offset, length } => {
                Some(UnsealError::InvalidLength { offset, length })
            }
            _ => None,
        }
    }
}
