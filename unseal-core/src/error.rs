use thiserror::Error;

use crate::format::ImageFormat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsealError {
    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Missing {format} signature")]
    MissingSignature { format: ImageFormat },

    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    #[error("Encode failure: {0}")]
    EncodeFailure(String),

    #[error("Truncated input: {needed} bytes needed at offset {offset}")]
    TruncatedInput { offset: usize, needed: usize },

    #[error("Invalid segment length {length} at offset {offset}")]
    InvalidLength { offset: usize, length: u16 },

    #[error("No removable C2PA metadata found")]
    NoRemovableMetadataFound,

    #[error("C2PA metadata still present after removal")]
    VerificationFailure,
}

pub type Result<T> = std::result::Result<T, UnsealError>;
