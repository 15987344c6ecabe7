//! Smart-mode removal: decode to pixels and encode a fresh container.
//!
//! Only pixel data survives the round trip, so APP segments and ancillary
//! chunks are gone by construction. The cost is a lossy re-compression for
//! JPEG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage};

use crate::config::DEFAULT_JPEG_QUALITY;
use crate::error::{Result, UnsealError};
use crate::format::ImageFormat;

/// Decode/re-encode round trip for JPEG and PNG.
#[derive(Debug, Clone, Copy)]
pub struct Reencoder {
    jpeg_quality: u8,
}

impl Default for Reencoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl Reencoder {
    /// Create a re-encoder. Quality is clamped to 1-100.
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Decode `data` as `format` and encode the pixels into a new container
    /// of the same family.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for [`ImageFormat::Unknown`], `DecodeFailure` when
    /// the codec rejects the input, `EncodeFailure` when writing fails.
    pub fn reencode(&self, data: &[u8], format: ImageFormat) -> Result<Vec<u8>> {
        let codec_format = match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Unknown => return Err(UnsealError::UnsupportedFormat),
        };

        let image = image::load_from_memory_with_format(data, codec_format)
            .map_err(|e| UnsealError::DecodeFailure(format!("Failed to decode {format}: {e}")))?;

        let mut out = Cursor::new(Vec::with_capacity(data.len()));
        let written = match format {
            ImageFormat::Jpeg => jpeg_compatible(image).write_with_encoder(
                JpegEncoder::new_with_quality(&mut out, self.jpeg_quality),
            ),
            _ => png_compatible(image).write_with_encoder(PngEncoder::new(&mut out)),
        };
        written
            .map_err(|e| UnsealError::EncodeFailure(format!("Failed to encode {format}: {e}")))?;

        Ok(out.into_inner())
    }
}

/// The baseline JPEG encoder takes 8-bit grey or RGB without alpha.
fn jpeg_compatible(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image,
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            DynamicImage::ImageLuma8(image.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}

/// PNG has no floating point sample formats.
fn png_compatible(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => image,
    }
}
