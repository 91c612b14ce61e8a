//! PNG encoding of canonical images.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::normalize::CanonicalImage;
use crate::raster::ChannelLayout;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a canonical image as PNG bytes.
///
/// Grayscale images are written as 8-bit luma, RGB images as 8-bit RGB.
///
/// # Errors
///
/// `InvalidDimensions` for an empty image, `EncodingFailed` if the encoder
/// rejects the data.
pub fn encode_png(image: &CanonicalImage) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if image.as_buffer().is_empty() {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let color = match image.layout() {
        ChannelLayout::Gray => ExtendedColorType::L8,
        _ => ExtendedColorType::Rgb8,
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(image.pixels(), width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
