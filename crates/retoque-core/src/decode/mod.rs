//! Decoding uploaded files into a [`Raster`].
//!
//! PNG and JPEG are supported through the `image` crate. Sources without
//! color (grayscale, with or without alpha) decode to a single-channel
//! raster; everything else decodes to 8-bit RGB. Alpha is always dropped.
//!
//! ```ignore
//! use retoque_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", raster.width(), raster.height());
//! ```

use std::io::Cursor;

use image::{DynamicImage, ImageError, ImageReader};
use log::debug;
use thiserror::Error;

use crate::raster::{ChannelLayout, Raster, RasterU8};

/// Error types for image decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not in a recognized or supported format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The file is recognized but corrupted or truncated.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image has no pixels.
    #[error("Image has zero width or height")]
    EmptyImage,
}

/// Decode PNG or JPEG bytes into an 8-bit raster.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format can't be identified,
/// `DecodeError::CorruptedFile` if decoding fails part way and
/// `DecodeError::EmptyImage` for a zero-sized image.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }

    debug!(
        "decoded {:?} {}x{} ({:?})",
        format,
        img.width(),
        img.height(),
        img.color()
    );

    into_raster(img)
}

fn into_raster(img: DynamicImage) -> Result<Raster, DecodeError> {
    let (width, height, layout, data) = if img.color().has_color() {
        let rgb = img.into_rgb8();
        let (w, h) = rgb.dimensions();
        (w, h, ChannelLayout::Rgb, rgb.into_raw())
    } else {
        let luma = img.into_luma8();
        let (w, h) = luma.dimensions();
        (w, h, ChannelLayout::Gray, luma.into_raw())
    };

    RasterU8::from_vec(width, height, layout, data)
        .map(Raster::U8)
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer size mismatch".to_string()))
}
