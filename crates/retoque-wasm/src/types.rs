//! WASM-compatible wrapper types for image data.
//!
//! JavaScript sees an image as dimensions, a channel count and a flat
//! `Uint8Array`; the core works on a tagged [`Raster`]. This module converts
//! between the two.

use retoque_core::normalize::CanonicalImage;
use retoque_core::raster::{ChannelLayout, Raster, RasterU8};
use wasm_bindgen::prelude::*;

/// An 8-bit image for JavaScript.
///
/// Pixels are interleaved and row-major, `channels` bytes per pixel (1 for
/// grayscale, 3 for RGB, 4 for RGBA).
///
/// The pixel data lives in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsRaster {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Wrap pixel data coming from JavaScript, e.g. a canvas `ImageData`
    /// buffer with `channels = 4`.
    ///
    /// The buffer is checked when the image is first used.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            channels,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel.
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the pixel data as a Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsRaster {
    pub(crate) fn from_buffer(buffer: RasterU8) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            channels: buffer.channels() as u8,
            pixels: buffer.into_vec(),
        }
    }

    /// Wrap any raster, converting float and mask data to 8 bits.
    pub(crate) fn from_raster(raster: &Raster) -> Self {
        match raster {
            Raster::U8(buf) => Self::from_buffer(buf.clone()),
            other => Self::from_buffer(other.to_u8()),
        }
    }

    pub(crate) fn from_canonical(image: CanonicalImage) -> Self {
        Self::from_buffer(image.into_buffer())
    }

    /// Convert to a core raster, copying the pixel data.
    ///
    /// Fails if `channels` is not 1, 3 or 4, or if the buffer length does not
    /// match `width * height * channels`.
    pub(crate) fn to_raster(&self) -> Result<Raster, String> {
        let layout = ChannelLayout::from_count(self.channels as usize)
            .ok_or_else(|| format!("Unsupported channel count: {}", self.channels))?;
        RasterU8::from_vec(self.width, self.height, layout, self.pixels.clone())
            .map(Raster::U8)
            .ok_or_else(|| {
                let expected = layout
                    .buffer_len(self.width, self.height)
                    .map_or_else(|| "too many".to_string(), |n| n.to_string());
                format!(
                    "Invalid pixel data: expected {} bytes ({}x{}x{}), got {}",
                    expected,
                    self.width,
                    self.height,
                    self.channels,
                    self.pixels.len()
                )
            })
    }
}
