//! In-memory raster model.
//!
//! A [`Raster`] tags its pixel data with the value domain it lives in, so the
//! consumer never has to remember which operation produced it:
//!
//! | Variant | Sample type | Domain |
//! |---|---|---|
//! | [`Raster::U8`] | `u8` | `[0, 255]` |
//! | [`Raster::Float`] | `f32` | nominally `[0.0, 1.0]`, may overshoot |
//! | [`Raster::Mask`] | `bool` | `{false, true}` |
//!
//! Rasters are never mutated in place. Every operation and conversion returns
//! a new value.

mod buffer;
mod convert;

pub use buffer::{ChannelLayout, PixelBuffer};
pub use convert::{
    float_to_u8, luminance, to_grayscale, to_rgb, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R,
};

use serde::{Deserialize, Serialize};

/// 8-bit raster, the form produced by decoding.
pub type RasterU8 = PixelBuffer<u8>;

/// Floating-point raster in the nominal `[0.0, 1.0]` range.
pub type RasterF32 = PixelBuffer<f32>;

/// Boolean raster (binary mask).
pub type Mask = PixelBuffer<bool>;

/// Value domain of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    U8,
    Float,
    Mask,
}

/// An image tagged with its value domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    U8(RasterU8),
    Float(RasterF32),
    Mask(Mask),
}

impl Raster {
    pub fn width(&self) -> u32 {
        match self {
            Raster::U8(b) => b.width(),
            Raster::Float(b) => b.width(),
            Raster::Mask(b) => b.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Raster::U8(b) => b.height(),
            Raster::Float(b) => b.height(),
            Raster::Mask(b) => b.height(),
        }
    }

    pub fn layout(&self) -> ChannelLayout {
        match self {
            Raster::U8(b) => b.layout(),
            Raster::Float(b) => b.layout(),
            Raster::Mask(b) => b.layout(),
        }
    }

    /// Number of channels (1, 3 or 4).
    pub fn channels(&self) -> usize {
        self.layout().count()
    }

    /// Shape as `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height() as usize, self.width() as usize, self.channels())
    }

    pub fn domain(&self) -> Domain {
        match self {
            Raster::U8(_) => Domain::U8,
            Raster::Float(_) => Domain::Float,
            Raster::Mask(_) => Domain::Mask,
        }
    }

    /// Convert to the float domain: `u8 / 255`, masks become `0.0` / `1.0`.
    pub fn to_float(&self) -> RasterF32 {
        match self {
            Raster::U8(b) => b.map(|&v| v as f32 / 255.0),
            Raster::Float(b) => b.clone(),
            Raster::Mask(b) => b.map(|&v| if v { 1.0 } else { 0.0 }),
        }
    }

    /// Convert to the 8-bit domain: floats are clamped to `[0, 1]` and
    /// scaled, masks become `0` / `255`.
    pub fn to_u8(&self) -> RasterU8 {
        match self {
            Raster::U8(b) => b.clone(),
            Raster::Float(b) => b.map(|&v| float_to_u8(v)),
            Raster::Mask(b) => b.map(|&v| if v { 255 } else { 0 }),
        }
    }
}

impl From<RasterU8> for Raster {
    fn from(buf: RasterU8) -> Self {
        Raster::U8(buf)
    }
}

impl From<RasterF32> for Raster {
    fn from(buf: RasterF32) -> Self {
        Raster::Float(buf)
    }
}

impl From<Mask> for Raster {
    fn from(buf: Mask) -> Self {
        Raster::Mask(buf)
    }
}
