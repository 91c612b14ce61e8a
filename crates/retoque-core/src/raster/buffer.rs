//! Generic interleaved pixel buffer shared by every raster domain.

use serde::{Deserialize, Serialize};

/// Channel layout of a raster.
///
/// Only the layouts a decoder can hand us are representable, so a shape such
/// as `(H, W, 2)` cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// Single channel, shape `(H, W)`.
    Gray,
    /// Three channels, shape `(H, W, 3)`.
    Rgb,
    /// Four channels, shape `(H, W, 4)`. Alpha is the last channel.
    Rgba,
}

impl ChannelLayout {
    /// Number of interleaved samples per pixel.
    #[inline]
    pub fn count(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Layout for a given channel count, if supported.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Gray),
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }

    /// Sample count of a `width` x `height` buffer, or `None` if it
    /// overflows `usize`.
    pub fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.count())
    }

    /// True for the single-channel layout.
    #[inline]
    pub fn is_single_channel(self) -> bool {
        self == ChannelLayout::Gray
    }
}

/// A row-major, channel-interleaved image buffer.
///
/// Sample `(x, y, c)` lives at `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<T> {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    data: Vec<T>,
}

impl<T: Copy> PixelBuffer<T> {
    /// Wrap existing sample data.
    ///
    /// Returns `None` if `data.len()` does not equal
    /// `width * height * layout.count()`, or if that product overflows.
    pub fn from_vec(width: u32, height: u32, layout: ChannelLayout, data: Vec<T>) -> Option<Self> {
        let expected = layout.buffer_len(width, height)?;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Create a buffer with every sample set to `value`.
    ///
    /// Dimensions whose sample count overflows `usize` fail the allocation.
    pub fn filled(width: u32, height: u32, layout: ChannelLayout, value: T) -> Self {
        let len = layout.buffer_len(width, height).unwrap_or(usize::MAX);
        Self {
            width,
            height,
            layout,
            data: vec![value; len],
        }
    }

    /// Build a buffer by evaluating `f(x, y, channel)` for every sample.
    pub fn from_fn<F>(width: u32, height: u32, layout: ChannelLayout, mut f: F) -> Self
    where
        F: FnMut(u32, u32, usize) -> T,
    {
        let channels = layout.count();
        let mut data =
            Vec::with_capacity(layout.buffer_len(width, height).unwrap_or(usize::MAX));
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    data.push(f(x, y, c));
                }
            }
        }
        Self {
            width,
            height,
            layout,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.count()
    }

    /// Shape as `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, self.channels())
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the buffer and return its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32, channel: usize) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * self.channels() + channel
    }

    /// Read one sample. Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32, channel: usize) -> T {
        self.data[self.index(x, y, channel)]
    }

    /// All samples of one pixel.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[T] {
        let start = self.index(x, y, 0);
        &self.data[start..start + self.channels()]
    }

    /// Apply `f` to every sample, keeping the shape.
    pub fn map<U, F>(&self, f: F) -> PixelBuffer<U>
    where
        F: FnMut(&T) -> U,
    {
        PixelBuffer {
            width: self.width,
            height: self.height,
            layout: self.layout,
            data: self.data.iter().map(f).collect(),
        }
    }
}
