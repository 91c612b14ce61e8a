//! Mirror a raster along one spatial axis.

use serde::{Deserialize, Serialize};

use crate::raster::{PixelBuffer, Raster};

/// Axis to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipDirection {
    /// Reverse the rows (upside down). Index 0.
    #[default]
    Vertical,
    /// Reverse the columns (mirror image). Index 1.
    Horizontal,
}

impl FlipDirection {
    /// Map the array axis index (0 = rows, 1 = columns) to a direction.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(FlipDirection::Vertical),
            1 => Some(FlipDirection::Horizontal),
            _ => None,
        }
    }

    /// Parse a direction name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" => Some(FlipDirection::Vertical),
            "horizontal" | "h" => Some(FlipDirection::Horizontal),
            _ => None,
        }
    }
}

fn flip_buffer<T: Copy>(buf: &PixelBuffer<T>, direction: FlipDirection) -> PixelBuffer<T> {
    let (w, h) = (buf.width(), buf.height());
    PixelBuffer::from_fn(w, h, buf.layout(), |x, y, c| match direction {
        FlipDirection::Vertical => buf.get(x, h - 1 - y, c),
        FlipDirection::Horizontal => buf.get(w - 1 - x, y, c),
    })
}

/// Flip a raster. Shape and domain are unchanged and the channel order
/// within each pixel is preserved.
pub fn flip(raster: &Raster, direction: FlipDirection) -> Raster {
    match raster {
        Raster::U8(buf) => Raster::U8(flip_buffer(buf, direction)),
        Raster::Float(buf) => Raster::Float(flip_buffer(buf, direction)),
        Raster::Mask(buf) => Raster::Mask(flip_buffer(buf, direction)),
    }
}
