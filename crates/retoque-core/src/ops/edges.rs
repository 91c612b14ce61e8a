//! Sobel edge detection.
//!
//! Each axis is filtered with a smoothing row `[1, 2, 1] / 4` across the
//! axis and a central difference `[-1, 0, 1]` along it, so a unit step yields
//! a derivative of 1. The magnitude is the root mean square of the two axis
//! derivatives:
//!
//! ```text
//! mag = sqrt((gx^2 + gy^2) / 2)
//! ```
//!
//! which keeps the result in `[0, 1]` for input in `[0, 1]`. Borders use the
//! same symmetric reflection as the blur.

use super::blur::reflect;
use crate::error::EditError;
use crate::raster::{to_grayscale, ChannelLayout, Raster, RasterF32};

const SMOOTH: [f32; 3] = [0.25, 0.5, 0.25];
const DIFF: [f32; 3] = [-1.0, 0.0, 1.0];

/// Sobel gradient magnitude of a single-channel float image.
///
/// Only channel 0 of `gray` is read.
pub fn sobel_magnitude(gray: &RasterF32) -> RasterF32 {
    let w = gray.width() as isize;
    let h = gray.height() as isize;

    RasterF32::from_fn(gray.width(), gray.height(), ChannelLayout::Gray, |x, y, _| {
        let mut gx = 0.0f32;
        let mut gy = 0.0f32;
        for (j, (&sy, &dy)) in SMOOTH.iter().zip(DIFF.iter()).enumerate() {
            let yy = reflect(y as isize + j as isize - 1, h);
            for (i, (&sx, &dx)) in SMOOTH.iter().zip(DIFF.iter()).enumerate() {
                let xx = reflect(x as isize + i as isize - 1, w);
                let v = gray.get(xx, yy, 0);
                gx += sy * dx * v;
                gy += dy * sx * v;
            }
        }
        ((gx * gx + gy * gy) / 2.0).sqrt()
    })
}

/// Detect edges in a color raster.
///
/// The input is converted to float luminance in `[0, 1]` and the Sobel
/// gradient magnitude is returned as a single-channel float raster.
///
/// # Errors
///
/// `ShapeMismatch` for single-channel input; convert it to RGB first.
pub fn detect_edges(raster: &Raster) -> Result<Raster, EditError> {
    if raster.layout().is_single_channel() {
        return Err(EditError::ShapeMismatch {
            operation: "EdgeDetect",
            expected: "RGB or RGBA",
            actual: raster.channels(),
        });
    }

    let gray = match to_grayscale(&Raster::Float(raster.to_float())) {
        Raster::Float(buf) => buf,
        other => other.to_float(),
    };

    Ok(Raster::Float(sobel_magnitude(&gray)))
}
