//! Per-pixel operations: photometric negative and thresholding.

use crate::error::{check_range, EditError};
use crate::raster::Raster;

/// Produce the photometric negative.
///
/// `255 - v` for 8-bit samples, `1.0 - v` for float samples and logical not
/// for masks. Every channel is inverted, alpha included.
pub fn invert(raster: &Raster) -> Raster {
    match raster {
        Raster::U8(buf) => Raster::U8(buf.map(|&v| 255 - v)),
        Raster::Float(buf) => Raster::Float(buf.map(|&v| 1.0 - v)),
        Raster::Mask(buf) => Raster::Mask(buf.map(|&v| !v)),
    }
}

/// Threshold a single-channel raster into a mask.
///
/// A pixel is set when its value is strictly greater than `threshold`.
/// The threshold is always given on the 8-bit scale; for float input it is
/// compared against `v * 255` so both domains agree.
///
/// # Errors
///
/// `ShapeMismatch` for multi-channel input (convert to grayscale first) and
/// `ParameterOutOfRange` unless `0 <= threshold <= 255`.
pub fn binarize(raster: &Raster, threshold: f64) -> Result<Raster, EditError> {
    check_range("threshold", threshold, 0.0, 255.0)?;
    if !raster.layout().is_single_channel() {
        return Err(EditError::ShapeMismatch {
            operation: "Binarize",
            expected: "single-channel",
            actual: raster.channels(),
        });
    }

    let mask = match raster {
        Raster::U8(buf) => buf.map(|&v| v as f64 > threshold),
        Raster::Float(buf) => buf.map(|&v| v as f64 * 255.0 > threshold),
        Raster::Mask(buf) => buf.map(|&v| v && threshold < 255.0),
    };
    Ok(Raster::Mask(mask))
}
