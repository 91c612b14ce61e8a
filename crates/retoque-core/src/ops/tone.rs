//! Brightness (gamma) adjustment.

use crate::error::{check_range, EditError};
use crate::raster::Raster;

/// Inclusive bounds shared by the gamma and contrast parameters.
pub const GAMMA_RANGE: (f64, f64) = (0.5, 1.5);

/// Adjust brightness by gamma correction and return a float raster.
///
/// Samples are normalized to `[0, 1]` (8-bit input is divided by 255), raised
/// to `gamma`, then rescaled from the input range `(0, 1)` to the output
/// range `(0, 1)`, which clips anything outside it. `gamma < 1` brightens the
/// midtones and `gamma > 1` darkens them; black and white are fixed points.
///
/// `contrast` is range-checked but has no effect on the output. The rescale
/// step maps `[0, 1]` onto itself, so there is nothing left for a contrast
/// factor to act on. This keeps the editor's historical gamma-only behavior.
///
/// # Errors
///
/// `ParameterOutOfRange` unless both parameters lie in `[0.5, 1.5]`.
pub fn adjust_brightness_contrast(
    raster: &Raster,
    gamma: f64,
    contrast: f64,
) -> Result<Raster, EditError> {
    check_range("gamma", gamma, GAMMA_RANGE.0, GAMMA_RANGE.1)?;
    check_range("contrast", contrast, GAMMA_RANGE.0, GAMMA_RANGE.1)?;

    let gamma = gamma as f32;
    let adjusted = raster
        .to_float()
        .map(|&v| rescale_unit(v.max(0.0).powf(gamma)));
    Ok(Raster::Float(adjusted))
}

/// Rescale intensity from `(0, 1)` to `(0, 1)`: values outside are clipped.
#[inline]
fn rescale_unit(v: f32) -> f32 {
    const IN_MIN: f32 = 0.0;
    const IN_MAX: f32 = 1.0;
    const OUT_MIN: f32 = 0.0;
    const OUT_MAX: f32 = 1.0;
    let clipped = v.clamp(IN_MIN, IN_MAX);
    OUT_MIN + (clipped - IN_MIN) / (IN_MAX - IN_MIN) * (OUT_MAX - OUT_MIN)
}
