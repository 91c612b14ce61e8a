//! Separable Gaussian blur.
//!
//! The kernel is truncated at four standard deviations (radius
//! `round(4 * sigma)`) and normalized to sum to one. Borders are extended by
//! half-sample symmetric reflection:
//!
//! ```text
//! d c b a | a b c d | d c b a
//! ```
//!
//! Channels are filtered independently; the channel axis is never smoothed.

use crate::error::EditError;
use crate::raster::{Raster, RasterF32};

/// Largest accepted standard deviation.
pub const MAX_SIGMA: f64 = 10.0;

/// Build a normalized 1D Gaussian kernel of length `2 * radius + 1`.
pub(crate) fn gaussian_kernel(sigma: f64) -> Vec<f32> {
    let radius = (4.0 * sigma + 0.5) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f64> = (-radius..=radius)
        .map(|i| (-((i * i) as f64) / denom).exp())
        .collect();
    let sum: f64 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps.into_iter().map(|t| t as f32).collect()
}

/// Map an out-of-range index back into `0..n` by symmetric reflection.
#[inline]
pub(crate) fn reflect(i: isize, n: isize) -> u32 {
    let period = 2 * n;
    let mut i = i.rem_euclid(period);
    if i >= n {
        i = period - 1 - i;
    }
    i as u32
}

/// Convolve every channel with `kernel` along x, then along y.
pub(crate) fn convolve_separable(src: &RasterF32, kernel: &[f32]) -> RasterF32 {
    let radius = (kernel.len() / 2) as isize;
    let w = src.width() as isize;
    let h = src.height() as isize;

    let horizontal = RasterF32::from_fn(src.width(), src.height(), src.layout(), |x, y, c| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, &tap)| tap * src.get(reflect(x as isize + k as isize - radius, w), y, c))
            .sum()
    });

    RasterF32::from_fn(src.width(), src.height(), src.layout(), |x, y, c| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, &tap)| {
                tap * horizontal.get(x, reflect(y as isize + k as isize - radius, h), c)
            })
            .sum()
    })
}

/// Apply a Gaussian blur with standard deviation `sigma` (in pixels).
///
/// The output keeps the input's domain: 8-bit input is rounded back to `u8`,
/// float stays float, and a mask is smoothed as 0/1 and re-thresholded at 0.5.
///
/// # Errors
///
/// `ParameterOutOfRange` unless `0 < sigma <= 10`.
pub fn gaussian_blur(raster: &Raster, sigma: f64) -> Result<Raster, EditError> {
    if !(sigma > 0.0 && sigma <= MAX_SIGMA) {
        return Err(EditError::ParameterOutOfRange {
            name: "sigma",
            value: sigma,
            expected: format!("(0, {}]", MAX_SIGMA),
        });
    }

    let kernel = gaussian_kernel(sigma);

    Ok(match raster {
        Raster::U8(buf) => {
            let blurred = convolve_separable(&buf.map(|&v| v as f32), &kernel);
            Raster::U8(blurred.map(|&v| v.clamp(0.0, 255.0).round() as u8))
        }
        Raster::Float(buf) => Raster::Float(convolve_separable(buf, &kernel)),
        Raster::Mask(_) => {
            let blurred = convolve_separable(&raster.to_float(), &kernel);
            Raster::Mask(blurred.map(|&v| v >= 0.5))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{ChannelLayout, RasterU8};

    fn checkerboard(size: u32) -> Raster {
        Raster::U8(RasterU8::from_fn(size, size, ChannelLayout::Gray, |x, y, _| {
            if (x + y) % 2 == 0 {
                255
            } else {
                0
            }
        }))
    }

    fn variance(buf: &RasterU8) -> f64 {
        let n = buf.as_slice().len() as f64;
        let mean = buf.as_slice().iter().map(|&v| v as f64).sum::<f64>() / n;
        buf.as_slice()
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n
    }

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        for sigma in [0.1, 1.0, 3.0, 10.0] {
            let k = gaussian_kernel(sigma);
            let sum: f32 = k.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "sigma {} sums to {}", sigma, sum);
            assert_eq!(k.len() % 2, 1);
            for i in 0..k.len() / 2 {
                assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn test_kernel_radius() {
        assert_eq!(gaussian_kernel(1.0).len(), 9);
        assert_eq!(gaussian_kernel(3.0).len(), 25);
        // 4 * 0.1 + 0.5 truncates to 0: identity kernel
        assert_eq!(gaussian_kernel(0.1), vec![1.0]);
    }

    #[test]
    fn test_reflect() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
        assert_eq!(reflect(2, 4), 2);
        // Radius larger than the image keeps folding
        assert_eq!(reflect(9, 4), 1);
        assert_eq!(reflect(-7, 1), 0);
    }

    #[test]
    fn test_constant_image_unchanged() {
        let img = Raster::U8(RasterU8::filled(8, 6, ChannelLayout::Rgb, 77));
        let out = gaussian_blur(&img, 4.0).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_small_sigma_is_near_identity() {
        let img = checkerboard(8);
        let out = gaussian_blur(&img, 0.1).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_large_sigma_smooths_heavily() {
        let img = checkerboard(16);
        let out = gaussian_blur(&img, MAX_SIGMA).unwrap().to_u8();
        assert!(variance(&out) < variance(&img.to_u8()) / 100.0);
    }

    #[test]
    fn test_channels_are_independent() {
        // Red full, green/blue empty: blurring must not leak across channels
        let img = Raster::U8(RasterU8::from_fn(5, 5, ChannelLayout::Rgb, |_, _, c| {
            if c == 0 {
                255
            } else {
                0
            }
        }));
        let out = gaussian_blur(&img, 2.0).unwrap().to_u8();
        for px in out.as_slice().chunks_exact(3) {
            assert_eq!(px, &[255, 0, 0]);
        }
    }

    #[test]
    fn test_float_domain_preserved() {
        let img = Raster::Float(RasterF32::filled(4, 4, ChannelLayout::Gray, 0.5));
        let out = gaussian_blur(&img, 1.5).unwrap();
        assert!(matches!(out, Raster::Float(_)));
    }

    #[test]
    fn test_invalid_sigma() {
        let img = checkerboard(4);
        for sigma in [0.0, -1.0, 10.5, f64::NAN] {
            assert!(matches!(
                gaussian_blur(&img, sigma),
                Err(EditError::ParameterOutOfRange { name: "sigma", .. })
            ));
        }
        assert!(gaussian_blur(&img, 10.0).is_ok());
    }
}
