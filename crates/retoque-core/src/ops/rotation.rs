//! Same-canvas rotation about the image center.
//!
//! The rotation uses inverse mapping: for each pixel in the output image we
//! compute the source position it came from and interpolate there. The canvas
//! is never resized, so corners that leave the frame are discarded and areas
//! uncovered by the source are zero-filled.
//!
//! For rotation by angle θ (positive = counter-clockwise) around the pixel
//! grid center `(cx, cy) = ((w - 1) / 2, (h - 1) / 2)`:
//!
//! ```text
//! src_x =  (dst_x - cx) * cos(θ) - (dst_y - cy) * sin(θ) + cx
//! src_y =  (dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + cy
//! ```
//!
//! (y grows downward, hence the sign pattern.) Color and float rasters are
//! sampled bilinearly; masks use nearest neighbour so they stay binary.

use crate::error::{check_range, EditError};
use crate::raster::{PixelBuffer, Raster, RasterF32};

/// Positions this close outside the source grid still snap onto its edge.
const EDGE_TOLERANCE: f64 = 1e-6;

/// Inverse mapping from a destination pixel to its source position.
#[derive(Debug, Clone, Copy)]
struct InverseRotation {
    cos: f64,
    sin: f64,
    cx: f64,
    cy: f64,
}

impl InverseRotation {
    fn new(width: u32, height: u32, angle_degrees: f64) -> Self {
        let angle_rad = angle_degrees.to_radians();
        Self {
            cos: angle_rad.cos(),
            sin: angle_rad.sin(),
            cx: (width as f64 - 1.0) / 2.0,
            cy: (height as f64 - 1.0) / 2.0,
        }
    }

    #[inline]
    fn source(&self, dst_x: u32, dst_y: u32) -> (f64, f64) {
        let dx = dst_x as f64 - self.cx;
        let dy = dst_y as f64 - self.cy;
        (
            dx * self.cos - dy * self.sin + self.cx,
            dx * self.sin + dy * self.cos + self.cy,
        )
    }
}

/// Snap `v` into `[0, n - 1]`, or `None` if it lies outside the grid.
#[inline]
fn clamp_to_grid(v: f64, n: u32) -> Option<f64> {
    let max = n as f64 - 1.0;
    if v < -EDGE_TOLERANCE || v > max + EDGE_TOLERANCE {
        return None;
    }
    Some(v.clamp(0.0, max))
}

/// Sample channel `c` with bilinear interpolation; zero outside the image.
fn sample_bilinear(image: &RasterF32, x: f64, y: f64, c: usize) -> f32 {
    let (Some(x), Some(y)) = (
        clamp_to_grid(x, image.width()),
        clamp_to_grid(y, image.height()),
    ) else {
        return 0.0;
    };

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);

    // Fractional distances
    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let p00 = image.get(x0, y0, c);
    let p10 = image.get(x1, y0, c);
    let p01 = image.get(x0, y1, c);
    let p11 = image.get(x1, y1, c);

    p00 * (1.0 - fx) * (1.0 - fy) + p10 * fx * (1.0 - fy) + p01 * (1.0 - fx) * fy + p11 * fx * fy
}

/// Sample channel `c` of the nearest pixel; `fill` outside the image.
fn sample_nearest<T: Copy>(image: &PixelBuffer<T>, x: f64, y: f64, c: usize, fill: T) -> T {
    match (
        clamp_to_grid(x, image.width()),
        clamp_to_grid(y, image.height()),
    ) {
        (Some(x), Some(y)) => image.get(x.round() as u32, y.round() as u32, c),
        _ => fill,
    }
}

fn rotate_float(image: &RasterF32, rotation: &InverseRotation) -> RasterF32 {
    RasterF32::from_fn(image.width(), image.height(), image.layout(), |x, y, c| {
        let (sx, sy) = rotation.source(x, y);
        sample_bilinear(image, sx, sy, c)
    })
}

/// Rotate a raster by `angle_degrees` without changing its dimensions.
///
/// The domain is preserved. 8-bit samples are interpolated in float and
/// rounded back.
///
/// # Errors
///
/// `ParameterOutOfRange` unless `-180 <= angle_degrees <= 180`.
pub fn rotate(raster: &Raster, angle_degrees: f64) -> Result<Raster, EditError> {
    check_range("angle", angle_degrees, -180.0, 180.0)?;

    // Fast path: no rotation needed
    if angle_degrees.abs() < 0.001 || raster.width() == 0 || raster.height() == 0 {
        return Ok(raster.clone());
    }

    let rotation = InverseRotation::new(raster.width(), raster.height(), angle_degrees);

    Ok(match raster {
        Raster::U8(buf) => {
            let rotated = rotate_float(&buf.map(|&v| v as f32), &rotation);
            Raster::U8(rotated.map(|&v| v.clamp(0.0, 255.0).round() as u8))
        }
        Raster::Float(buf) => Raster::Float(rotate_float(buf, &rotation)),
        Raster::Mask(buf) => Raster::Mask(PixelBuffer::from_fn(
            buf.width(),
            buf.height(),
            buf.layout(),
            |x, y, c| {
                let (sx, sy) = rotation.source(x, y);
                sample_nearest(buf, sx, sy, c, false)
            },
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{flip, FlipDirection};
    use crate::raster::{ChannelLayout, Mask, RasterU8};

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> Raster {
        Raster::U8(RasterU8::from_fn(width, height, ChannelLayout::Rgb, |x, y, _| {
            ((x + y) * 8) as u8
        }))
    }

    #[test]
    fn test_no_rotation() {
        let img = test_image(20, 10);
        assert_eq!(rotate(&img, 0.0).unwrap(), img);
    }

    #[test]
    fn test_tiny_rotation_fast_path() {
        let img = test_image(20, 10);
        assert_eq!(rotate(&img, 0.0001).unwrap(), img);
    }

    #[test]
    fn test_rotation_never_reshapes() {
        let img = test_image(30, 12);
        for angle in [-180.0, -135.0, -90.0, -30.0, 15.0, 45.0, 90.0, 179.0, 180.0] {
            let out = rotate(&img, angle).unwrap();
            assert_eq!(out.shape(), img.shape(), "angle {}", angle);
        }
    }

    #[test]
    fn test_180_matches_double_flip() {
        let img = test_image(9, 7);
        let expected = flip(
            &flip(&img, FlipDirection::Vertical),
            FlipDirection::Horizontal,
        );
        assert_eq!(rotate(&img, 180.0).unwrap(), expected);
        assert_eq!(rotate(&img, -180.0).unwrap(), expected);
    }

    #[test]
    fn test_90_degrees_counter_clockwise() {
        // Square image with a single bright pixel at the top-right corner
        let buf = RasterU8::from_fn(5, 5, ChannelLayout::Gray, |x, y, _| {
            if x == 4 && y == 0 {
                255
            } else {
                0
            }
        });
        let out = rotate(&Raster::U8(buf), 90.0).unwrap().to_u8();
        // Counter-clockwise turns top-right into top-left
        assert_eq!(out.get(0, 0, 0), 255);
        assert_eq!(out.get(4, 0, 0), 0);
    }

    #[test]
    fn test_uncovered_corners_are_zero_filled() {
        let img = Raster::U8(RasterU8::filled(21, 21, ChannelLayout::Rgb, 200));
        let out = rotate(&img, 45.0).unwrap().to_u8();
        assert_eq!(out.pixel(0, 0), &[0, 0, 0]);
        assert_eq!(out.pixel(20, 20), &[0, 0, 0]);
        // Center is still covered
        assert_eq!(out.pixel(10, 10), &[200, 200, 200]);
    }

    #[test]
    fn test_rotation_center_preservation() {
        let size = 21;
        let buf = RasterU8::from_fn(size, size, ChannelLayout::Rgb, |x, y, _| {
            if x.abs_diff(size / 2) <= 1 && y.abs_diff(size / 2) <= 1 {
                255
            } else {
                0
            }
        });
        let out = rotate(&Raster::U8(buf), 37.0).unwrap().to_u8();
        assert_eq!(out.get(size / 2, size / 2, 0), 255);
    }

    #[test]
    fn test_mask_stays_binary() {
        let mask = Mask::from_fn(8, 8, ChannelLayout::Gray, |x, _, _| x < 4);
        let out = rotate(&Raster::Mask(mask), 30.0).unwrap();
        assert!(matches!(out, Raster::Mask(_)));
    }

    #[test]
    fn test_small_images_do_not_panic() {
        for (w, h) in [(1, 1), (1, 9), (9, 1), (2, 2)] {
            let out = rotate(&test_image(w, h), 45.0).unwrap();
            assert_eq!(out.shape(), (h as usize, w as usize, 3));
        }
    }

    #[test]
    fn test_angle_bounds() {
        let img = test_image(4, 4);
        assert!(rotate(&img, 180.0).is_ok());
        assert!(rotate(&img, -180.0).is_ok());
        assert!(matches!(
            rotate(&img, 181.0),
            Err(EditError::ParameterOutOfRange { name: "angle", .. })
        ));
        assert!(rotate(&img, f64::NAN).is_err());
    }
}
