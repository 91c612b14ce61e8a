//! Colorspace conversions between raster layouts.
//!
//! Grayscale conversion uses ITU-R BT.709 luminance weights. Alpha never
//! contributes to luminance.

use super::{ChannelLayout, PixelBuffer, Raster};

/// ITU-R BT.709 coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.0722;

/// Luminance of an RGB triple, in the same scale as the inputs.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Map a float sample to 8 bits: clamp to `[0, 1]`, scale by 255, round.
///
/// NaN maps to 0.
#[inline]
pub fn float_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Collapse every pixel to one sample with `f`.
fn collapse<T: Copy, F>(buf: &PixelBuffer<T>, f: F) -> PixelBuffer<T>
where
    F: Fn(&[T]) -> T,
{
    PixelBuffer::from_fn(buf.width(), buf.height(), ChannelLayout::Gray, |x, y, _| {
        f(buf.pixel(x, y))
    })
}

/// Expand a buffer to three channels. Gray is replicated, RGBA drops alpha.
fn expand<T: Copy>(buf: &PixelBuffer<T>) -> PixelBuffer<T> {
    if buf.layout() == ChannelLayout::Rgb {
        return buf.clone();
    }
    let single = buf.layout().is_single_channel();
    PixelBuffer::from_fn(buf.width(), buf.height(), ChannelLayout::Rgb, |x, y, c| {
        if single {
            buf.get(x, y, 0)
        } else {
            buf.get(x, y, c)
        }
    })
}

/// Convert a multi-channel raster to a single channel.
///
/// The domain is preserved: 8-bit luminance is rounded back to `u8`, float
/// stays float, and a mask pixel is set if any of its color channels is set.
///
/// A raster that is already single-channel is returned unchanged (as a copy).
pub fn to_grayscale(raster: &Raster) -> Raster {
    if raster.layout().is_single_channel() {
        return raster.clone();
    }
    match raster {
        Raster::U8(buf) => Raster::U8(collapse(buf, |p| {
            let lum = luminance(p[0] as f32, p[1] as f32, p[2] as f32);
            lum.clamp(0.0, 255.0).round() as u8
        })),
        Raster::Float(buf) => Raster::Float(collapse(buf, |p| luminance(p[0], p[1], p[2]))),
        Raster::Mask(buf) => Raster::Mask(collapse(buf, |p| p[0] || p[1] || p[2])),
    }
}

/// Convert a raster to three channels.
///
/// Single-channel input is replicated across R, G and B. RGB input is
/// returned as a copy and RGBA input loses its alpha channel.
pub fn to_rgb(raster: &Raster) -> Raster {
    match raster {
        Raster::U8(buf) => Raster::U8(expand(buf)),
        Raster::Float(buf) => Raster::Float(expand(buf)),
        Raster::Mask(buf) => Raster::Mask(expand(buf)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{RasterF32, RasterU8};

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_grayscale_of_gray_rgb_preserves_value() {
        for v in [0u8, 64, 128, 192, 255] {
            let buf = RasterU8::filled(2, 2, ChannelLayout::Rgb, v);
            let Raster::U8(gray) = to_grayscale(&Raster::U8(buf)) else {
                panic!("domain changed");
            };
            assert_eq!(gray.layout(), ChannelLayout::Gray);
            assert!((gray.get(0, 0, 0) as i32 - v as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_grayscale_primaries() {
        let buf = RasterU8::from_vec(3, 1, ChannelLayout::Rgb, vec![255, 0, 0, 0, 255, 0, 0, 0, 255])
            .unwrap();
        let gray = to_grayscale(&Raster::U8(buf)).to_u8();
        assert_eq!(gray.as_slice(), &[54, 182, 18]);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let buf = RasterU8::from_vec(1, 1, ChannelLayout::Rgba, vec![100, 100, 100, 0]).unwrap();
        let gray = to_grayscale(&Raster::U8(buf)).to_u8();
        assert_eq!(gray.as_slice(), &[100]);
    }

    #[test]
    fn test_grayscale_of_single_channel_is_noop() {
        let raster = Raster::Float(RasterF32::filled(3, 3, ChannelLayout::Gray, 0.25));
        assert_eq!(to_grayscale(&raster), raster);
    }

    #[test]
    fn test_to_rgb_replicates() {
        let buf = RasterU8::from_vec(2, 1, ChannelLayout::Gray, vec![7, 9]).unwrap();
        let rgb = to_rgb(&Raster::U8(buf)).to_u8();
        assert_eq!(rgb.layout(), ChannelLayout::Rgb);
        assert_eq!(rgb.as_slice(), &[7, 7, 7, 9, 9, 9]);
    }

    #[test]
    fn test_to_rgb_drops_alpha() {
        let buf = RasterU8::from_vec(1, 1, ChannelLayout::Rgba, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(to_rgb(&Raster::U8(buf)).to_u8().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_float_to_u8() {
        assert_eq!(float_to_u8(-1.0), 0);
        assert_eq!(float_to_u8(0.0), 0);
        assert_eq!(float_to_u8(0.5), 128);
        assert_eq!(float_to_u8(1.0), 255);
        assert_eq!(float_to_u8(3.0), 255);
        assert_eq!(float_to_u8(f32::NAN), 0);
    }
}
