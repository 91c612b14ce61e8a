//! Output normalization into the canonical 8-bit form.
//!
//! Operations disagree about their output representation: float in `[0, 1]`
//! (possibly overshooting), boolean masks, or 8-bit data. [`normalize`]
//! turns any of them into a [`CanonicalImage`], which is what the encoder and
//! the display accept.
//!
//! | Raw domain | Conversion |
//! |---|---|
//! | Float | clamp to `[0, 1]`, scale by 255, round |
//! | Mask | `true` → 255, `false` → 0 |
//! | U8 | unchanged |
//!
//! Single-channel results can additionally be expanded to RGB (edge maps are
//! shown next to color originals). RGBA results lose their alpha channel.

use log::debug;

use crate::raster::{to_rgb, ChannelLayout, Raster, RasterU8};

/// An 8-bit raster with one or three channels.
///
/// Every value is in `[0, 255]` by construction of `u8`; the channel
/// invariant is enforced by [`CanonicalImage::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalImage {
    buffer: RasterU8,
}

impl CanonicalImage {
    /// Wrap an 8-bit buffer. Returns `None` for RGBA input.
    pub fn new(buffer: RasterU8) -> Option<Self> {
        match buffer.layout() {
            ChannelLayout::Gray | ChannelLayout::Rgb => Some(Self { buffer }),
            ChannelLayout::Rgba => None,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Either [`ChannelLayout::Gray`] or [`ChannelLayout::Rgb`].
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.buffer.layout()
    }

    /// Channel count, 1 or 3.
    pub fn channels(&self) -> usize {
        self.buffer.channels()
    }

    /// Interleaved 8-bit samples, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn as_buffer(&self) -> &RasterU8 {
        &self.buffer
    }

    pub fn into_buffer(self) -> RasterU8 {
        self.buffer
    }
}

/// Canonicalize an operation's raw output.
///
/// With `expand_to_rgb`, a single-channel result is replicated across three
/// channels before the domain conversion.
pub fn normalize(raw: Raster, expand_to_rgb: bool) -> CanonicalImage {
    let domain = raw.domain();
    let raw = if expand_to_rgb && raw.layout().is_single_channel() {
        to_rgb(&raw)
    } else {
        raw
    };

    let mut buffer = match raw {
        Raster::U8(buf) => buf,
        other => other.to_u8(),
    };

    if buffer.layout() == ChannelLayout::Rgba {
        buffer = to_rgb(&Raster::U8(buffer)).to_u8();
    }

    debug!(
        "normalized {:?} output to {}x{} {:?}",
        domain,
        buffer.width(),
        buffer.height(),
        buffer.layout()
    );

    CanonicalImage { buffer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Mask, RasterF32};

    #[test]
    fn test_u8_passes_through() {
        let buf = RasterU8::from_vec(2, 1, ChannelLayout::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let out = normalize(Raster::U8(buf.clone()), false);
        assert_eq!(out.as_buffer(), &buf);
    }

    #[test]
    fn test_float_is_clamped_and_scaled() {
        let buf =
            RasterF32::from_vec(5, 1, ChannelLayout::Gray, vec![-3.0, 0.0, 0.5, 1.0, 42.0]).unwrap();
        let out = normalize(Raster::Float(buf), false);
        assert_eq!(out.pixels(), &[0, 0, 128, 255, 255]);
        assert_eq!(out.channels(), 1);
    }

    #[test]
    fn test_mask_maps_to_extremes() {
        let buf = Mask::from_vec(3, 1, ChannelLayout::Gray, vec![true, false, true]).unwrap();
        assert_eq!(normalize(Raster::Mask(buf), false).pixels(), &[255, 0, 255]);
    }

    #[test]
    fn test_expand_to_rgb() {
        let buf = RasterF32::from_vec(2, 1, ChannelLayout::Gray, vec![1.0, 0.0]).unwrap();
        let out = normalize(Raster::Float(buf), true);
        assert_eq!(out.layout(), ChannelLayout::Rgb);
        assert_eq!(out.pixels(), &[255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn test_expand_leaves_color_alone() {
        let buf = RasterU8::filled(2, 2, ChannelLayout::Rgb, 9);
        let out = normalize(Raster::U8(buf.clone()), true);
        assert_eq!(out.as_buffer(), &buf);
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let buf = RasterU8::from_vec(1, 1, ChannelLayout::Rgba, vec![10, 20, 30, 40]).unwrap();
        let out = normalize(Raster::U8(buf), false);
        assert_eq!(out.pixels(), &[10, 20, 30]);
    }

    #[test]
    fn test_canonical_rejects_rgba() {
        assert!(CanonicalImage::new(RasterU8::filled(1, 1, ChannelLayout::Rgba, 0)).is_none());
        assert!(CanonicalImage::new(RasterU8::filled(1, 1, ChannelLayout::Gray, 0)).is_some());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::raster::{float_to_u8, RasterF32};
    use proptest::prelude::*;

    proptest! {
        /// Property: Any float data, however far out of range, normalizes to
        /// a 1- or 3-channel 8-bit image of the same size.
        #[test]
        fn prop_float_output_is_canonical(
            data in prop::collection::vec(-10.0f32..10.0, 12),
            expand in any::<bool>(),
        ) {
            let buf = RasterF32::from_vec(4, 3, ChannelLayout::Gray, data.clone()).unwrap();
            let out = normalize(Raster::Float(buf), expand);

            prop_assert_eq!(out.width(), 4);
            prop_assert_eq!(out.height(), 3);
            prop_assert!(out.channels() == 1 || out.channels() == 3);
            for (i, &v) in data.iter().enumerate() {
                let sample = out.pixels()[i * out.channels()];
                if v <= 0.0 {
                    prop_assert_eq!(sample, 0);
                } else if v >= 1.0 {
                    prop_assert_eq!(sample, 255);
                } else {
                    prop_assert_eq!(sample, float_to_u8(v));
                }
            }
        }
    }
}
