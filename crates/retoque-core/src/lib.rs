//! Retoque Core - image transformation pipeline
//!
//! This crate provides the pure, stateless side of Retoque: eight image
//! operations over tagged rasters, the normalizer that turns their outputs
//! into displayable 8-bit images, and the dispatch table that tells a UI which
//! parameters each operation needs. PNG/JPEG decoding and PNG encoding sit at
//! the edges.

pub mod decode;
pub mod dispatch;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod ops;
pub mod pipeline;
pub mod raster;

pub use decode::{decode_image, DecodeError};
pub use dispatch::{lookup, OperationSpec, ParamValue, ParameterSet, OPERATIONS};
pub use encode::{encode_png, EncodeError, OUTPUT_FILE_NAME};
pub use error::EditError;
pub use normalize::{normalize, CanonicalImage};
pub use ops::{FilterType, FlipDirection, Operation, OperationKind};
pub use pipeline::{process, process_bytes, process_with_options, PipelineOptions, ProcessError};
pub use raster::{ChannelLayout, Domain, Mask, PixelBuffer, Raster, RasterF32, RasterU8};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_twice_through_public_api() {
        let raster = Raster::U8(RasterU8::from_fn(3, 2, ChannelLayout::Rgb, |x, y, c| {
            (x * 3 + y * 11 + c as u32) as u8
        }));
        let flipped = Operation::Flip {
            direction: FlipDirection::Horizontal,
        }
        .apply(&raster)
        .unwrap();
        let restored = Operation::Flip {
            direction: FlipDirection::Horizontal,
        }
        .apply(&flipped)
        .unwrap();
        assert_ne!(flipped, raster);
        assert_eq!(restored, raster);
    }

    #[test]
    fn test_output_file_name() {
        assert!(OUTPUT_FILE_NAME.ends_with(".png"));
    }
}
