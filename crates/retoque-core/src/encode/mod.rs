//! Encoding processed images for download.
//!
//! Results are always written as PNG: lossless, and able to store both
//! single-channel and RGB canonical images without conversion.
//!
//! ```ignore
//! use retoque_core::encode::{encode_png, OUTPUT_FILE_NAME};
//!
//! let png = encode_png(&image).unwrap();
//! std::fs::write(OUTPUT_FILE_NAME, png).unwrap();
//! ```

mod png;

pub use png::{encode_png, EncodeError};

/// Suggested file name for a downloaded result.
pub const OUTPUT_FILE_NAME: &str = "processed_image.png";
