//! Image encoding WASM bindings.
//!
//! Results are offered for download as PNG under [`output_file_name`].
//!
//! ```typescript
//! import { encode_png, output_file_name } from '@retoque/wasm';
//!
//! const png = encode_png(result);
//! const url = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! link.download = output_file_name();
//! ```

use crate::js_error;
use crate::types::JsRaster;
use retoque_core::encode::{self, OUTPUT_FILE_NAME};
use retoque_core::normalize::normalize;
use wasm_bindgen::prelude::*;

/// Encode an image as PNG bytes.
///
/// RGBA input loses its alpha channel.
///
/// # Errors
///
/// Returns an error if the pixel buffer doesn't match the image's dimensions
/// or if either dimension is zero.
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster().map_err(js_error)?;
    encode::encode_png(&normalize(raster, false)).map_err(js_error)
}

/// Suggested file name for the downloaded result.
#[wasm_bindgen]
pub fn output_file_name() -> String {
    OUTPUT_FILE_NAME.to_string()
}
