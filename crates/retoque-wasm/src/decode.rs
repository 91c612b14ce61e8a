//! Image decoding WASM bindings.
//!
//! ```typescript
//! import { decode_image } from '@retoque/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}, ${image.channels} channel(s)`);
//! ```

use crate::js_error;
use crate::types::JsRaster;
use retoque_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded PNG or JPEG file.
///
/// Grayscale files decode to one channel, everything else to RGB. Alpha is
/// dropped.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(|raster| JsRaster::from_raster(&raster))
        .map_err(js_error)
}
