//! Retoque WASM - WebAssembly bindings for Retoque
//!
//! This crate exposes the retoque-core pipeline to the browser UI.
//!
//! # Module Structure
//!
//! - `types` - `JsRaster`, the image wrapper passed across the boundary
//! - `decode` - PNG/JPEG decoding
//! - `encode` - PNG encoding for download
//! - `operations` - the operation table and the calls that run it
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, apply_operation, encode_png } from '@retoque/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const result = apply_operation(image, 'rotate', { angle: 45 });
//! const png = encode_png(result);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod operations;
mod types;

pub use decode::decode_image;
pub use encode::{encode_png, output_file_name};
pub use operations::{apply_operation, operation_names, operation_schema, process_image};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Log an error to the browser console and turn it into a JS exception value.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    let message = err.to_string();
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
