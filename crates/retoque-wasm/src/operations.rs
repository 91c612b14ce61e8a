//! Operation WASM bindings: the dispatch table for building controls, and
//! the calls that run an operation.
//!
//! ```typescript
//! import { operation_schema, apply_operation, process_image } from '@retoque/wasm';
//!
//! // Render one control per parameter
//! for (const op of operation_schema()) {
//!   console.log(op.label, op.params.map((p) => `${p.name}: ${p.type}`));
//! }
//!
//! // Parameters are a plain object; missing ones take their defaults
//! const blurred = apply_operation(image, 'blur', { sigma: 2.5 });
//! const resized = apply_operation(image, 'resize', { size: [320, 240] });
//! const png = process_image(bytes, 'flip', { direction: 'horizontal' });
//! ```

use crate::js_error;
use crate::types::JsRaster;
use retoque_core::dispatch::{ParameterSet, OPERATIONS};
use retoque_core::pipeline;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Read a JS parameter object. `undefined` and `null` mean "all defaults".
fn parse_params(params: JsValue) -> Result<ParameterSet, JsValue> {
    if params.is_undefined() || params.is_null() {
        return Ok(ParameterSet::new());
    }
    serde_wasm_bindgen::from_value(params).map_err(js_error)
}

pub(crate) fn apply(
    image: &JsRaster,
    name: &str,
    params: &ParameterSet,
) -> Result<JsRaster, String> {
    let raster = image.to_raster()?;
    pipeline::process(&raster, name, params)
        .map(JsRaster::from_canonical)
        .map_err(|e| e.to_string())
}

/// Apply one operation to an image.
///
/// `name` may be the snake_case name (`"edge_detect"`), the CamelCase name
/// or the display label. The result always has 1 or 3 channels.
///
/// # Errors
///
/// Returns an error for an unknown operation, a malformed parameter object,
/// an out-of-range parameter or an unsupported channel count.
#[wasm_bindgen]
pub fn apply_operation(image: &JsRaster, name: &str, params: JsValue) -> Result<JsRaster, JsValue> {
    let params = parse_params(params)?;
    apply(image, name, &params).map_err(js_error)
}

/// Decode an uploaded file, apply one operation and return the PNG bytes.
#[wasm_bindgen]
pub fn process_image(bytes: &[u8], name: &str, params: JsValue) -> Result<Vec<u8>, JsValue> {
    let params = parse_params(params)?;
    pipeline::process_bytes(bytes, name, &params).map_err(js_error)
}

/// The dispatch table as an array of plain objects:
/// `{ kind, name, label, params: [{ name, label, type, ... }], pre, post }`.
#[wasm_bindgen]
pub fn operation_schema() -> Result<JsValue, JsValue> {
    OPERATIONS
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

/// Canonical operation names, in menu order.
#[wasm_bindgen]
pub fn operation_names() -> js_sys::Array {
    OPERATIONS
        .iter()
        .map(|spec| JsValue::from_str(spec.name))
        .collect()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_apply_operation_with_object_params() {
        let img = JsRaster::new(8, 8, 3, vec![50u8; 8 * 8 * 3]);
        let params = js_sys::Object::new();
        js_sys::Reflect::set(&params, &"sigma".into(), &JsValue::from_f64(1.5)).unwrap();
        let out = apply_operation(&img, "blur", params.into()).unwrap();
        assert_eq!(out.width(), 8);
    }

    #[wasm_bindgen_test]
    fn test_apply_operation_undefined_params() {
        let img = JsRaster::new(2, 2, 1, vec![0, 0, 0, 0]);
        let out = apply_operation(&img, "binarize", JsValue::UNDEFINED).unwrap();
        assert_eq!(out.pixels(), vec![0, 0, 0, 0]);
    }

    #[wasm_bindgen_test]
    fn test_apply_operation_unknown() {
        let img = JsRaster::new(1, 1, 1, vec![0]);
        assert!(apply_operation(&img, "sepia", JsValue::NULL).is_err());
    }

    #[wasm_bindgen_test]
    fn test_operation_names() {
        let names = operation_names();
        assert_eq!(names.length(), 8);
        assert_eq!(names.get(0).as_string().as_deref(), Some("blur"));
    }

    #[wasm_bindgen_test]
    fn test_operation_schema_is_array() {
        let schema = operation_schema().unwrap();
        assert!(js_sys::Array::is_array(&schema));
        assert_eq!(js_sys::Array::from(&schema).length(), 8);
    }
}
