//! One user action end to end: look up the operation, read its parameters,
//! prepare the input, run it, and normalize the result.
//!
//! ```ignore
//! use retoque_core::dispatch::ParameterSet;
//! use retoque_core::pipeline::process;
//!
//! let params = ParameterSet::new().with("sigma", 2.0);
//! let result = process(&raster, "blur", &params)?;
//! ```

use std::borrow::Cow;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, DecodeError};
use crate::dispatch::{build_operation, lookup, spec_for, BuildContext, ParameterSet, PreTransform};
use crate::encode::{encode_png, EncodeError};
use crate::error::EditError;
use crate::normalize::{normalize, CanonicalImage};
use crate::ops::{FilterType, Operation};
use crate::raster::{to_grayscale, Raster};

/// Settings that apply to every invocation rather than to one operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Interpolation used by `resize`.
    pub resize_filter: FilterType,
}

/// Any failure on the bytes-in, bytes-out path.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Apply the named operation with default [`PipelineOptions`].
///
/// # Errors
///
/// `UnknownOperation` for an unrecognized name, otherwise whatever parameter
/// or shape error the operation reports.
pub fn process(
    raster: &Raster,
    name: &str,
    params: &ParameterSet,
) -> Result<CanonicalImage, EditError> {
    process_with_options(raster, name, params, &PipelineOptions::default())
}

/// Apply the named operation to `raster` and canonicalize the result.
pub fn process_with_options(
    raster: &Raster,
    name: &str,
    params: &ParameterSet,
    options: &PipelineOptions,
) -> Result<CanonicalImage, EditError> {
    let spec = lookup(name)?;
    let ctx = BuildContext {
        source_width: raster.width(),
        source_height: raster.height(),
        resize_filter: options.resize_filter,
    };
    if params.is_empty() {
        debug!("{}: no parameters supplied, using schema defaults", spec.name);
    }
    let operation = build_operation(spec, params, &ctx)?;
    debug!("dispatching {} as {:?}", name, operation);

    run(&operation, raster)
}

/// Run an already built operation under its table row's pre/post policy.
pub fn run(operation: &Operation, raster: &Raster) -> Result<CanonicalImage, EditError> {
    let spec = spec_for(operation.kind());
    let input = match spec.pre {
        PreTransform::None => Cow::Borrowed(raster),
        PreTransform::ToGrayscale => {
            debug!("{}: converting {:?} input to grayscale", spec.name, raster.layout());
            Cow::Owned(to_grayscale(raster))
        }
    };

    let raw = operation.apply(&input)?;
    debug!(
        "{}: {}x{} {:?} -> {}x{} {:?} {:?}",
        spec.name,
        input.width(),
        input.height(),
        input.layout(),
        raw.width(),
        raw.height(),
        raw.layout(),
        raw.domain()
    );

    Ok(normalize(raw, spec.post.expands_to_rgb()))
}

/// Decode an uploaded file, apply the named operation and encode the result
/// as PNG.
pub fn process_bytes(
    bytes: &[u8],
    name: &str,
    params: &ParameterSet,
) -> Result<Vec<u8>, ProcessError> {
    let raster = decode_image(bytes)?;
    let output = process(&raster, name, params)?;
    Ok(encode_png(&output)?)
}
