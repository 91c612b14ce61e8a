//! Dispatch policy: from an operation name and raw parameter values to a
//! ready-to-run [`Operation`].
//!
//! The mapping itself is data ([`OPERATIONS`]); this module only reads
//! parameter values against it. Missing parameters take the schema default,
//! and `size` defaults to the source image's dimensions. Range checks are
//! left to the operations themselves, so each bound is defined in one place.

mod params;
mod table;

pub use params::{ParamKind, ParamSpec, ParamValue, ParameterSet};
pub use table::{lookup, spec_for, OperationSpec, PostTransform, PreTransform, OPERATIONS};

use crate::error::EditError;
use crate::ops::{FilterType, FlipDirection, Operation, OperationKind};

/// Context needed to fill parameters that default from the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildContext {
    /// Source image width, the default resize width.
    pub source_width: u32,
    /// Source image height, the default resize height.
    pub source_height: u32,
    /// Interpolation for `resize`.
    pub resize_filter: FilterType,
}

/// Read a float parameter, falling back to the schema default.
fn float_param(param: &ParamSpec, params: &ParameterSet) -> Result<f64, EditError> {
    match param.value_in(params) {
        Some(ParamValue::Number(v)) => Ok(*v),
        Some(other) => Err(invalid(
            param.name,
            format!("expected a number, got {}", other.kind_name()),
        )),
        None => match param.kind {
            ParamKind::Float { default, .. } => Ok(default),
            ParamKind::Integer { default, .. } => Ok(default as f64),
            _ => Err(invalid(param.name, "parameter is not numeric".to_string())),
        },
    }
}

/// Read an integer-valued parameter; fractional input is rejected.
fn integer_param(param: &ParamSpec, params: &ParameterSet) -> Result<f64, EditError> {
    let value = float_param(param, params)?;
    if value.fract() != 0.0 {
        return Err(invalid(param.name, format!("expected an integer, got {}", value)));
    }
    Ok(value)
}

fn direction_param(params: &ParameterSet) -> Result<FlipDirection, EditError> {
    let name = table::DIRECTION.name;
    match table::DIRECTION.value_in(params) {
        None => Ok(FlipDirection::default()),
        Some(ParamValue::Number(v)) => {
            if v.fract() != 0.0 {
                return Err(invalid(name, format!("expected 0 or 1, got {}", v)));
            }
            FlipDirection::from_index(*v as i64).ok_or_else(|| EditError::ParameterOutOfRange {
                name,
                value: *v,
                expected: "{0 (vertical), 1 (horizontal)}".to_string(),
            })
        }
        Some(ParamValue::Text(s)) => FlipDirection::from_name(s).ok_or_else(|| {
            invalid(
                name,
                format!("expected \"vertical\" or \"horizontal\", got {:?}", s),
            )
        }),
        Some(other) => Err(invalid(
            name,
            format!("expected a direction, got {}", other.kind_name()),
        )),
    }
}

/// One component of the resize target: a whole number >= 1.
fn dimension(name: &'static str, value: f64) -> Result<u32, EditError> {
    if value.fract() != 0.0 {
        return Err(invalid(name, format!("expected an integer, got {}", value)));
    }
    if !(1.0..=u32::MAX as f64).contains(&value) {
        return Err(EditError::ParameterOutOfRange {
            name,
            value,
            expected: "a positive integer".to_string(),
        });
    }
    Ok(value as u32)
}

fn size_param(params: &ParameterSet, ctx: &BuildContext) -> Result<(u32, u32), EditError> {
    let name = table::SIZE.name;
    match table::SIZE.value_in(params) {
        None => Ok((ctx.source_width, ctx.source_height)),
        Some(ParamValue::Pair(w, h)) => Ok((dimension("width", *w)?, dimension("height", *h)?)),
        Some(other) => Err(invalid(
            name,
            format!("expected [width, height], got {}", other.kind_name()),
        )),
    }
}

fn invalid(name: &'static str, reason: String) -> EditError {
    EditError::InvalidParameter { name, reason }
}

/// Build the typed [`Operation`] for a table row from raw parameter values.
///
/// Unknown keys in `params` are ignored.
///
/// # Errors
///
/// `InvalidParameter` if a value has the wrong type and
/// `ParameterOutOfRange` for a malformed flip direction or resize target.
pub fn build_operation(
    spec: &OperationSpec,
    params: &ParameterSet,
    ctx: &BuildContext,
) -> Result<Operation, EditError> {
    Ok(match spec.kind {
        OperationKind::Blur => Operation::Blur {
            sigma: float_param(&table::SIGMA, params)?,
        },
        OperationKind::EdgeDetect => Operation::EdgeDetect,
        OperationKind::BrightnessContrast => Operation::BrightnessContrast {
            gamma: float_param(&table::GAMMA, params)?,
            contrast: float_param(&table::CONTRAST, params)?,
        },
        OperationKind::Rotate => Operation::Rotate {
            angle: float_param(&table::ANGLE, params)?,
        },
        OperationKind::Flip => Operation::Flip {
            direction: direction_param(params)?,
        },
        OperationKind::Resize => {
            let (width, height) = size_param(params, ctx)?;
            Operation::Resize {
                width,
                height,
                filter: ctx.resize_filter,
            }
        }
        OperationKind::Invert => Operation::Invert,
        OperationKind::Binarize => Operation::Binarize {
            threshold: integer_param(&table::THRESHOLD, params)?,
        },
    })
}
