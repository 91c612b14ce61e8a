//! Error type for the transformation pipeline.

use thiserror::Error;

/// Errors raised while dispatching or applying an operation.
///
/// Every variant is a deterministic input-validation failure. Nothing here is
/// transient, so callers should surface the error and keep the original image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// The raster has a channel count the operation does not accept.
    #[error("{operation} expects {expected} input, got {actual} channel(s)")]
    ShapeMismatch {
        operation: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// A parameter value violates its documented bound.
    #[error("Parameter `{name}` = {value} is outside {expected}")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        expected: String,
    },

    /// The requested operation name is not one of the eight supported ones.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// A parameter was supplied with the wrong kind of value.
    #[error("Invalid value for parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Check `min <= value <= max`. NaN is always out of range.
pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), EditError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(EditError::ParameterOutOfRange {
            name,
            value,
            expected: format!("[{}, {}]", min, max),
        })
    }
}
