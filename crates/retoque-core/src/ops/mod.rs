//! The eight image operations.
//!
//! Each operation is a pure function from a [`Raster`] plus typed parameters
//! to a new [`Raster`]. [`Operation`] closes the set: its variants carry the
//! parameters, and [`Operation::apply`] is the shared invocation contract.
//!
//! # Output domains
//!
//! | Operation | Output |
//! |---|---|
//! | Blur | same domain as input |
//! | EdgeDetect | float, single channel |
//! | BrightnessContrast | float |
//! | Rotate | same domain as input, same shape |
//! | Flip | same domain as input, same shape |
//! | Resize | u8 |
//! | Invert | same domain as input |
//! | Binarize | mask, single channel |

mod blur;
mod edges;
mod flip;
mod point;
mod resize;
mod rotation;
mod tone;

pub use blur::{gaussian_blur, MAX_SIGMA};
pub use edges::{detect_edges, sobel_magnitude};
pub use flip::{flip, FlipDirection};
pub use point::{binarize, invert};
pub use resize::{resize, FilterType};
pub use rotation::rotate;
pub use tone::{adjust_brightness_contrast, GAMMA_RANGE};

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::raster::Raster;

/// Identifies one of the eight operations without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Blur,
    EdgeDetect,
    BrightnessContrast,
    Rotate,
    Flip,
    Resize,
    Invert,
    Binarize,
}

impl OperationKind {
    /// Every operation, in menu order.
    pub const ALL: [OperationKind; 8] = [
        OperationKind::Blur,
        OperationKind::EdgeDetect,
        OperationKind::BrightnessContrast,
        OperationKind::Rotate,
        OperationKind::Flip,
        OperationKind::Resize,
        OperationKind::Invert,
        OperationKind::Binarize,
    ];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Blur => "blur",
            OperationKind::EdgeDetect => "edge_detect",
            OperationKind::BrightnessContrast => "brightness_contrast",
            OperationKind::Rotate => "rotate",
            OperationKind::Flip => "flip",
            OperationKind::Resize => "resize",
            OperationKind::Invert => "invert",
            OperationKind::Binarize => "binarize",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An operation together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Gaussian smoothing with standard deviation `sigma`, in `(0, 10]`.
    Blur { sigma: f64 },
    /// Sobel gradient magnitude of the luminance.
    EdgeDetect,
    /// Gamma correction; `gamma` and `contrast` both in `[0.5, 1.5]`.
    BrightnessContrast { gamma: f64, contrast: f64 },
    /// Rotation about the center in degrees, in `[-180, 180]`.
    Rotate { angle: f64 },
    Flip { direction: FlipDirection },
    /// Resample to exactly `width` x `height`.
    Resize {
        width: u32,
        height: u32,
        filter: FilterType,
    },
    Invert,
    /// Pixels strictly above `threshold` (in `[0, 255]`) become set.
    Binarize { threshold: f64 },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Blur { .. } => OperationKind::Blur,
            Operation::EdgeDetect => OperationKind::EdgeDetect,
            Operation::BrightnessContrast { .. } => OperationKind::BrightnessContrast,
            Operation::Rotate { .. } => OperationKind::Rotate,
            Operation::Flip { .. } => OperationKind::Flip,
            Operation::Resize { .. } => OperationKind::Resize,
            Operation::Invert => OperationKind::Invert,
            Operation::Binarize { .. } => OperationKind::Binarize,
        }
    }

    /// Run the operation on `raster`, producing a new raster.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the channel count is unsupported and
    /// `ParameterOutOfRange` if a parameter violates its bound.
    pub fn apply(&self, raster: &Raster) -> Result<Raster, EditError> {
        match *self {
            Operation::Blur { sigma } => gaussian_blur(raster, sigma),
            Operation::EdgeDetect => detect_edges(raster),
            Operation::BrightnessContrast { gamma, contrast } => {
                adjust_brightness_contrast(raster, gamma, contrast)
            }
            Operation::Rotate { angle } => rotate(raster, angle),
            Operation::Flip { direction } => Ok(flip(raster, direction)),
            Operation::Resize {
                width,
                height,
                filter,
            } => resize(raster, width, height, filter),
            Operation::Invert => Ok(invert(raster)),
            Operation::Binarize { threshold } => binarize(raster, threshold),
        }
    }
}
