//! The static dispatch table.
//!
//! One row per operation: which parameters the UI must collect, what the
//! input needs before the operation runs, and what the output needs after.
//!
//! | Operation | Parameters | Pre | Post |
//! |---|---|---|---|
//! | blur | sigma | – | normalize |
//! | edge_detect | – | – | expand to RGB, normalize |
//! | brightness_contrast | gamma, contrast | – | normalize |
//! | rotate | angle | – | normalize |
//! | flip | direction | – | – |
//! | resize | size | – | – |
//! | invert | – | – | – |
//! | binarize | threshold | grayscale | normalize |

use serde::Serialize;

use super::params::{ParamKind, ParamSpec};
use crate::error::EditError;
use crate::ops::{OperationKind, MAX_SIGMA};

/// Conversion applied to the input before the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreTransform {
    None,
    /// Collapse color input to a single luminance channel.
    ToGrayscale,
}

/// Post-processing the raw output needs before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostTransform {
    /// Output is already canonical 8-bit data.
    None,
    /// Clamp and scale float output, or map a mask to 0/255.
    Normalize,
    /// Replicate a single-channel result to RGB, then normalize.
    ExpandToRgb,
}

impl PostTransform {
    pub fn expands_to_rgb(self) -> bool {
        self == PostTransform::ExpandToRgb
    }
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperationSpec {
    pub kind: OperationKind,
    /// Canonical snake_case name.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Other accepted names (the editor's original Spanish menu labels).
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    pub params: &'static [ParamSpec],
    pub pre: PreTransform,
    pub post: PostTransform,
}

pub const SIGMA: ParamSpec = ParamSpec {
    name: "sigma",
    label: "Sigma",
    aliases: &[],
    kind: ParamKind::Float {
        min: 0.1,
        max: MAX_SIGMA,
        default: 3.0,
        step: None,
    },
};

pub const GAMMA: ParamSpec = ParamSpec {
    name: "gamma",
    label: "Brightness",
    aliases: &["brillo"],
    kind: ParamKind::Float {
        min: 0.5,
        max: 1.5,
        default: 1.0,
        step: Some(0.05),
    },
};

pub const CONTRAST: ParamSpec = ParamSpec {
    name: "contrast",
    label: "Contrast",
    aliases: &["contraste"],
    kind: ParamKind::Float {
        min: 0.5,
        max: 1.5,
        default: 1.0,
        step: Some(0.05),
    },
};

pub const ANGLE: ParamSpec = ParamSpec {
    name: "angle",
    label: "Rotation angle",
    aliases: &["angulo", "ángulo"],
    kind: ParamKind::Float {
        min: -180.0,
        max: 180.0,
        default: 0.0,
        step: None,
    },
};

pub const DIRECTION: ParamSpec = ParamSpec {
    name: "direction",
    label: "Flip direction",
    aliases: &["direccion", "dirección"],
    kind: ParamKind::Choice {
        options: &["vertical", "horizontal"],
        default: 0,
    },
};

pub const SIZE: ParamSpec = ParamSpec {
    name: "size",
    label: "New size (width, height)",
    aliases: &["nuevo_tamano", "nuevo_tamaño"],
    kind: ParamKind::Size,
};

pub const THRESHOLD: ParamSpec = ParamSpec {
    name: "threshold",
    label: "Binarization threshold",
    aliases: &["umbral"],
    kind: ParamKind::Integer {
        min: 0,
        max: 255,
        default: 128,
    },
};

/// Every operation, in menu order.
pub static OPERATIONS: [OperationSpec; 8] = [
    OperationSpec {
        kind: OperationKind::Blur,
        name: "blur",
        label: "Blur",
        aliases: &["Desenfoque"],
        params: &[SIGMA],
        pre: PreTransform::None,
        post: PostTransform::Normalize,
    },
    OperationSpec {
        kind: OperationKind::EdgeDetect,
        name: "edge_detect",
        label: "Edge Detection",
        aliases: &["Detección de Bordes"],
        params: &[],
        pre: PreTransform::None,
        post: PostTransform::ExpandToRgb,
    },
    OperationSpec {
        kind: OperationKind::BrightnessContrast,
        name: "brightness_contrast",
        label: "Brightness/Contrast",
        aliases: &["Ajustar Brillo/Contraste"],
        params: &[GAMMA, CONTRAST],
        pre: PreTransform::None,
        post: PostTransform::Normalize,
    },
    OperationSpec {
        kind: OperationKind::Rotate,
        name: "rotate",
        label: "Rotate Image",
        aliases: &["Rotar Imagen"],
        params: &[ANGLE],
        pre: PreTransform::None,
        post: PostTransform::Normalize,
    },
    OperationSpec {
        kind: OperationKind::Flip,
        name: "flip",
        label: "Flip Image",
        aliases: &["Voltear Imagen"],
        params: &[DIRECTION],
        pre: PreTransform::None,
        post: PostTransform::None,
    },
    OperationSpec {
        kind: OperationKind::Resize,
        name: "resize",
        label: "Resize",
        aliases: &["Cambiar Tamaño"],
        params: &[SIZE],
        pre: PreTransform::None,
        post: PostTransform::None,
    },
    OperationSpec {
        kind: OperationKind::Invert,
        name: "invert",
        label: "Invert Colors",
        aliases: &["Invertir Colores"],
        params: &[],
        pre: PreTransform::None,
        post: PostTransform::None,
    },
    OperationSpec {
        kind: OperationKind::Binarize,
        name: "binarize",
        label: "Binarize Image",
        aliases: &["Binarizar Imagen"],
        params: &[THRESHOLD],
        pre: PreTransform::ToGrayscale,
        post: PostTransform::Normalize,
    },
];

/// Fold case and drop separators so `EdgeDetect`, `edge_detect` and
/// `edge-detect` compare equal.
fn fold(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' ' | '/'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find the table row for an operation name.
///
/// Matches the canonical name, the display label or an alias, ignoring case
/// and separators.
///
/// # Errors
///
/// `UnknownOperation` if nothing matches.
pub fn lookup(name: &str) -> Result<&'static OperationSpec, EditError> {
    let wanted = fold(name);
    OPERATIONS
        .iter()
        .find(|spec| {
            fold(spec.name) == wanted
                || fold(spec.label) == wanted
                || spec.aliases.iter().any(|alias| fold(alias) == wanted)
        })
        .ok_or_else(|| EditError::UnknownOperation(name.to_string()))
}

/// Table row for a known kind.
pub fn spec_for(kind: OperationKind) -> &'static OperationSpec {
    // The table lists every kind exactly once, in declaration order
    &OPERATIONS[kind as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_kind_in_order() {
        for (i, kind) in OperationKind::ALL.iter().enumerate() {
            assert_eq!(OPERATIONS[i].kind, *kind);
            assert_eq!(OPERATIONS[i].name, kind.name());
            assert_eq!(spec_for(*kind).kind, *kind);
        }
    }

    #[test]
    fn test_lookup_by_name_variants() {
        assert_eq!(lookup("edge_detect").unwrap().kind, OperationKind::EdgeDetect);
        assert_eq!(lookup("EdgeDetect").unwrap().kind, OperationKind::EdgeDetect);
        assert_eq!(lookup("Edge Detection").unwrap().kind, OperationKind::EdgeDetect);
        assert_eq!(
            lookup("BrightnessContrast").unwrap().kind,
            OperationKind::BrightnessContrast
        );
        assert_eq!(lookup("  binarize").unwrap().kind, OperationKind::Binarize);
    }

    #[test]
    fn test_lookup_by_alias() {
        assert_eq!(lookup("Cambiar Tamaño").unwrap().kind, OperationKind::Resize);
        assert_eq!(
            lookup("detección de bordes").unwrap().kind,
            OperationKind::EdgeDetect
        );
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(
            lookup("sharpen"),
            Err(EditError::UnknownOperation("sharpen".to_string()))
        );
        assert!(lookup("").is_err());
    }

    #[test]
    fn test_table_policy() {
        assert_eq!(lookup("binarize").unwrap().pre, PreTransform::ToGrayscale);
        assert!(lookup("edge_detect").unwrap().post.expands_to_rgb());
        assert_eq!(lookup("invert").unwrap().post, PostTransform::None);
        assert!(OPERATIONS
            .iter()
            .filter(|s| s.kind != OperationKind::Binarize)
            .all(|s| s.pre == PreTransform::None));
    }

    #[test]
    fn test_param_schema_defaults() {
        let blur = lookup("blur").unwrap();
        assert_eq!(blur.params.len(), 1);
        assert_eq!(
            blur.params[0].kind,
            ParamKind::Float {
                min: 0.1,
                max: 10.0,
                default: 3.0,
                step: None
            }
        );
        assert_eq!(
            lookup("binarize").unwrap().params[0].kind,
            ParamKind::Integer {
                min: 0,
                max: 255,
                default: 128
            }
        );
        assert!(lookup("invert").unwrap().params.is_empty());
        assert!(lookup("edge_detect").unwrap().params.is_empty());
    }
}
