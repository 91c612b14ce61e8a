//! Parameter values supplied by the UI and the schema describing them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single parameter value as it arrives from the UI.
///
/// Deserialized untagged, so `3.0`, `[640, 480]` and `"horizontal"` are all
/// accepted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Pair(f64, f64),
    Text(String),
}

impl ParamValue {
    /// Short description of the value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Number(_) => "number",
            ParamValue::Pair(..) => "pair",
            ParamValue::Text(_) => "text",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<(u32, u32)> for ParamValue {
    fn from((a, b): (u32, u32)) -> Self {
        ParamValue::Pair(a as f64, b as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

/// Parameter values for one invocation, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What kind of control a parameter needs, with its bounds and default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamKind {
    /// Continuous slider.
    Float {
        min: f64,
        max: f64,
        default: f64,
        step: Option<f64>,
    },
    /// Integer slider.
    Integer { min: i64, max: i64, default: i64 },
    /// One of a fixed set of options; `default` indexes `options`.
    Choice {
        options: &'static [&'static str],
        default: usize,
    },
    /// Two positive integers (width, height), defaulting to the source size.
    Size,
}

/// Schema entry for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    /// Other accepted keys (the editor's original Spanish names).
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    #[serde(flatten)]
    pub kind: ParamKind,
}

impl ParamSpec {
    /// The supplied value for this parameter, under its name or an alias.
    pub fn value_in<'a>(&self, params: &'a ParameterSet) -> Option<&'a ParamValue> {
        params
            .get(self.name)
            .or_else(|| self.aliases.iter().find_map(|alias| params.get(alias)))
    }
}
