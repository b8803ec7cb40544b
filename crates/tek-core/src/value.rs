use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Opaque scalar candidate for an axis.
///
/// Values are never interpreted: they are compared for equality and rendered
/// verbatim into command-line flags. Text keeps its exact spelling, so
/// `"10e-4"` is not normalised to `0.001`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    /// Integer literal.
    Int(i64),
    /// Floating point literal.
    Float(f64),
    /// Free-form text.
    Text(String),
}

impl Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisValue::Int(value) => write!(f, "{value}"),
            AxisValue::Float(value) => write!(f, "{value}"),
            AxisValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        AxisValue::Text(value.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        AxisValue::Text(value)
    }
}

impl From<i64> for AxisValue {
    fn from(value: i64) -> Self {
        AxisValue::Int(value)
    }
}

impl From<i32> for AxisValue {
    fn from(value: i32) -> Self {
        AxisValue::Int(value.into())
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        AxisValue::Float(value)
    }
}

/// Equality against a textual rendering, used by sentinel filters.
impl PartialEq<str> for AxisValue {
    fn eq(&self, other: &str) -> bool {
        match self {
            AxisValue::Text(text) => text == other,
            other_value => other_value.to_string() == other,
        }
    }
}
