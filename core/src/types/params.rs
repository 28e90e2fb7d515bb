//! Parameter values and the maps that carry them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A parameter value: a single string or a list of strings.
///
/// Serialized untagged, so the wire form stays `"x"` or `["x", "y"]` and
/// documents written by older hosts keep parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::Scalar(_) => None,
            ParamValue::List(values) => Some(values),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Parameters attached to one item. Ordered map, so iteration and
/// serialization are deterministic.
pub type ItemParams = BTreeMap<String, ParamValue>;

/// Dashboard-wide parameters supplied fresh on every resolution call.
pub type GlobalParams = ItemParams;
