//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Attribute value structures for the OpenTelemetry Data Lake Bridge
//!
//! Log bodies and attributes are trees of [`AttributeValue`] nodes, mirroring
//! the OpenTelemetry `AnyValue` model. Values serialize to and from plain JSON
//! so that records can be read from and written to JSON based transports.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Attribute map keyed by attribute name
pub type AttributeMap = HashMap<String, AttributeValue>;

/// A single node of a nested attribute tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum AttributeValue {
    /// UTF-8 string value
    String(String),

    /// Boolean value
    Bool(bool),

    /// Signed integer value
    Int(i64),

    /// Floating point value
    Double(f64),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Ordered list of values
    Array(Vec<AttributeValue>),

    /// Nested key/value map
    Map(AttributeMap),

    /// Absent value
    #[default]
    Empty,
}

impl AttributeValue {
    /// Get the string payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the nested map, if this is a map value
    pub fn as_map(&self) -> Option<&AttributeMap> {
        match self {
            AttributeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Consume the value, returning the nested map if this is a map value
    pub fn into_map(self) -> Option<AttributeMap> {
        match self {
            AttributeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get the list elements, if this is an array value
    pub fn as_array(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::Array(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Name of the variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "string",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::Double(_) => "double",
            AttributeValue::Bytes(_) => "bytes",
            AttributeValue::Array(_) => "array",
            AttributeValue::Map(_) => "map",
            AttributeValue::Empty => "empty",
        }
    }
}

/// Build an attribute map from a JSON object; any other JSON value yields an
/// empty map.
pub fn attributes_from_json(value: Value) -> AttributeMap {
    AttributeValue::from(value).into_map().unwrap_or_default()
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttributeValue::Empty,
            Value::Bool(b) => AttributeValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Int(i),
                None => AttributeValue::Double(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => AttributeValue::String(s),
            Value::Array(values) => {
                AttributeValue::Array(values.into_iter().map(AttributeValue::from).collect())
            }
            Value::Object(entries) => AttributeValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, AttributeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::String(s) => Value::String(s),
            AttributeValue::Bool(b) => Value::Bool(b),
            AttributeValue::Int(i) => Value::from(i),
            // Non-finite doubles have no JSON representation
            AttributeValue::Double(d) => serde_json::Number::from_f64(d)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            AttributeValue::Bytes(bytes) => {
                Value::Array(bytes.into_iter().map(Value::from).collect())
            }
            AttributeValue::Array(values) => {
                Value::Array(values.into_iter().map(Value::from).collect())
            }
            AttributeValue::Map(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            AttributeValue::Empty => Value::Null,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(values: Vec<AttributeValue>) -> Self {
        AttributeValue::Array(values)
    }
}

impl From<AttributeMap> for AttributeValue {
    fn from(map: AttributeMap) -> Self {
        AttributeValue::Map(map)
    }
}
