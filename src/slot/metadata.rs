/// Slot metadata values
///
/// Free-form key/value data attached to a slot. Keys are strings, values are
/// scalars or nested lists/maps. Stored in ordered maps so that encoded
/// documents list keys in a stable order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered metadata map carried by every slot
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Stored document fields the codec does not interpret, kept verbatim
pub type ExtraFields = BTreeMap<String, serde_json::Value>;

/// Metadata value variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Boolean flag
    Bool(bool),
    /// 64-bit integer
    Int(i64),
    /// Unsigned integer too large for `Int`
    UInt(u64),
    /// 64-bit float
    Float(f64),
    /// Text
    Text(String),
    /// Ordered list
    List(Vec<MetadataValue>),
    /// Nested map
    Map(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetadataValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataValue::Int(v) => Some(*v),
            MetadataValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            MetadataValue::Int(v) => u64::try_from(*v).ok(),
            MetadataValue::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as float, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Int(v) => Some(*v as f64),
            MetadataValue::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MetadataValue]> {
        match self {
            MetadataValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, MetadataValue>> {
        match self {
            MetadataValue::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this value is a scalar (not a list or map)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, MetadataValue::List(_) | MetadataValue::Map(_))
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Bool(v)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Int(v)
    }
}

impl From<i32> for MetadataValue {
    fn from(v: i32) -> Self {
        MetadataValue::Int(v as i64)
    }
}

impl From<u64> for MetadataValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => MetadataValue::Int(v),
            Err(_) => MetadataValue::UInt(v),
        }
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Float(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Text(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::Text(v)
    }
}

impl From<Vec<MetadataValue>> for MetadataValue {
    fn from(v: Vec<MetadataValue>) -> Self {
        MetadataValue::List(v)
    }
}
