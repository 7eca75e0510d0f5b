//! JSON bridging for flat records.
//!
//! Handy for fixtures and for inspecting what a record turns into. JSON has
//! no integer object keys, so a nested map keyed by `Int(1)` comes back keyed
//! by `Str("1")`; decoding such a map into an integer-keyed field fails.

use crate::error::{BinMapError, Result};
use crate::values::{BinMap, BinValue};

/// Render a flat record as a JSON object.
pub fn to_json(bins: &BinMap) -> Result<serde_json::Value> {
    serde_json::to_value(bins).map_err(|e| BinMapError::conversion(e, "json"))
}

/// Parse a flat record from a JSON object.
pub fn from_json(value: serde_json::Value) -> Result<BinMap> {
    match value {
        serde_json::Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| BinMapError::conversion(e, "flat record"))
        }
        serde_json::Value::Null => Ok(BinMap::new()),
        other => Err(BinMapError::shape_mismatch("object", json_kind(&other))),
    }
}

/// Parse a single dynamic value from JSON.
pub fn value_from_json(value: serde_json::Value) -> Result<BinValue> {
    serde_json::from_value(value).map_err(|e| BinMapError::conversion(e, "bin value"))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
