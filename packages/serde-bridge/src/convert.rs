//! Conversions between projected values and serde types.

use base64::Engine;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tagmap_core::{Mapping, Record, ToValue, Value};

use crate::error::Result;

/// Convert a projected mapping to a JSON object.
pub fn mapping_to_json(mapping: &Mapping) -> serde_json::Value {
    serde_json::Value::Object(
        mapping
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect(),
    )
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        // JSON doesn't have bytes, so we base64 encode
        Value::Bytes(b) => {
            serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
        Value::Map(map) => mapping_to_json(map),
        Value::Record(record) => record_to_json(record.as_record()),
    }
}

/// Render a record keyed by its raw field names.
///
/// An unexpanded record has no tag key to project under, so this is what a
/// shallow mapping's nested records turn into.
pub fn record_to_json(record: &dyn Record) -> serde_json::Value {
    serde_json::Value::Object(
        record
            .field_names()
            .into_iter()
            .map(|name| {
                let value = record
                    .field_value(name)
                    .map(|v| value_to_json(&v))
                    .unwrap_or(serde_json::Value::Null);
                (name.to_string(), value)
            })
            .collect(),
    )
}

/// Read a JSON document back into a value tree.
///
/// Integers outside `i64` keep their digits as strings rather than losing precision
/// as floats. Objects become maps; JSON has no way to mark a record.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Value::Integer(i),
            (None, Some(u)) => u.to_value(),
            (None, None) => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(json_object_to_mapping(map)),
    }
}

/// Read a JSON object into a mapping, e.g. a previously stored projection.
pub fn json_to_mapping(json: serde_json::Value) -> Option<Mapping> {
    match json {
        serde_json::Value::Object(map) => Some(json_object_to_mapping(map)),
        _ => None,
    }
}

fn json_object_to_mapping(map: serde_json::Map<String, serde_json::Value>) -> Mapping {
    map.into_iter()
        .map(|(k, v)| (k, json_to_value(v)))
        .collect()
}

/// Serialize a mapping straight to a JSON string.
pub fn to_json_string(mapping: &Mapping) -> Result<String> {
    Ok(serde_json::to_string(&SerializeMapping(mapping))?)
}

/// Adapter making a [`Value`] serializable with any serde format.
pub struct SerializeValue<'a>(pub &'a Value);

/// Adapter making a [`Mapping`] serializable with any serde format.
pub struct SerializeMapping<'a>(pub &'a Mapping);

impl Serialize for SerializeValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            // Same rendering as value_to_json: non-finite floats are null,
            // bytes are base64 text.
            Value::Float(f) if !f.is_finite() => serializer.serialize_unit(),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(b) => {
                serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(b))
            }
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(&SerializeValue(item))?;
                }
                seq.end()
            }
            Value::Map(map) => SerializeMapping(map).serialize(serializer),
            Value::Record(record) => {
                let names = record.field_names();
                let mut out = serializer.serialize_map(Some(names.len()))?;
                for name in names {
                    let value = record.field_value(name).unwrap_or_default();
                    out.serialize_entry(name, &SerializeValue(&value))?;
                }
                out.end()
            }
        }
    }
}

impl Serialize for SerializeMapping<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            out.serialize_entry(k, &SerializeValue(v))?;
        }
        out.end()
    }
}
