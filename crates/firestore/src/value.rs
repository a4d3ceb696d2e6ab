//! Conversion between plain JSON and Firestore's tagged value encoding.
//!
//! Firestore's REST API wraps every field in a single-key object naming its
//! type (`{"stringValue": "hi"}`, `{"integerValue": "42"}`, ...). The
//! externally tagged [`Value`] enum mirrors that shape one-to-one so serde
//! does the wire work.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number};
use std::collections::BTreeMap;

use crate::FirestoreError;

/// A single Firestore field value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 values travel as decimal strings
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(LatLng),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MapValue {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    /// Encode a plain JSON value.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::NullValue(()),
            serde_json::Value::Bool(b) => Value::BooleanValue(*b),
            serde_json::Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Value::IntegerValue(n.to_string())
                } else {
                    Value::DoubleValue(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::StringValue(s.clone()),
            serde_json::Value::Array(items) => Value::ArrayValue(ArrayValue {
                values: items.iter().map(Value::from_json).collect(),
            }),
            serde_json::Value::Object(map) => Value::MapValue(MapValue {
                fields: map
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            }),
        }
    }

    /// Decode into plain JSON.
    ///
    /// Timestamps, bytes and references become strings. Integers that do not
    /// fit an `i64` are kept as their decimal string.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Value::NullValue(()) => serde_json::Value::Null,
            Value::BooleanValue(b) => serde_json::Value::Bool(b),
            Value::IntegerValue(s) => match s.parse::<i64>() {
                Ok(n) => serde_json::Value::Number(n.into()),
                Err(_) => serde_json::Value::String(s),
            },
            Value::DoubleValue(f) => Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::TimestampValue(s) | Value::StringValue(s) | Value::BytesValue(s) | Value::ReferenceValue(s) => {
                serde_json::Value::String(s)
            }
            Value::GeoPointValue(p) => serde_json::json!({
                "latitude": p.latitude,
                "longitude": p.longitude,
            }),
            Value::ArrayValue(a) => {
                serde_json::Value::Array(a.values.into_iter().map(Value::into_json).collect())
            }
            Value::MapValue(m) => serde_json::Value::Object(fields_into_json(m.fields)),
        }
    }
}

/// Encode a JSON object as a document's `fields` map.
pub fn encode_fields(data: &serde_json::Value) -> Result<BTreeMap<String, Value>, FirestoreError> {
    match data {
        serde_json::Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), Value::from_json(v)))
            .collect()),
        other => Err(FirestoreError::InvalidParameters(format!(
            "document data must be a JSON object, got {}",
            other
        ))),
    }
}

pub fn fields_into_json(fields: BTreeMap<String, Value>) -> Map<String, serde_json::Value> {
    fields.into_iter().map(|(k, v)| (k, v.into_json())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape_matches_firestore() {
        let encoded = encode_fields(&json!({
            "name": "Ada",
            "age": 36,
            "score": 1.5,
            "active": true,
            "nickname": null,
        }))
        .unwrap();

        let wire = serde_json::to_value(&encoded).unwrap();
        assert_eq!(
            wire,
            json!({
                "active": { "booleanValue": true },
                "age": { "integerValue": "36" },
                "name": { "stringValue": "Ada" },
                "nickname": { "nullValue": null },
                "score": { "doubleValue": 1.5 },
            })
        );
    }

    #[test]
    fn test_nested_values_decode_to_plain_json() {
        let wire = json!({
            "tags": { "arrayValue": { "values": [
                { "stringValue": "a" },
                { "integerValue": "2" }
            ] } },
            "meta": { "mapValue": { "fields": {
                "updatedAt": { "timestampValue": "2024-05-01T10:00:00.000Z" },
                "empty": { "arrayValue": {} }
            } } },
            "place": { "geoPointValue": { "latitude": 1.0, "longitude": 2.0 } }
        });

        let fields: BTreeMap<String, Value> = serde_json::from_value(wire).unwrap();
        let decoded = serde_json::Value::Object(fields_into_json(fields));

        assert_eq!(
            decoded,
            json!({
                "tags": ["a", 2],
                "meta": { "updatedAt": "2024-05-01T10:00:00.000Z", "empty": [] },
                "place": { "latitude": 1.0, "longitude": 2.0 }
            })
        );
    }

    #[test]
    fn test_oversized_integer_stays_a_string() {
        let value = Value::IntegerValue("99999999999999999999".to_string());
        assert_eq!(value.into_json(), json!("99999999999999999999"));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let err = encode_fields(&json!(["not", "a", "map"])).unwrap_err();
        assert!(matches!(err, FirestoreError::InvalidParameters(_)));
    }
}
