//! Converted value tree.
//!
//! [`AvroValue`] is what the converter hands to an Avro encoder: every value
//! already has the width and shape the schema declares.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A value shaped by the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum AvroValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// Byte array
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Record fields in schema order
    Record(Vec<(String, AvroValue)>),
    /// Non-null branch of a nullable union (branch type name and value)
    Union(String, Box<AvroValue>),
    /// Timestamp in milliseconds since Unix epoch
    TimestampMillis(i64),
    /// Timestamp in microseconds since Unix epoch
    TimestampMicros(i64),
}

impl AvroValue {
    /// Look up a record field by name.
    pub fn get(&self, name: &str) -> Option<&AvroValue> {
        match self {
            AvroValue::Record(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AvroValue::Null)
    }

    /// The instant a timestamp value denotes, if this is one.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            AvroValue::TimestampMillis(ms) => DateTime::from_timestamp_millis(*ms),
            AvroValue::TimestampMicros(us) => DateTime::from_timestamp_micros(*us),
            AvroValue::Union(_, inner) => inner.as_datetime(),
            _ => None,
        }
    }

    /// Convert to Avro's JSON encoding.
    ///
    /// Unions become single-entry objects keyed by the branch type name,
    /// bytes become a string of ISO-8859-1 code points and timestamps their
    /// raw epoch offset.
    ///
    /// JSON has no NaN or infinity, so a non-finite `Float` or `Double` is
    /// written as `null`. The converter never produces one: non-finite and
    /// overflowing inputs are rejected before they reach an `AvroValue`, so
    /// this only affects values built by hand.
    pub fn to_json(&self) -> Value {
        match self {
            AvroValue::Null => Value::Null,
            AvroValue::Boolean(b) => Value::Bool(*b),
            AvroValue::Int(i) => Value::Number((*i).into()),
            AvroValue::Long(l) => Value::Number((*l).into()),
            AvroValue::Float(f) => serde_json::Number::from_f64(*f as f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            AvroValue::Double(d) => serde_json::Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            AvroValue::Bytes(b) => Value::String(b.iter().map(|&byte| byte as char).collect()),
            AvroValue::String(s) => Value::String(s.clone()),
            AvroValue::Record(fields) => {
                let mut map = Map::new();
                for (name, value) in fields {
                    map.insert(name.clone(), value.to_json());
                }
                Value::Object(map)
            }
            AvroValue::Union(branch, value) => {
                let mut map = Map::new();
                map.insert(branch.clone(), value.to_json());
                Value::Object(map)
            }
            AvroValue::TimestampMillis(ms) => Value::Number((*ms).into()),
            AvroValue::TimestampMicros(us) => Value::Number((*us).into()),
        }
    }
}
