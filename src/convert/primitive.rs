//! Converters for primitive fields.

use serde_json::{Map, Value};
use tracing::trace;

use super::coerce::{
    double_to_float, number_to_i64, string_to_bool, string_to_double, string_to_float,
    string_to_int, string_to_long,
};
use super::{mismatch, Converter};
use crate::error::ValueError;
use crate::schema::{Field, PrimitiveType};
use crate::value::AvroValue;

impl Converter<'_> {
    /// Convert a non-union field, falling back to its default when absent.
    pub(crate) fn convert_primitive_field(
        &self,
        field: &Field,
        primitive: PrimitiveType,
        object: &Map<String, Value>,
    ) -> Result<AvroValue, ValueError> {
        if field.is_timestamp() {
            return self.convert_timestamp_field(field, object);
        }
        let value = lookup(field, object)?;
        self.convert_value(field, primitive, value)
    }

    /// Convert an already resolved JSON value to `primitive`.
    pub(crate) fn convert_value(
        &self,
        field: &Field,
        primitive: PrimitiveType,
        value: &Value,
    ) -> Result<AvroValue, ValueError> {
        match primitive {
            PrimitiveType::Null => match value {
                Value::Null => Ok(AvroValue::Null),
                other => Err(mismatch(field, "null", other)),
            },
            PrimitiveType::Boolean => self.convert_boolean(field, value).map(AvroValue::Boolean),
            PrimitiveType::Bytes => match value {
                Value::String(s) => Ok(AvroValue::Bytes(s.as_bytes().to_vec())),
                other => Err(mismatch(field, "bytes", other)),
            },
            PrimitiveType::String => match value {
                Value::String(s) => Ok(AvroValue::String(s.clone())),
                other => Err(mismatch(field, "string", other)),
            },
            PrimitiveType::Float => self.convert_float(field, value).map(AvroValue::Float),
            PrimitiveType::Double => self.convert_double(field, value).map(AvroValue::Double),
            PrimitiveType::Int => self.convert_int(field, value).map(AvroValue::Int),
            PrimitiveType::Long => self.convert_long(field, value).map(AvroValue::Long),
            PrimitiveType::Record => match value {
                Value::Object(nested) => self.convert_record(field, nested),
                other => Err(mismatch(field, "record", other)),
            },
        }
    }

    fn convert_boolean(&self, field: &Field, value: &Value) -> Result<bool, ValueError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if self.options.string_to_bool => {
                string_to_bool(s).ok_or_else(|| invalid_string(field, s, "boolean"))
            }
            other => Err(mismatch(field, "boolean", other)),
        }
    }

    fn convert_float(&self, field: &Field, value: &Value) -> Result<f32, ValueError> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .and_then(double_to_float)
                .ok_or_else(|| out_of_range(field, n, "float")),
            Value::String(s) if self.options.string_to_number => {
                string_to_float(s).ok_or_else(|| invalid_string(field, s, "float"))
            }
            other => Err(mismatch(field, "float", other)),
        }
    }

    pub(crate) fn convert_double(&self, field: &Field, value: &Value) -> Result<f64, ValueError> {
        match value {
            Value::Number(n) => n.as_f64().ok_or_else(|| out_of_range(field, n, "double")),
            Value::String(s) if self.options.string_to_number => {
                string_to_double(s).ok_or_else(|| invalid_string(field, s, "double"))
            }
            other => Err(mismatch(field, "double", other)),
        }
    }

    fn convert_int(&self, field: &Field, value: &Value) -> Result<i32, ValueError> {
        match value {
            Value::Number(n) => number_to_i64(n)
                .and_then(|i| i32::try_from(i).ok())
                .ok_or_else(|| out_of_range(field, n, "int")),
            Value::String(s) if self.options.string_to_number => {
                string_to_int(s).ok_or_else(|| invalid_string(field, s, "int"))
            }
            other => Err(mismatch(field, "int", other)),
        }
    }

    pub(crate) fn convert_long(&self, field: &Field, value: &Value) -> Result<i64, ValueError> {
        match value {
            Value::Number(n) => number_to_i64(n).ok_or_else(|| out_of_range(field, n, "long")),
            Value::String(s) if self.options.string_to_number => {
                string_to_long(s).ok_or_else(|| invalid_string(field, s, "long"))
            }
            other => Err(mismatch(field, "long", other)),
        }
    }
}

/// The field's value, or its default when the key is absent.
fn lookup<'v>(
    field: &'v Field,
    object: &'v Map<String, Value>,
) -> Result<&'v Value, ValueError> {
    if let Some(value) = object.get(&field.name) {
        return Ok(value);
    }
    match &field.default {
        Some(default) => {
            trace!(field = %field.name, "Using default value");
            Ok(default)
        }
        None => Err(ValueError::MissingValue {
            field: field.name.clone(),
        }),
    }
}

pub(crate) fn invalid_string(field: &Field, value: &str, target: &'static str) -> ValueError {
    ValueError::InvalidString {
        field: field.name.clone(),
        value: value.to_string(),
        target,
    }
}

pub(crate) fn out_of_range(
    field: &Field,
    value: impl ToString,
    target: &'static str,
) -> ValueError {
    ValueError::OutOfRange {
        field: field.name.clone(),
        value: value.to_string(),
        target,
    }
}
