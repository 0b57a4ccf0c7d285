//! Nullable union resolution.
//!
//! Only `["null", T]` unions reach the converter. A null or absent value
//! selects the null branch; anything else is converted as a plain `T` field
//! and tagged with the branch name.

use serde_json::{Map, Value};

use super::Converter;
use crate::error::ValueError;
use crate::schema::{Field, FieldKind, PrimitiveType};
use crate::value::AvroValue;

impl Converter<'_> {
    pub(crate) fn convert_union_field(
        &self,
        field: &Field,
        inner: PrimitiveType,
        object: &Map<String, Value>,
    ) -> Result<AvroValue, ValueError> {
        let value = match object.get(&field.name) {
            Some(Value::Null) => return Ok(AvroValue::Null),
            Some(value) => value,
            None if field.default.is_some() => return Ok(AvroValue::Null),
            None => {
                return Err(ValueError::MissingValue {
                    field: field.name.clone(),
                })
            }
        };

        if matches!(inner, PrimitiveType::Record | PrimitiveType::Null) {
            return Err(ValueError::Unsupported {
                field: field.name.clone(),
                type_name: inner.name().to_string(),
            });
        }

        let branch = Field {
            name: field.name.clone(),
            kind: FieldKind::Primitive(inner),
            logical_type: field.logical_type.clone(),
            children: Vec::new(),
            default: None,
        };
        let converted = if branch.is_timestamp() {
            self.convert_timestamp_field(&branch, object)?
        } else {
            self.convert_value(&branch, inner, value)?
        };
        Ok(AvroValue::Union(inner.name().to_string(), Box::new(converted)))
    }
}
