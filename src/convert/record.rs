//! Record conversion.

use serde_json::{Map, Value};

use super::Converter;
use crate::error::ValueError;
use crate::schema::{Field, PrimitiveType};
use crate::value::AvroValue;

impl Converter<'_> {
    /// Convert every child of `record` from `object`, in schema order.
    ///
    /// Keys in `object` that the schema does not name are ignored. A failing
    /// child is reported with its name attached, so nested failures carry the
    /// full path down to the offending field.
    pub fn convert_record(
        &self,
        record: &Field,
        object: &Map<String, Value>,
    ) -> Result<AvroValue, ValueError> {
        let mut fields = Vec::with_capacity(record.children.len());
        for child in &record.children {
            let value = self
                .convert_field(child, object)
                .map_err(|e| e.in_field(&child.name))?;
            fields.push((child.name.clone(), value));
        }
        Ok(AvroValue::Record(fields))
    }

    /// Nested records must be present; their defaults are never consulted.
    pub(crate) fn convert_record_field(
        &self,
        field: &Field,
        object: &Map<String, Value>,
    ) -> Result<AvroValue, ValueError> {
        match object.get(&field.name) {
            Some(value) => self.convert_value(field, PrimitiveType::Record, value),
            None => Err(ValueError::MissingValue {
                field: field.name.clone(),
            }),
        }
    }
}
