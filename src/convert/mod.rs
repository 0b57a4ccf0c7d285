//! JSON to Avro value conversion
//!
//! This module walks a [`Field`] tree alongside a decoded JSON object and
//! produces the matching [`AvroValue`]. Records recurse, nullable unions are
//! resolved to their non-null branch, and `long` fields with a timestamp
//! logical type go through the timestamp resolver.

mod coerce;
mod primitive;
mod record;
mod timestamp;
mod union;

use serde_json::{Map, Value};

use crate::error::ValueError;
use crate::options::CoercionOptions;
use crate::schema::{Field, FieldKind, PrimitiveType};
use crate::value::AvroValue;

/// Converts JSON values against schema fields under one set of options.
///
/// A `Converter` only borrows its options, so it is cheap to create per call.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    options: &'a CoercionOptions,
}

impl<'a> Converter<'a> {
    pub fn new(options: &'a CoercionOptions) -> Self {
        Self { options }
    }

    /// Convert the value stored under `field.name` in `object`.
    pub fn convert_field(
        &self,
        field: &Field,
        object: &Map<String, Value>,
    ) -> Result<AvroValue, ValueError> {
        match field.kind {
            FieldKind::Primitive(PrimitiveType::Record) => self.convert_record_field(field, object),
            FieldKind::Primitive(primitive) => {
                self.convert_primitive_field(field, primitive, object)
            }
            FieldKind::Union(inner) => self.convert_union_field(field, inner, object),
        }
    }
}

fn mismatch(field: &Field, expected: &'static str, found: &Value) -> ValueError {
    if found.is_null() {
        ValueError::UnexpectedNull {
            field: field.name.clone(),
        }
    } else {
        ValueError::TypeMismatch {
            field: field.name.clone(),
            expected,
            found: found.to_string(),
        }
    }
}
