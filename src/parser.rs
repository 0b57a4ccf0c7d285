//! Record parser façade.
//!
//! [`RecordParser`] pairs a parsed schema with a set of coercion options and
//! turns raw JSON records into [`AvroValue`]s. The schema is parsed once; the
//! parser itself is immutable and can be shared across threads.

use serde_json::Value;
use tracing::debug;

use crate::convert::Converter;
use crate::error::{Error, SchemaError, ValueError};
use crate::options::CoercionOptions;
use crate::schema::{parse_field, parse_schema, Field};
use crate::value::AvroValue;

/// Converts JSON records against one record schema.
///
/// # Example
/// ```
/// use avrocast::{AvroValue, CoercionOptions, RecordParser};
///
/// let schema = r#"{
///     "name": "Event",
///     "type": "record",
///     "fields": [
///         {"name": "id", "type": "long"},
///         {"name": "score", "type": ["null", "double"], "default": null}
///     ]
/// }"#;
/// let parser = RecordParser::new(schema, CoercionOptions::new().with_string_to_number()).unwrap();
///
/// let record = parser.parse(br#"{"id": "17"}"#).unwrap();
/// assert_eq!(record.get("id"), Some(&AvroValue::Long(17)));
/// assert_eq!(record.get("score"), Some(&AvroValue::Null));
/// ```
#[derive(Debug, Clone)]
pub struct RecordParser {
    schema: Field,
    options: CoercionOptions,
}

impl RecordParser {
    /// Parse `schema` and build a parser for records of that shape.
    ///
    /// # Errors
    /// Returns `SchemaError` if the schema is malformed or its root is not a
    /// record.
    pub fn new(schema: &str, options: CoercionOptions) -> Result<Self, SchemaError> {
        Self::from_field(parse_schema(schema)?, options)
    }

    /// Build a parser from an already decoded schema document.
    pub fn from_value(schema: &Value, options: CoercionOptions) -> Result<Self, SchemaError> {
        Self::from_field(parse_field(schema)?, options)
    }

    fn from_field(schema: Field, options: CoercionOptions) -> Result<Self, SchemaError> {
        if !schema.is_record() {
            return Err(SchemaError::RootNotRecord);
        }
        debug!(
            schema = %schema.name,
            fields = schema.children.len(),
            "Built record parser"
        );
        Ok(Self { schema, options })
    }

    /// Decode `json` and convert it against the schema.
    ///
    /// # Errors
    /// Returns `ValueError::InvalidJson` or `ValueError::NotAnObject` when the
    /// input is not a JSON object, otherwise the first field that fails to
    /// convert.
    pub fn parse(&self, json: &[u8]) -> Result<AvroValue, ValueError> {
        let value: Value =
            serde_json::from_slice(json).map_err(|e| ValueError::InvalidJson(e.to_string()))?;
        self.parse_value(&value)
    }

    /// Convert an already decoded JSON value against the schema.
    pub fn parse_value(&self, value: &Value) -> Result<AvroValue, ValueError> {
        let object = value
            .as_object()
            .ok_or_else(|| ValueError::NotAnObject(value.to_string()))?;
        Converter::new(&self.options).convert_record(&self.schema, object)
    }

    /// The root record schema.
    pub fn schema(&self) -> &Field {
        &self.schema
    }

    pub fn options(&self) -> &CoercionOptions {
        &self.options
    }
}

/// Parse `schema` and convert a single JSON record in one call.
///
/// Prefer [`RecordParser`] when converting more than one record.
pub fn convert(schema: &str, json: &[u8], options: CoercionOptions) -> Result<AvroValue, Error> {
    let parser = RecordParser::new(schema, options)?;
    Ok(parser.parse(json)?)
}
