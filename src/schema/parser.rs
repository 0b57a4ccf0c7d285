//! JSON schema parser.
//!
//! Parses Avro-style schema JSON into a [`Field`] tree, rejecting every shape
//! the converter cannot handle.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::SchemaError;
use crate::schema::{Field, FieldKind, LogicalType, PrimitiveType};

/// Parse a schema from a JSON string.
///
/// # Example
/// ```
/// use avrocast::schema::parse_schema;
///
/// let field = parse_schema(r#"{"name": "T", "type": "record", "fields": []}"#).unwrap();
/// assert!(field.is_record());
/// ```
pub fn parse_schema(json: &str) -> Result<Field, SchemaError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
    parse_field(&value)
}

/// Parse one field definition (or a whole record schema) from decoded JSON.
pub fn parse_field(value: &Value) -> Result<Field, SchemaError> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaError::InvalidField(value.to_string()))?;

    let name = match obj.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(SchemaError::MissingName(value.to_string())),
    };

    let type_value = match obj.get("type") {
        None | Some(Value::Null) => return Err(SchemaError::MissingType { field: name }),
        Some(type_value) => type_value,
    };

    let fields = parse_fields_array(&name, obj)?;
    let logical_type = parse_logical_type(&name, obj)?;
    let default = obj.get("default").cloned();

    let field = match type_value {
        Value::String(type_name) => {
            let primitive = parse_type_name(&name, type_name)?;
            let children = match (primitive, fields) {
                (PrimitiveType::Record, Some(fields)) => parse_children(&name, fields)?,
                _ => Vec::new(),
            };
            Field {
                name,
                kind: FieldKind::Primitive(primitive),
                logical_type,
                children,
                default,
            }
        }
        Value::Array(variants) => {
            let inner = parse_union(&name, variants)?;
            Field {
                name,
                kind: FieldKind::Union(inner),
                logical_type,
                children: Vec::new(),
                default,
            }
        }
        Value::Object(nested) => parse_nested_type(name, nested, logical_type, default)?,
        other => {
            return Err(SchemaError::InvalidType {
                field: name,
                found: other.to_string(),
            })
        }
    };

    validate_union_default(&field)?;
    check_logical_type(&field);

    Ok(field)
}

/// Parse an object given as a field's `type`.
///
/// The object takes the enclosing field's name. The enclosing `default`
/// overrides the nested one; the enclosing `logicalType` fills in when the
/// nested object has none.
fn parse_nested_type(
    name: String,
    nested: &Map<String, Value>,
    logical_type: Option<LogicalType>,
    default: Option<Value>,
) -> Result<Field, SchemaError> {
    let mut nested = nested.clone();
    nested.insert("name".to_string(), Value::String(name));

    let mut field = parse_field(&Value::Object(nested))?;
    if default.is_some() {
        field.default = default;
    }
    if field.logical_type.is_none() {
        field.logical_type = logical_type;
    }
    Ok(field)
}

fn parse_type_name(field: &str, type_name: &str) -> Result<PrimitiveType, SchemaError> {
    PrimitiveType::from_name(type_name).ok_or_else(|| SchemaError::UnsupportedType {
        field: field.to_string(),
        type_name: type_name.to_string(),
    })
}

/// Validate a `["null", T]` union and return `T`.
fn parse_union(field: &str, variants: &[Value]) -> Result<PrimitiveType, SchemaError> {
    let invalid = |reason: &'static str| SchemaError::InvalidUnion {
        field: field.to_string(),
        found: Value::Array(variants.to_vec()).to_string(),
        reason,
    };

    if variants.len() != 2 {
        return Err(invalid("only unions of exactly two types are supported"));
    }
    if variants[0].as_str() != Some("null") {
        return Err(invalid("the first union type must be \"null\""));
    }
    let type_name = variants[1]
        .as_str()
        .ok_or_else(|| invalid("the second union type must be a type name"))?;

    match parse_type_name(field, type_name)? {
        PrimitiveType::Null => Err(invalid("the second union type cannot be \"null\"")),
        PrimitiveType::Record => Err(SchemaError::UnsupportedType {
            field: field.to_string(),
            type_name: "union with record".to_string(),
        }),
        primitive => Ok(primitive),
    }
}

fn parse_fields_array<'a>(
    field: &str,
    obj: &'a Map<String, Value>,
) -> Result<Option<&'a Vec<Value>>, SchemaError> {
    match obj.get("fields") {
        None => Ok(None),
        Some(Value::Array(fields)) => Ok(Some(fields)),
        Some(other) => Err(SchemaError::InvalidFields {
            field: field.to_string(),
            found: other.to_string(),
        }),
    }
}

fn parse_logical_type(
    field: &str,
    obj: &Map<String, Value>,
) -> Result<Option<LogicalType>, SchemaError> {
    match obj.get("logicalType") {
        None => Ok(None),
        Some(Value::String(name)) => Ok(Some(LogicalType::from_name(name))),
        Some(other) => Err(SchemaError::InvalidLogicalType {
            field: field.to_string(),
            found: other.to_string(),
        }),
    }
}

fn parse_children(record: &str, fields: &[Value]) -> Result<Vec<Field>, SchemaError> {
    let children = fields
        .iter()
        .map(parse_field)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for child in &children {
        if !seen.insert(child.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                record: record.to_string(),
                field: child.name.clone(),
            });
        }
    }

    Ok(children)
}

fn validate_union_default(field: &Field) -> Result<(), SchemaError> {
    match (&field.kind, &field.default) {
        (FieldKind::Union(_), Some(default)) if !default.is_null() => {
            Err(SchemaError::InvalidUnionDefault {
                field: field.name.clone(),
                found: default.to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn check_logical_type(field: &Field) {
    let Some(logical_type) = &field.logical_type else {
        return;
    };

    let base = match field.kind {
        FieldKind::Primitive(primitive) | FieldKind::Union(primitive) => primitive,
    };

    if logical_type.is_timestamp() && base != PrimitiveType::Long {
        warn!(
            field = %field.name,
            logical_type = logical_type.name(),
            base = base.name(),
            "Timestamp logical type on a non-long field is ignored"
        );
    } else if let LogicalType::Other(name) = logical_type {
        debug!(field = %field.name, logical_type = %name, "Ignoring logical type");
    }
}
