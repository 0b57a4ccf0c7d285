//! Schema tree types.
//!
//! A schema is a tree of [`Field`] nodes rooted at a record. Only the subset of
//! Avro needed for JSON record conversion is modelled: primitives, nested
//! records and nullable unions of the form `["null", T]`.

use serde_json::{json, Map, Value};

/// Base type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Null type - no value.
    Null,
    /// Boolean type.
    Boolean,
    /// Sequence of bytes.
    Bytes,
    /// 32-bit IEEE 754 floating-point.
    Float,
    /// 64-bit IEEE 754 floating-point.
    Double,
    /// 64-bit signed integer.
    Long,
    /// 32-bit signed integer.
    Int,
    /// Unicode string.
    String,
    /// Record with named children.
    Record,
}

impl PrimitiveType {
    /// Look up a type by its Avro name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(PrimitiveType::Null),
            "boolean" => Some(PrimitiveType::Boolean),
            "bytes" => Some(PrimitiveType::Bytes),
            "float" => Some(PrimitiveType::Float),
            "double" => Some(PrimitiveType::Double),
            "long" => Some(PrimitiveType::Long),
            "int" => Some(PrimitiveType::Int),
            "string" => Some(PrimitiveType::String),
            "record" => Some(PrimitiveType::Record),
            _ => None,
        }
    }

    /// The Avro name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Null => "null",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Bytes => "bytes",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Long => "long",
            PrimitiveType::Int => "int",
            PrimitiveType::String => "string",
            PrimitiveType::Record => "record",
        }
    }
}

/// Logical type annotation on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalType {
    /// Milliseconds since the Unix epoch.
    TimestampMillis,
    /// Microseconds since the Unix epoch.
    TimestampMicros,
    /// Any other annotation; carried through, ignored during conversion.
    Other(String),
}

impl LogicalType {
    /// Look up a logical type by its Avro name; unknown names become `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "timestamp-millis" => LogicalType::TimestampMillis,
            "timestamp-micros" => LogicalType::TimestampMicros,
            other => LogicalType::Other(other.to_string()),
        }
    }

    /// The Avro name of the logical type.
    pub fn name(&self) -> &str {
        match self {
            LogicalType::TimestampMillis => "timestamp-millis",
            LogicalType::TimestampMicros => "timestamp-micros",
            LogicalType::Other(name) => name,
        }
    }

    /// Whether this is one of the timestamp logical types.
    pub fn is_timestamp(&self) -> bool {
        matches!(
            self,
            LogicalType::TimestampMillis | LogicalType::TimestampMicros
        )
    }
}

/// How a field's value is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single declared type. Records keep their fields in [`Field::children`].
    Primitive(PrimitiveType),
    /// `["null", T]`; the payload is `T`.
    Union(PrimitiveType),
}

/// A named, typed node of the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The name of the field.
    pub name: String,
    /// The shape of the field's value.
    pub kind: FieldKind,
    /// Optional logical type annotation.
    pub logical_type: Option<LogicalType>,
    /// Child fields of a record; empty for every other type.
    pub children: Vec<Field>,
    /// Declared default. A declared `null` default is `Some(Value::Null)`.
    pub default: Option<Value>,
}

impl Field {
    /// Create a field with the given name and kind and no annotations.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            logical_type: None,
            children: Vec::new(),
            default: None,
        }
    }

    /// Create a record field with the given children.
    pub fn record(name: impl Into<String>, children: Vec<Field>) -> Self {
        Self {
            children,
            ..Self::new(name, FieldKind::Primitive(PrimitiveType::Record))
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the logical type.
    pub fn with_logical_type(mut self, logical_type: LogicalType) -> Self {
        self.logical_type = Some(logical_type);
        self
    }

    /// Whether this field is a record.
    pub fn is_record(&self) -> bool {
        self.kind == FieldKind::Primitive(PrimitiveType::Record)
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Field> {
        self.children.iter().find(|f| f.name == name)
    }

    /// Whether this field is a `long` carrying a timestamp logical type.
    pub fn is_timestamp(&self) -> bool {
        matches!(self.kind, FieldKind::Primitive(PrimitiveType::Long))
            && self.logical_type.as_ref().is_some_and(LogicalType::is_timestamp)
    }

    /// Serialize the field to a JSON Value.
    ///
    /// Nested records are written inline as `"type": "record"` with their
    /// `fields`, so parsing the output yields an equal `Field`.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(&self.name));

        match self.kind {
            FieldKind::Primitive(primitive) => {
                obj.insert("type".to_string(), json!(primitive.name()));
            }
            FieldKind::Union(inner) => {
                obj.insert("type".to_string(), json!(["null", inner.name()]));
            }
        }

        if let Some(logical_type) = &self.logical_type {
            obj.insert("logicalType".to_string(), json!(logical_type.name()));
        }

        if self.is_record() {
            obj.insert(
                "fields".to_string(),
                Value::Array(self.children.iter().map(Field::to_json_value).collect()),
            );
        }

        if let Some(default) = &self.default {
            obj.insert("default".to_string(), default.clone());
        }

        Value::Object(obj)
    }
}
