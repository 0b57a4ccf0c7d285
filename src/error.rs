//! Error types for schema parsing and record conversion

use thiserror::Error;

/// Errors raised while parsing a schema into a [`Field`](crate::schema::Field) tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Schema text is not valid JSON
    #[error("Invalid schema JSON: {0}")]
    InvalidJson(String),

    /// A field definition is not a JSON object
    #[error("Field must be an object, found: {0}")]
    InvalidField(String),

    /// Missing or empty `name`
    #[error("Field name is required: {0}")]
    MissingName(String),

    /// Missing or null `type`
    #[error("Field \"{field}\" is missing its type")]
    MissingType { field: String },

    /// `type` is neither a string, an array nor an object
    #[error("Field \"{field}\" has an unknown type shape: {found}")]
    InvalidType { field: String, found: String },

    /// Union is not of the form `["null", T]`
    #[error("Field \"{field}\" has an invalid union {found}: {reason}")]
    InvalidUnion {
        field: String,
        found: String,
        reason: &'static str,
    },

    /// Union default other than `null`
    #[error("Field \"{field}\" is a union and its default must be null, found: {found}")]
    InvalidUnionDefault { field: String, found: String },

    /// `logicalType` is not a string
    #[error("Field \"{field}\" has a logicalType that is not a string: {found}")]
    InvalidLogicalType { field: String, found: String },

    /// `fields` is not an array
    #[error("Field \"{field}\" has fields that are not an array: {found}")]
    InvalidFields { field: String, found: String },

    /// Type name that is unknown or not supported
    #[error("Field \"{field}\" has type \"{type_name}\" which is not supported")]
    UnsupportedType { field: String, type_name: String },

    /// Two children of the same record share a name
    #[error("Record \"{record}\" declares field \"{field}\" more than once")]
    DuplicateField { record: String, field: String },

    /// Root of the schema is not a record
    #[error("schema root field must be of type record")]
    RootNotRecord,
}

/// Errors raised while converting a JSON record against a parsed schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// Record bytes are not valid JSON
    #[error("Invalid record JSON: {0}")]
    InvalidJson(String),

    /// Record did not decode to a JSON object
    #[error("Record must be a JSON object, found: {0}")]
    NotAnObject(String),

    /// No value and no default
    #[error("value for field \"{field}\" not found")]
    MissingValue { field: String },

    /// Null where the declared type does not allow it
    #[error("value for field \"{field}\" is null")]
    UnexpectedNull { field: String },

    /// JSON value of the wrong kind for the declared type
    #[error("value {found} in field \"{field}\" is not of type \"{expected}\"")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// String could not be coerced to the declared type
    #[error("string \"{value}\" in field \"{field}\" is not valid as {target}")]
    InvalidString {
        field: String,
        value: String,
        target: &'static str,
    },

    /// Number does not fit the declared width
    #[error("value {value} in field \"{field}\" is out of range for {target}")]
    OutOfRange {
        field: String,
        value: String,
        target: &'static str,
    },

    /// String did not match the configured date-time format
    #[error("error while parsing value \"{value}\" in field \"{field}\" as date with format \"{format}\"")]
    InvalidDateTime {
        field: String,
        value: String,
        format: String,
    },

    /// Field type the converter cannot produce
    #[error("type \"{type_name}\" in field \"{field}\" is not supported")]
    Unsupported { field: String, type_name: String },

    /// Failure inside a record field, wrapped once per nesting level
    #[error("field \"{field}\": {source}")]
    InField {
        field: String,
        #[source]
        source: Box<ValueError>,
    },
}

impl ValueError {
    /// Wrap this error with the name of the record field it came from.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        ValueError::InField {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Field names from the outermost record down to the failing field.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let ValueError::InField { field, source } = current {
            path.push(field.as_str());
            current = source;
        }
        path
    }

    /// The innermost error, with all field breadcrumbs removed.
    pub fn root_cause(&self) -> &ValueError {
        let mut current = self;
        while let ValueError::InField { source, .. } = current {
            current = source;
        }
        current
    }
}

/// Top-level error for one-shot conversions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Schema error
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Value error
    #[error("Value error: {0}")]
    Value(#[from] ValueError),
}
