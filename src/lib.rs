//! JSON to Avro record conversion
//!
//! This library turns loosely typed JSON records into values shaped by an
//! Avro record schema. Numbers and booleans may arrive as strings, timestamps
//! as epoch seconds or formatted dates, and optional fields as nullable
//! unions; the converter resolves each of them to the exact type the schema
//! declares.
//!
//! # Example
//! ```
//! use avrocast::{AvroValue, CoercionOptions, RecordParser};
//!
//! let schema = r#"{
//!     "name": "Login",
//!     "type": "record",
//!     "fields": [
//!         {"name": "user", "type": "string"},
//!         {"name": "at", "type": "long", "logicalType": "timestamp-millis"}
//!     ]
//! }"#;
//! let options = CoercionOptions::new().with_timestamp_to_millis();
//! let parser = RecordParser::new(schema, options).unwrap();
//!
//! let record = parser.parse(br#"{"user": "ada", "at": 1571057118}"#).unwrap();
//! assert_eq!(record.get("at"), Some(&AvroValue::TimestampMillis(1_571_057_118_000)));
//! ```

pub mod convert;
pub mod error;
pub mod options;
pub mod parser;
pub mod schema;
pub mod value;

// Re-export main types
pub use convert::Converter;
pub use error::{Error, SchemaError, ValueError};
pub use options::CoercionOptions;
pub use parser::{convert, RecordParser};
pub use schema::{parse_schema, Field, FieldKind, LogicalType, PrimitiveType};
pub use value::AvroValue;
