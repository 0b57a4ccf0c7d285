//! Schema types and parsing.
//!
//! This module defines the schema tree used to drive conversion and the parser
//! that builds it from Avro schema JSON.

mod parser;
mod types;

pub use parser::{parse_field, parse_schema};
pub use types::*;
