//! Normalizer error types
//!
//! Only structural failures are errors. Malformed fields, rejected records
//! and duplicate IDs are normal outcomes and never surface here.

use thiserror::Error;

/// Errors that can occur during normalization
#[derive(Error, Debug)]
pub enum NormalizerError {
    /// Top-level input is not a list of records
    #[error("Input is not iterable: expected a JSON array, found {0}")]
    NotIterable(&'static str),

    /// A record is not an associative structure
    #[error("Record {index} is not an object: found {found}")]
    NotAnObject {
        /// Position of the record in the input
        index: usize,
        /// JSON type that was found instead
        found: &'static str,
    },

    /// Record source failed to produce records
    #[error("Source error: {0}")]
    Source(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
