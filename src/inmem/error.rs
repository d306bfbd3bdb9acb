use serde_json::Value as JsonValue;
use thiserror::Error;

/// Failure while building a table from loosely typed data.
#[derive(Debug, Error)]
pub enum TableError {
    /// A cell cannot be mapped to text, integer or boolean.
    #[error("Malformed value for column '{column}': {value}")]
    MalformedValue {
        /// Column the value was given for.
        column: String,
        /// Offending source value.
        value: JsonValue,
    },
    /// The data is not a list of name to value mappings.
    #[error("Malformed table data: {0}")]
    MalformedShape(String),
    /// The JSON text could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
