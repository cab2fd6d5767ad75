//! Defines the crate level error type and the validation error raised at the input boundary.

/// The errors that may occur while loading, aggregating or rendering movements.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// Some input was malformed and was rejected instead of being coerced.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCsv(String),

    /// The JSON document could not be parsed as a list of movements.
    #[error("Could not parse the JSON document: {0}")]
    InvalidJson(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(String),
}

/// A value that failed validation.
///
/// `field` is a path to the offending value, e.g. `movements[3].amount` or
/// `canvas.width`, so the caller can point the user at the exact input.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// The path of the offending field.
    pub field: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error for a field of the movement at `index`.
    pub fn movement(index: usize, field: &str, reason: impl Into<String>) -> Self {
        Self::new(format!("movements[{index}].{field}"), reason)
    }
}
