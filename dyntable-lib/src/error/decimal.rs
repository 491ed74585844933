//! DecimalError for total aggregation

/// Error returned when a cell value cannot be read as a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Value '{value}' is not a decimal number")]
pub struct DecimalError {
    /// The offending input, as text.
    pub value: String,
}

impl DecimalError {
    /// Creates a new decimal error for the given input.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
