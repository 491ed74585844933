//! Configuration errors

/// Error raised while loading or parsing a table configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The column direction is neither `vertical` nor `horizontal`.
    #[error("Invalid column direction '{value}', expected 'vertical' or 'horizontal'")]
    InvalidColumnDirection { value: String },

    /// The variant flag is not one of the known cosmetic flags.
    #[error("Unknown table variant '{value}'")]
    UnknownVariant { value: String },

    /// The configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for the expected shape.
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new invalid column direction error.
    pub fn invalid_column_direction(value: impl Into<String>) -> Self {
        Self::InvalidColumnDirection {
            value: value.into(),
        }
    }

    /// Creates a new unknown variant error.
    pub fn unknown_variant(value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            value: value.into(),
        }
    }
}
