//! Error types for Shatter

use thiserror::Error;

/// The main error type for Shatter operations
#[derive(Debug, Error)]
pub enum ShatterError {
    #[error("Font load error: {0}")]
    FontLoad(String),

    #[error("Font parse error: {0}")]
    FontParse(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Value out of range: {field} must be greater than 0, got {value}")]
    NotPositive { field: String, value: f64 },

    #[error("Value out of range: {field} must be at least {min}, got {value}")]
    BelowMinimum { field: String, min: f64, value: f64 },

    #[error("Value out of range: {field} must be at most {max}, got {value}")]
    AboveMaximum { field: String, max: f64, value: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

/// Result type alias for Shatter operations
pub type Result<T> = std::result::Result<T, ShatterError>;

impl From<toml::de::Error> for ShatterError {
    fn from(err: toml::de::Error) -> Self {
        ShatterError::TomlParse(err.to_string())
    }
}

impl From<serde_json::Error> for ShatterError {
    fn from(err: serde_json::Error) -> Self {
        ShatterError::FontParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_messages_state_the_rule() {
        let err = ShatterError::BelowMinimum {
            field: "timing.pause".to_string(),
            min: 0.0,
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: timing.pause must be at least 0, got -1"
        );

        let err = ShatterError::NotPositive {
            field: "text.size".to_string(),
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: text.size must be greater than 0, got 0"
        );

        let err = ShatterError::AboveMaximum {
            field: "tessellation.max_iterations".to_string(),
            max: 12.0,
            value: 40.0,
        };
        assert!(err.to_string().contains("must be at most 12"));
    }
}
