//! Core error types for mindful-core.
//!
//! Widgets report their guards (missing elements, empty input, no mood
//! selection) as `None`, not as errors. The types here cover the failures a
//! user or operator can actually act on: an incomplete contact form, an
//! out-of-range value, or a bad configuration file.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mindful-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The home/config directory could not be determined
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// A contact form field that must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Department,
    Subject,
    Message,
    Consent,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Department => "department",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
            ContactField::Consent => "consent",
        };
        f.write_str(label)
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Contact form submitted with blank fields or without consent.
    /// The display text is the alert shown to the visitor.
    #[error("Please fill in all fields and accept the notice.")]
    IncompleteForm { missing: Vec<ContactField> },

    /// Value outside its permitted range
    #[error("Value {value} for '{field}' is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_form_displays_alert_text() {
        let err = ValidationError::IncompleteForm {
            missing: vec![ContactField::Email, ContactField::Consent],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all fields and accept the notice."
        );
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::InvalidValue {
            field: "preset".into(),
            message: "must be positive".into(),
        }
        .into();
        assert!(err.to_string().starts_with("Validation error:"));
    }
}
