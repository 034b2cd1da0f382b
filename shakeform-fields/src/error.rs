//! Error types for field schemas

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised while accepting a field schema.
///
/// These are schema errors only. A value failing validation is not an error,
/// see [`crate::ValidationResult`].
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field declared without a name
    #[error("field at position {index} has an empty name")]
    EmptyName { index: usize },

    /// Duplicate field name
    #[error("duplicate field name: {name}")]
    DuplicateFieldName { name: String },

    /// Select, checkbox or radio field declared without options
    #[error("field '{name}' of type {kind} requires options")]
    MissingOptions { name: String, kind: String },

    /// Validation pattern does not compile
    #[error("invalid pattern on field '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: fancy_regex::Error,
    },

    /// Field not found by name
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// YAML schema document could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON schema document could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::DuplicateFieldName {
            name: "email".into(),
        };
        assert_eq!(err.to_string(), "duplicate field name: email");
    }

    #[test]
    fn test_missing_options_names_field_and_kind() {
        let err = FieldsError::MissingOptions {
            name: "color".into(),
            kind: "select".into(),
        };
        assert!(err.to_string().contains("color"));
        assert!(err.to_string().contains("select"));
    }
}
