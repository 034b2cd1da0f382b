//! Error types for the form controller

use shakeform_config::ConfigError;
use shakeform_fields::FieldsError;
use thiserror::Error;

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors returned by form operations.
///
/// Field values failing validation are not errors; they surface through error
/// slots and the boolean results of `validate`.
#[derive(Debug, Error)]
pub enum FormError {
    /// The field schema was rejected
    #[error(transparent)]
    Schema(#[from] FieldsError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No control is mounted under this name
    #[error("no control named '{name}'")]
    UnknownField { name: String },

    /// The control has no selectable option with this value
    #[error("control '{name}' has no option '{value}'")]
    UnknownOption { name: String, value: String },

    /// The edit does not fit the kind of control
    #[error("cannot apply {edit} to {control} control '{name}'")]
    EditMismatch {
        name: String,
        control: String,
        edit: String,
    },
}

impl FormError {
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }
}
