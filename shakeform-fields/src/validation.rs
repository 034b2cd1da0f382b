//! ValidationEngine: per-field validity with a fixed rule precedence.
//!
//! Rules are evaluated in order and the first failing rule decides the
//! message:
//!
//! 1. `required` and the value is empty
//! 2. only for non-empty values, exactly one of:
//!    - `type: email`: the value must look like `local@domain.tld`
//!    - `validation.pattern`: the value must match the regex
//!    - a custom validator: must return `Ok(())`
//!
//! Anything else passes. A failing value is an ordinary outcome, never an
//! `Err`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::set::FieldSet;
use crate::types::{FieldDef, FieldValue};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The error message, if the field failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

/// User-facing messages for the built-in rules.
///
/// `required` may contain `{label}`, replaced by the field's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationMessages {
    pub required: String,
    pub email: String,
    pub pattern: String,
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self {
            required: "{label} is required.".into(),
            email: "Please enter a valid email address.".into(),
            pattern: "The input format is invalid.".into(),
        }
    }
}

impl ValidationMessages {
    fn required_for(&self, field: &FieldDef) -> String {
        self.required.replace("{label}", &field.label)
    }
}

/// Applies the validation rules to field values.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    messages: ValidationMessages,
}

impl ValidationEngine {
    pub fn new(messages: ValidationMessages) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &ValidationMessages {
        &self.messages
    }

    /// Validate the value of the field called `name` in `set`.
    ///
    /// Names that are not part of the set pass.
    pub fn validate(&self, set: &FieldSet, name: &str, value: &FieldValue) -> ValidationResult {
        match set.get(name) {
            Some(field) => self.evaluate(field, set.pattern(name), value),
            None => ValidationResult::Valid,
        }
    }

    fn evaluate(
        &self,
        field: &FieldDef,
        pattern: Option<&fancy_regex::Regex>,
        value: &FieldValue,
    ) -> ValidationResult {
        let result = if value.is_empty() {
            if field.required {
                ValidationResult::Invalid(self.messages.required_for(field))
            } else {
                ValidationResult::Valid
            }
        } else {
            self.evaluate_present(field, pattern, value)
        };
        trace!(field = %field.name, valid = result.is_valid(), "validated field");
        result
    }

    fn evaluate_present(
        &self,
        field: &FieldDef,
        pattern: Option<&fancy_regex::Regex>,
        value: &FieldValue,
    ) -> ValidationResult {
        let text = value.to_text();

        if field.type_.is_email() {
            if EMAIL_PATTERN.is_match(&text) {
                return ValidationResult::Valid;
            }
            return ValidationResult::Invalid(self.messages.email.clone());
        }

        if let (Some(rule), Some(regex)) = (&field.validation, pattern) {
            match regex.is_match(&text) {
                Ok(true) => return ValidationResult::Valid,
                Ok(false) => {}
                // Backtrack limit hit; the value is treated as not matching
                Err(err) => warn!(field = %field.name, %err, "pattern evaluation failed"),
            }
            let message = rule
                .message
                .clone()
                .unwrap_or_else(|| self.messages.pattern.clone());
            return ValidationResult::Invalid(message);
        }

        if let Some(custom) = &field.validate {
            return match custom.check(value) {
                Ok(()) => ValidationResult::Valid,
                Err(message) => ValidationResult::Invalid(message),
            };
        }

        ValidationResult::Valid
    }
}
