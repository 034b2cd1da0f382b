//! Configuration types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shakeform_fields::ValidationMessages;

use crate::error::ConfigError;

/// Color scheme of the form container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Follow the host's preferred color scheme.
    Auto,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" => Ok(Theme::Auto),
            other => Err(ConfigError::InvalidValue {
                key: "theme".into(),
                message: format!("unknown theme '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative settings of one form component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Heading shown above the fields; hidden when absent or empty.
    pub title: Option<String>,
    /// Label of the submit button.
    pub submit_text: String,
    pub theme: Theme,
    /// CSS width of the component, e.g. `"480px"` or `"100%"`.
    pub width: Option<String>,
    /// Wording of the built-in validation messages.
    pub messages: ValidationMessages,
    /// Number of undelivered events a slow subscriber may fall behind by.
    pub event_capacity: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            title: None,
            submit_text: "Submit".into(),
            theme: Theme::Light,
            width: None,
            messages: ValidationMessages::default(),
            event_capacity: 64,
        }
    }
}

impl FormConfig {
    /// Reject values the form cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_capacity == 0 {
            return Err(ConfigError::ValidationError {
                message: "event_capacity must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" auto ".parse::<Theme>().unwrap(), Theme::Auto);
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn defaults_match_component_defaults() {
        let config = FormConfig::default();
        assert_eq!(config.submit_text, "Submit");
        assert_eq!(config.theme, Theme::Light);
        assert!(config.title.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = FormConfig {
            event_capacity: 0,
            ..FormConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
