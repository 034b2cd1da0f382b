//! Environment variable tests for the configuration system

use serial_test::serial;
use shakeform_config::{ConfigError, ConfigProvider, Theme};
use std::env;
use std::fs;
use tempfile::TempDir;

/// Sets environment variables for the lifetime of the guard.
struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            env::set_var(key, value);
        }
        Self {
            keys: vars.iter().map(|(k, _)| *k).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn env_overrides_top_level_keys() {
    let _guard = EnvGuard::set(&[
        ("SHAKEFORM_SUBMIT_TEXT", "Send"),
        ("SHAKEFORM_THEME", "auto"),
        ("SHAKEFORM_WIDTH", "480px"),
    ]);

    let config = ConfigProvider::new().load(None).unwrap();
    assert_eq!(config.submit_text, "Send");
    assert_eq!(config.theme, Theme::Auto);
    assert_eq!(config.width.as_deref(), Some("480px"));
}

#[test]
#[serial]
fn env_overrides_nested_message() {
    let _guard = EnvGuard::set(&[("SHAKEFORM_MESSAGES__EMAIL", "Bad email")]);

    let config = ConfigProvider::new().load(None).unwrap();
    assert_eq!(config.messages.email, "Bad email");
}

#[test]
#[serial]
fn env_wins_over_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("form.yaml");
    fs::write(&path, "title: From file\nsubmit_text: File button\n").unwrap();
    let _guard = EnvGuard::set(&[("SHAKEFORM_SUBMIT_TEXT", "Env button")]);

    let config = ConfigProvider::new().load(Some(&path)).unwrap();
    assert_eq!(config.title.as_deref(), Some("From file"));
    assert_eq!(config.submit_text, "Env button");
}

#[test]
#[serial]
fn invalid_theme_fails_to_parse() {
    let _guard = EnvGuard::set(&[("SHAKEFORM_THEME", "neon")]);

    let err = ConfigProvider::new().load(None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
#[serial]
fn zero_event_capacity_fails_validation() {
    let _guard = EnvGuard::set(&[("SHAKEFORM_EVENT_CAPACITY", "0")]);

    let err = ConfigProvider::new().load(None).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}
