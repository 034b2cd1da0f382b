//! Configuration provider using Figment

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

use crate::error::{ConfigError, ConfigResult};
use crate::types::FormConfig;

/// Prefix of environment variables read by [`ConfigProvider`].
pub const ENV_PREFIX: &str = "SHAKEFORM_";

/// Loads [`FormConfig`] from defaults, an optional file and the environment.
///
/// Nothing is cached; every call reads its sources again.
#[derive(Debug, Default)]
pub struct ConfigProvider;

impl ConfigProvider {
    pub fn new() -> Self {
        Self
    }

    /// Load and validate the configuration.
    pub fn load(&self, file: Option<&Path>) -> ConfigResult<FormConfig> {
        let config: FormConfig = self.build_figment(file)?.extract()?;
        config.validate()?;
        debug!(
            theme = %config.theme,
            submit_text = %config.submit_text,
            "loaded form configuration"
        );
        Ok(config)
    }

    fn build_figment(&self, file: Option<&Path>) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(FormConfig::default()));
        if let Some(path) = file {
            figment = figment.merge(self.load_config_file(path)?);
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn load_config_file(&self, path: &Path) -> ConfigResult<Figment> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        trace!("Loading config file: {}", path.display());

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Ok(Figment::from(Toml::file(path))),
            "yaml" | "yml" => Ok(Figment::from(Yaml::file(path))),
            "json" => Ok(Figment::from(Json::file(path))),
            other => Err(ConfigError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Theme;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn loads_defaults_without_file() {
        let config = ConfigProvider::new().load(None).unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    #[serial]
    fn file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("form.toml");
        fs::write(
            &path,
            r#"
title = "Contact us"
theme = "dark"

[messages]
required = "{label} must be filled in."
"#,
        )
        .unwrap();

        let config = ConfigProvider::new().load(Some(&path)).unwrap();
        assert_eq!(config.title.as_deref(), Some("Contact us"));
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.messages.required, "{label} must be filled in.");
        // Untouched keys keep their defaults
        assert_eq!(config.submit_text, "Submit");
        assert_eq!(config.messages.email, FormConfig::default().messages.email);
    }

    #[test]
    #[serial]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = ConfigProvider::new()
            .load(Some(&temp.path().join("absent.yaml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    #[serial]
    fn unknown_extension_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("form.ini");
        fs::write(&path, "title=x").unwrap();
        let err = ConfigProvider::new().load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { ref format } if format == "ini"));
    }
}
