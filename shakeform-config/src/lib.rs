//! ShakeForm configuration using Figment
//!
//! The declarative surface of a form: title text, submit-button label, theme,
//! width, the wording of the built-in validation messages, and the capacity of
//! the event channel. None of it changes how fields validate, only what the
//! user reads and sees.
//!
//! # Precedence
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults ([`FormConfig::default`])
//! 2. An optional configuration file (TOML, YAML or JSON, chosen by extension)
//! 3. Environment variables prefixed with `SHAKEFORM_`; nested keys use `__`
//!    (`SHAKEFORM_MESSAGES__REQUIRED`)
//!
//! ```no_run
//! use shakeform_config::ConfigProvider;
//!
//! let config = ConfigProvider::new().load(Some("form.toml".as_ref()))?;
//! println!("submit button: {}", config.submit_text);
//! # Ok::<(), shakeform_config::ConfigError>(())
//! ```

pub mod error;
pub mod provider;
pub mod types;

pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{FormConfig, Theme};
