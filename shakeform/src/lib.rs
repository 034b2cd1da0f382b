//! # ShakeForm
//!
//! A schema-driven form component. Give it a list of [`FieldDef`]s and it
//! mounts one control per field, keeps an ordered snapshot of every value,
//! validates on submit and publishes [`FormEvent`]s to subscribers.
//!
//! The component is headless: controls live in a [`ControlRegistry`] that a
//! host mirrors into whatever surface it draws, and [`render_html`] produces
//! the markup for web hosts.
//!
//! ```no_run
//! use shakeform::{Edit, FieldDef, FormEvent, ShakeForm};
//!
//! let mut form = ShakeForm::default();
//! form.set_fields(vec![
//!     FieldDef::new("email", "email").with_label("Email").with_required(true),
//! ])?;
//! let mut events = form.subscribe();
//!
//! form.input("email", Edit::Text("ferris@example.com".into()))?;
//! if let Some(payload) = form.submit() {
//!     println!("{}", serde_json::to_string(&payload).unwrap());
//! }
//! while let Ok(event) = events.try_recv() {
//!     if let FormEvent::Submitted(_) = event {
//!         break;
//!     }
//! }
//! # Ok::<(), shakeform::FormError>(())
//! ```

pub mod appearance;
pub mod control;
pub mod error;
pub mod event;
pub mod font;
pub mod form;
pub mod html;
pub mod logging;
pub mod render;
pub mod store;

pub use appearance::Appearance;
pub use control::{Control, ControlRegistry, Edit, GroupItem, GroupKind, SelectEntry, Widget};
pub use error::{FormError, Result};
pub use event::{FormEvent, SubmitPayload, TIMESTAMP_KEY};
pub use font::{font_stack, resolve_font, FontError, FontLoader, FontSource, DEFAULT_FONT_STACK};
pub use form::{FieldState, ShakeForm};
pub use html::render_html;
pub use render::{render_field, ErrorSlot, Label, RenderedField};
pub use store::{FormData, FormStateStore};

pub use shakeform_config::{ConfigError, ConfigProvider, FormConfig, Theme};
pub use shakeform_fields::{
    FieldDef, FieldOption, FieldSet, FieldType, FieldValue, FieldsError, PatternRule,
    ValidationEngine, ValidationMessages, ValidationResult,
};
