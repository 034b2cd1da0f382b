//! ShakeForm, the form controller.
//!
//! Owns the field set, the mounted controls, the snapshot store and the
//! validation engine, and turns host interactions into events:
//!
//! - input/change → recompute snapshot → [`FormEvent::Changed`] → silent
//!   check of the field that changed
//! - submit → full validation with visible errors → [`FormEvent::Submitted`]
//!   only if every field passes
//!
//! All methods run to completion synchronously; a form is driven by one
//! event at a time.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use shakeform_config::{ConfigProvider, FormConfig, Theme};
use shakeform_fields::{FieldDef, FieldSet, ValidationEngine};
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use crate::appearance::Appearance;
use crate::control::{ControlRegistry, Edit};
use crate::error::{FormError, Result};
use crate::event::{FormEvent, SubmitPayload};
use crate::render::render_field;
use crate::store::{FormData, FormStateStore};

/// Where a field is in its validation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Freshly rendered from schema defaults.
    Untouched,
    /// Edited and checked silently; no message shown.
    Touched { valid: bool },
    /// Checked with its message written to the error slot.
    Shown { valid: bool },
}

/// A schema-driven form component.
pub struct ShakeForm {
    title: Option<String>,
    submit_text: String,
    fields: FieldSet,
    registry: ControlRegistry,
    store: FormStateStore,
    engine: ValidationEngine,
    states: HashMap<String, FieldState>,
    appearance: Appearance,
    events: broadcast::Sender<FormEvent>,
}

impl ShakeForm {
    pub fn new(config: FormConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            title: config.title,
            submit_text: config.submit_text,
            fields: FieldSet::default(),
            registry: ControlRegistry::new(),
            store: FormStateStore::new(),
            engine: ValidationEngine::new(config.messages),
            states: HashMap::new(),
            appearance: Appearance::new(config.theme, config.width),
            events,
        }
    }

    /// Build a form from defaults, an optional config file and `SHAKEFORM_*`
    /// environment variables.
    pub fn from_config_file(file: Option<&Path>) -> Result<Self> {
        let config = ConfigProvider::new().load(file)?;
        Ok(Self::new(config))
    }

    /// Receive every event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    /// Replace the field set, render it from its defaults and reset the
    /// snapshot. On a schema error the current fields stay in place.
    pub fn set_fields(&mut self, fields: Vec<FieldDef>) -> Result<()> {
        let set = FieldSet::new(fields)?;
        self.set_field_set(set);
        Ok(())
    }

    /// Like [`ShakeForm::set_fields`] for an already checked set.
    pub fn set_field_set(&mut self, fields: FieldSet) {
        self.fields = fields;
        self.render();
    }

    fn render(&mut self) {
        self.registry = ControlRegistry::new();
        for field in self.fields.iter() {
            self.registry.mount(render_field(field));
        }
        self.states = self
            .fields
            .names()
            .map(|name| (name.to_string(), FieldState::Untouched))
            .collect();
        self.store.recompute(&self.fields, &self.registry);
        debug!(fields = self.fields.len(), "rendered form fields");
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Mounted controls, for hosts mirroring them into a real surface.
    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    /// A copy of the current snapshot.
    pub fn form_data(&self) -> FormData {
        self.store.snapshot()
    }

    /// Apply a user edit to a control and handle it as an input event.
    ///
    /// Returns whether the edited field passes its silent check.
    pub fn input(&mut self, name: &str, edit: Edit) -> Result<bool> {
        self.registry
            .control_mut(name)
            .ok_or_else(|| FormError::unknown_field(name))?
            .apply(edit)?;
        Ok(self.handle_input(name))
    }

    /// React to an input or change event from the control called `name`.
    pub fn handle_input(&mut self, name: &str) -> bool {
        let snapshot = self.store.recompute(&self.fields, &self.registry).clone();
        self.emit(FormEvent::Changed(snapshot));
        self.validate_field(name, false)
    }

    /// Validate one field.
    ///
    /// With `show_errors` the message is written to (or cleared from) the
    /// field's error slot; otherwise the slot is left alone. The control's
    /// invalid marker follows the outcome either way. Unknown names pass.
    pub fn validate_field(&mut self, name: &str, show_errors: bool) -> bool {
        let Some(value) = self.store.get(name) else {
            return true;
        };
        let result = self.engine.validate(&self.fields, name, value);
        let valid = result.is_valid();
        trace!(field = name, valid, show_errors, "field checked");

        if show_errors {
            if let Some(slot) = self.registry.error_slot_mut(name) {
                slot.set(result.message().map(String::from));
            }
        }
        if let Some(control) = self.registry.control_mut(name) {
            control.set_invalid(!valid);
        }
        let state = if show_errors {
            FieldState::Shown { valid }
        } else {
            FieldState::Touched { valid }
        };
        self.states.insert(name.to_string(), state);
        valid
    }

    /// Full-form check with visible errors; same as [`ShakeForm::validate_all`].
    pub fn validate(&mut self) -> bool {
        self.validate_all()
    }

    /// Validate every field in schema order with visible errors. Every field
    /// is checked even after a failure.
    pub fn validate_all(&mut self) -> bool {
        let names: Vec<String> = self.fields.names().map(String::from).collect();
        names
            .iter()
            .fold(true, |all_valid, name| self.validate_field(name, true) && all_valid)
    }

    /// Handle a submit attempt.
    ///
    /// Returns the emitted payload, or `None` when validation failed and no
    /// event was sent.
    pub fn submit(&mut self) -> Option<SubmitPayload> {
        if !self.validate_all() {
            debug!("submit blocked by validation errors");
            return None;
        }
        let payload = SubmitPayload::new(self.form_data(), Utc::now());
        info!(fields = payload.data.len(), timestamp = %payload.timestamp_iso(), "form submitted");
        self.emit(FormEvent::Submitted(payload.clone()));
        Some(payload)
    }

    /// Restore every field to its schema default and clear shown errors.
    ///
    /// Controls are rebuilt from the schema; references into the old
    /// registry do not survive, event subscriptions do.
    pub fn reset(&mut self) {
        self.registry.clear_all();
        self.render();
        debug!("form reset");
    }

    /// Validation lifecycle state of a field.
    pub fn field_state(&self, name: &str) -> Option<FieldState> {
        self.states.get(name).copied()
    }

    /// Message currently shown under a field.
    pub fn error_message(&self, name: &str) -> Option<&str> {
        self.registry.error_slot(name).and_then(|slot| slot.message())
    }

    fn emit(&self, event: FormEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    // --- Declarative surface ---

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn submit_text(&self) -> &str {
        &self.submit_text
    }

    /// Apply a component attribute (`title`, `submit-text`, `theme`, `width`).
    /// `None` means the attribute was removed.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        match name {
            "title" => self.title = value.map(String::from),
            "submit-text" => {
                self.submit_text = value
                    .map(String::from)
                    .unwrap_or_else(|| FormConfig::default().submit_text)
            }
            "theme" => {
                let theme = match value.map(str::parse::<Theme>) {
                    Some(Ok(theme)) => theme,
                    Some(Err(err)) => {
                        warn!(%err, "falling back to light theme");
                        Theme::Light
                    }
                    None => Theme::Light,
                };
                self.appearance.set_theme(theme);
            }
            "width" => self.appearance.set_width(value.map(String::from)),
            other => trace!(attribute = other, "ignoring unknown attribute"),
        }
    }

    // --- Presentation collaborators ---

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.appearance.set_theme(theme);
    }

    pub fn set_css_variables<I, K, V>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.appearance.set_css_variables(variables);
    }

    pub fn apply_custom_css(&mut self, css: impl Into<String>) {
        self.appearance.apply_custom_css(css);
    }

    /// Host color-scheme preference, consulted by the `auto` theme.
    pub fn apply_color_scheme(&mut self, prefers_dark: bool) {
        self.appearance.apply_color_scheme(prefers_dark);
    }

    /// Use a family resolved by [`resolve_font`](crate::resolve_font).
    pub fn set_font_family(&mut self, family: &str) {
        self.appearance.set_font_family(family);
    }
}

impl Default for ShakeForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}
