//! Live controls and the registry that owns them.
//!
//! A [`Control`] is the in-memory counterpart of one rendered input element:
//! a single-line input, a textarea, a select, or a group of checkboxes or
//! radios sharing one name. The [`ControlRegistry`] maps field names to their
//! rendered controls in mount order; it is filled once per render and read on
//! every recompute.

use indexmap::IndexMap;
use shakeform_fields::FieldValue;

use crate::error::{FormError, Result};
use crate::render::{ErrorSlot, RenderedField};

/// One `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectEntry {
    pub value: String,
    pub label: String,
    /// Placeholder entries are disabled and never submit a value.
    pub disabled: bool,
    pub selected: bool,
}

/// Checkbox or radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Checkbox,
    Radio,
}

impl GroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Checkbox => "checkbox",
            GroupKind::Radio => "radio",
        }
    }
}

/// One box of a checkbox or radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItem {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// The element-specific state of a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Input {
        input_type: String,
        value: String,
        placeholder: Option<String>,
        style: Option<String>,
    },
    Textarea {
        value: String,
        placeholder: Option<String>,
        style: Option<String>,
    },
    Select {
        entries: Vec<SelectEntry>,
        style: Option<String>,
    },
    Group {
        kind: GroupKind,
        items: Vec<GroupItem>,
    },
}

/// A user edit applied to a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace the text of an input or textarea.
    Text(String),
    /// Choose a select option by value.
    Select(String),
    /// Check or uncheck a checkbox/radio by value.
    Check { value: String, checked: bool },
}

/// A live control bound to a field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    name: String,
    widget: Widget,
    invalid: bool,
}

impl Control {
    pub fn new(name: impl Into<String>, widget: Widget) -> Self {
        Self {
            name: name.into(),
            widget,
            invalid: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Whether the control carries the "invalid" visual marker.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Current value as a form submission would see it.
    ///
    /// Checkbox groups yield every checked value in option order. A select
    /// whose selected entry is disabled, or a radio group with nothing
    /// checked, yields `""`.
    pub fn value(&self) -> FieldValue {
        match &self.widget {
            Widget::Input { value, .. } | Widget::Textarea { value, .. } => {
                FieldValue::Text(value.clone())
            }
            Widget::Select { entries, .. } => FieldValue::Text(
                entries
                    .iter()
                    .find(|e| e.selected && !e.disabled)
                    .map(|e| e.value.clone())
                    .unwrap_or_default(),
            ),
            Widget::Group {
                kind: GroupKind::Checkbox,
                items,
            } => FieldValue::List(
                items
                    .iter()
                    .filter(|i| i.checked)
                    .map(|i| i.value.clone())
                    .collect(),
            ),
            Widget::Group {
                kind: GroupKind::Radio,
                items,
            } => FieldValue::Text(
                items
                    .iter()
                    .find(|i| i.checked)
                    .map(|i| i.value.clone())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Apply a user edit.
    pub fn apply(&mut self, edit: Edit) -> Result<()> {
        match (&mut self.widget, edit) {
            (Widget::Input { value, .. }, Edit::Text(text))
            | (Widget::Textarea { value, .. }, Edit::Text(text)) => {
                *value = text;
                Ok(())
            }
            (Widget::Select { entries, .. }, Edit::Select(choice)) => {
                let index = entries
                    .iter()
                    .position(|e| e.value == choice && !e.disabled)
                    .ok_or_else(|| FormError::UnknownOption {
                        name: self.name.clone(),
                        value: choice,
                    })?;
                for (i, entry) in entries.iter_mut().enumerate() {
                    entry.selected = i == index;
                }
                Ok(())
            }
            (Widget::Group { kind, items }, Edit::Check { value, checked }) => {
                let index = items.iter().position(|i| i.value == value).ok_or_else(|| {
                    FormError::UnknownOption {
                        name: self.name.clone(),
                        value,
                    }
                })?;
                if *kind == GroupKind::Radio && checked {
                    for item in items.iter_mut() {
                        item.checked = false;
                    }
                }
                items[index].checked = checked;
                Ok(())
            }
            (widget, edit) => Err(FormError::EditMismatch {
                name: self.name.clone(),
                control: widget_kind(widget).to_string(),
                edit: format!("{edit:?}"),
            }),
        }
    }

    /// Empty the control: blank text, nothing selected or checked.
    pub fn clear(&mut self) {
        match &mut self.widget {
            Widget::Input { value, .. } | Widget::Textarea { value, .. } => value.clear(),
            Widget::Select { entries, .. } => {
                for entry in entries.iter_mut() {
                    entry.selected = false;
                }
            }
            Widget::Group { items, .. } => {
                for item in items.iter_mut() {
                    item.checked = false;
                }
            }
        }
        self.invalid = false;
    }
}

fn widget_kind(widget: &Widget) -> &'static str {
    match widget {
        Widget::Input { .. } => "input",
        Widget::Textarea { .. } => "textarea",
        Widget::Select { .. } => "select",
        Widget::Group { kind, .. } => kind.as_str(),
    }
}

/// Rendered fields keyed by name, in mount order.
#[derive(Debug, Clone, Default)]
pub struct ControlRegistry {
    entries: IndexMap<String, RenderedField>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a rendered field after the ones already mounted.
    pub fn mount(&mut self, field: RenderedField) {
        self.entries.insert(field.control.name().to_string(), field);
    }

    pub fn get(&self, name: &str) -> Option<&RenderedField> {
        self.entries.get(name)
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.entries.get(name).map(|f| &f.control)
    }

    pub fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.entries.get_mut(name).map(|f| &mut f.control)
    }

    pub fn error_slot(&self, name: &str) -> Option<&ErrorSlot> {
        self.entries.get(name).map(|f| &f.error)
    }

    pub fn error_slot_mut(&mut self, name: &str) -> Option<&mut ErrorSlot> {
        self.entries.get_mut(name).map(|f| &mut f.error)
    }

    /// Rendered fields in mount order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderedField> {
        self.entries.values()
    }

    /// Blank every control, clear every error slot and invalid marker.
    pub fn clear_all(&mut self) {
        for field in self.entries.values_mut() {
            field.control.clear();
            field.error.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
