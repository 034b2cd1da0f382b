//! Field renderer: one [`FieldDef`] in, one [`RenderedField`] out.
//!
//! Rendering is deterministic and free of side effects. The caller mounts the
//! result into a [`ControlRegistry`](crate::ControlRegistry).

use shakeform_fields::{FieldDef, FieldType, FieldValue};

use crate::control::{Control, GroupItem, GroupKind, SelectEntry, Widget};

/// Label shown above a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    /// Name of the control the label points at.
    pub target: String,
    /// Draw the required marker after the text.
    pub required: bool,
}

/// Slot below a control that shows the field's visible error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    message: Option<String>,
}

impl ErrorSlot {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none()
    }

    /// Show `message`, or clear the slot with `None`.
    pub fn set(&mut self, message: Option<String>) {
        self.message = message.filter(|m| !m.is_empty());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}

/// Everything one field contributes to the form: label, control, error slot
/// and container presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub label: Label,
    pub control: Control,
    pub error: ErrorSlot,
    pub width: Option<String>,
    pub container_style: Option<String>,
}

/// Render one field definition.
pub fn render_field(field: &FieldDef) -> RenderedField {
    let widget = match &field.type_ {
        FieldType::Input(input_type) => Widget::Input {
            input_type: input_type.clone(),
            value: scalar_value(field),
            placeholder: field.placeholder.clone(),
            style: field.style.clone(),
        },
        FieldType::Textarea => Widget::Textarea {
            value: scalar_value(field),
            placeholder: field.placeholder.clone(),
            style: field.style.clone(),
        },
        FieldType::Select => Widget::Select {
            entries: select_entries(field),
            style: field.style.clone(),
        },
        FieldType::Checkbox => Widget::Group {
            kind: GroupKind::Checkbox,
            items: group_items(field, GroupKind::Checkbox),
        },
        FieldType::Radio => Widget::Group {
            kind: GroupKind::Radio,
            items: group_items(field, GroupKind::Radio),
        },
    };

    RenderedField {
        label: Label {
            text: field.label.clone(),
            target: field.name.clone(),
            required: field.required,
        },
        control: Control::new(field.name.clone(), widget),
        error: ErrorSlot::default(),
        width: field.width.clone(),
        container_style: field.container_style.clone(),
    }
}

fn scalar_value(field: &FieldDef) -> String {
    field
        .value
        .as_ref()
        .map(FieldValue::to_text)
        .unwrap_or_default()
}

fn explicit_scalar(field: &FieldDef) -> Option<&str> {
    match &field.value {
        Some(FieldValue::Text(value)) => Some(value),
        _ => None,
    }
}

/// Options in schema order behind an optional disabled placeholder.
///
/// Selection follows a native single select: the last entry marked selected
/// wins, and with nothing marked the first enabled entry is selected.
fn select_entries(field: &FieldDef) -> Vec<SelectEntry> {
    let explicit = explicit_scalar(field);
    let mut entries = Vec::with_capacity(field.options().len() + 1);

    if let Some(placeholder) = &field.placeholder {
        entries.push(SelectEntry {
            value: String::new(),
            label: placeholder.clone(),
            disabled: true,
            selected: field.value.as_ref().map_or(true, FieldValue::is_empty),
        });
    }

    for option in field.options() {
        entries.push(SelectEntry {
            value: option.value().to_string(),
            label: option.label().to_string(),
            disabled: false,
            selected: explicit == Some(option.value()),
        });
    }

    let chosen = entries
        .iter()
        .rposition(|e| e.selected)
        .or_else(|| entries.iter().position(|e| !e.disabled));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.selected = Some(i) == chosen;
    }
    entries
}

fn group_items(field: &FieldDef, kind: GroupKind) -> Vec<GroupItem> {
    field
        .options()
        .iter()
        .map(|option| {
            let checked = match (kind, &field.value) {
                (GroupKind::Checkbox, Some(FieldValue::List(selected))) => {
                    selected.iter().any(|v| v == option.value())
                }
                (GroupKind::Radio, Some(FieldValue::Text(selected))) => selected == option.value(),
                _ => false,
            };
            GroupItem {
                value: option.value().to_string(),
                label: option.label().to_string(),
                checked,
            }
        })
        .collect()
}
