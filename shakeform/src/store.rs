//! Form state store: the derived name → value snapshot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shakeform_fields::{FieldSet, FieldType, FieldValue};
use tracing::trace;

use crate::control::ControlRegistry;
use crate::logging::Pretty;

/// Current form contents keyed by field name, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(IndexMap<String, FieldValue>);

impl FormData {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, FieldValue> {
        self.0
    }
}

impl FromIterator<(String, FieldValue)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Owns the snapshot. It never watches controls itself; the controller calls
/// [`FormStateStore::recompute`] after every interaction.
#[derive(Debug, Default)]
pub struct FormStateStore {
    data: FormData,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the snapshot by walking the declared fields and reading each
    /// one's control. A field without a mounted control reads as empty.
    pub fn recompute(&mut self, fields: &FieldSet, registry: &ControlRegistry) -> &FormData {
        self.data = fields
            .iter()
            .map(|field| {
                let value = match registry.control(&field.name) {
                    Some(control) => control.value(),
                    None => empty_value(&field.type_),
                };
                (field.name.clone(), value)
            })
            .collect();
        trace!("recomputed snapshot: {}", Pretty(&self.data));
        &self.data
    }

    /// A copy of the snapshot; changes to it never reach the store.
    pub fn snapshot(&self) -> FormData {
        self.data.clone()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.data.get(name)
    }
}

fn empty_value(type_: &FieldType) -> FieldValue {
    match type_ {
        FieldType::Checkbox => FieldValue::List(Vec::new()),
        _ => FieldValue::default(),
    }
}
