//! Notifications published by a form.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::store::FormData;

/// Key under which the capture time is serialized in a submit payload.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Data handed out when a form is submitted successfully.
///
/// Serializes as one flat object: every field value, then `timestamp` as an
/// ISO-8601 UTC string with millisecond precision. A field named `timestamp`
/// is shadowed by the capture time.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitPayload {
    pub data: FormData,
    pub timestamp: DateTime<Utc>,
}

impl SubmitPayload {
    pub fn new(data: FormData, timestamp: DateTime<Utc>) -> Self {
        Self { data, timestamp }
    }

    /// Capture time formatted like `2026-10-19T08:30:00.123Z`.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Serialize for SubmitPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shadowed = usize::from(self.data.contains(TIMESTAMP_KEY));
        let mut map = serializer.serialize_map(Some(self.data.len() - shadowed + 1))?;
        for (name, value) in self.data.iter().filter(|(name, _)| *name != TIMESTAMP_KEY) {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(TIMESTAMP_KEY, &self.timestamp_iso())?;
        map.end()
    }
}

/// A notification emitted by the form controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "detail")]
pub enum FormEvent {
    /// Emitted on every input or change, carrying the full snapshot.
    #[serde(rename = "formchange")]
    Changed(FormData),
    /// Emitted when a submit attempt passes full-form validation.
    #[serde(rename = "formsubmit")]
    Submitted(SubmitPayload),
}

impl FormEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::Changed(_) => "formchange",
            FormEvent::Submitted(_) => "formsubmit",
        }
    }
}
