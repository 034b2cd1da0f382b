//! Core field schema types.
//!
//! Everything except the custom validator serializes to/from YAML and JSON via
//! serde. A field definition is immutable for the lifetime of one render cycle.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

/// The kind of control a field renders as.
///
/// The wire form is a plain string (`"email"`, `"textarea"`, `"checkbox"`, ...).
/// Any string that is not one of the four structured kinds is an input type
/// and renders as a single-line input carrying that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Single-line input: text, email, password, number, tel, url, date, ...
    Input(String),
    Textarea,
    Select,
    Checkbox,
    Radio,
}

impl FieldType {
    pub fn text() -> Self {
        Self::Input("text".into())
    }

    pub fn email() -> Self {
        Self::Input("email".into())
    }

    /// Wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input(kind) => kind,
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, Self::Input(kind) if kind == "email")
    }

    /// Select, checkbox and radio fields draw their values from `options`.
    pub fn requires_options(&self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Radio)
    }
}

impl Default for FieldType {
    fn default() -> Self {
        Self::text()
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "" => Self::text(),
            _ => Self::Input(value),
        }
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value: a scalar string, or the checked values of a checkbox group.
///
/// Schema documents may write scalars as numbers or booleans; they are read
/// in their string form (`18` → `"18"`, `true` → `"true"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// Any scalar a schema document may hold where a string is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Bool(flag) => flag.to_string(),
            Scalar::Integer(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ValueRepr::deserialize(deserializer)? {
            ValueRepr::Scalar(value) => Self::Text(value.into()),
            ValueRepr::List(items) => Self::List(items.into_iter().map(String::from).collect()),
        })
    }
}

impl FieldValue {
    /// Empty string or zero-length list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// Scalar form of the value. Lists are joined with `,`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(","),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// True when `candidate` is selected by this value: list membership for
    /// lists, equality for scalars.
    pub fn selects(&self, candidate: &str) -> bool {
        match self {
            Self::Text(s) => s == candidate,
            Self::List(items) => items.iter().any(|item| item == candidate),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(String::from).collect())
    }
}

/// One entry in a select, checkbox or radio field.
///
/// A bare string is both value and label; a pair keeps the value string and
/// shows the caller's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldOption {
    Bare(String),
    Labeled {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionRepr {
    Bare(Scalar),
    Labeled {
        value: Scalar,
        #[serde(default)]
        label: Option<Scalar>,
    },
}

impl<'de> Deserialize<'de> for FieldOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match OptionRepr::deserialize(deserializer)? {
            OptionRepr::Bare(value) => Self::Bare(value.into()),
            OptionRepr::Labeled { value, label } => Self::Labeled {
                value: value.into(),
                label: label.map(String::from),
            },
        })
    }
}

impl FieldOption {
    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Labeled {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Bare(value) => value,
            Self::Labeled { value, .. } => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Bare(value) => value,
            Self::Labeled { value, label } => label.as_deref().unwrap_or(value),
        }
    }
}

impl From<&str> for FieldOption {
    fn from(value: &str) -> Self {
        Self::Bare(value.to_string())
    }
}

/// Regex rule attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

type CheckFn = dyn Fn(&FieldValue) -> std::result::Result<(), String> + Send + Sync;

/// Caller-supplied predicate run after the built-in rules.
///
/// `Ok(())` accepts the value, `Err(message)` rejects it with that message.
#[derive(Clone)]
pub struct CustomValidator(Arc<CheckFn>);

impl CustomValidator {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&FieldValue) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    pub fn check(&self, value: &FieldValue) -> std::result::Result<(), String> {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomValidator(..)")
    }
}

impl PartialEq for CustomValidator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A field definition: the complete schema for one form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<PatternRule>,
    #[serde(skip)]
    pub validate: Option<CustomValidator>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, type_: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            type_: type_.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<FieldOption>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>, message: Option<&str>) -> Self {
        self.validation = Some(PatternRule {
            pattern: pattern.into(),
            message: message.map(String::from),
        });
        self
    }

    pub fn with_validator<F>(mut self, check: F) -> Self
    where
        F: Fn(&FieldValue) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.validate = Some(CustomValidator::new(check));
        self
    }

    /// Options in schema order; empty for types without options.
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// The value this field holds before any user interaction.
    ///
    /// Checkbox fields default to their declared list (a scalar is ignored);
    /// every other type defaults to its scalar value or `""`.
    pub fn default_value(&self) -> FieldValue {
        match (&self.type_, &self.value) {
            (FieldType::Checkbox, Some(FieldValue::List(items))) => FieldValue::List(items.clone()),
            (FieldType::Checkbox, _) => FieldValue::List(Vec::new()),
            (_, Some(value)) => FieldValue::Text(value.to_text()),
            (_, None) => FieldValue::default(),
        }
    }
}
