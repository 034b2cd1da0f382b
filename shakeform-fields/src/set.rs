//! FieldSet: a checked, ordered collection of field definitions.
//!
//! A field set is what a form renders. Construction fails fast on schema
//! errors so a malformed schema never reaches the renderer: names must be
//! non-empty and unique, choice fields must declare options, and validation
//! patterns must compile. Patterns use backtracking syntax, so lookaround and
//! backreferences are available. Compiled patterns are kept alongside the
//! definitions and indexed by field name.

use std::collections::HashMap;

use fancy_regex::Regex;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::{CustomValidator, FieldDef, FieldValue};

/// Field definitions in schema order, with name lookup.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<FieldDef>,
    patterns: Vec<Option<Regex>>,
    name_index: HashMap<String, usize>,
}

impl FieldSet {
    /// Check and index a list of field definitions.
    pub fn new(fields: Vec<FieldDef>) -> Result<Self> {
        let mut name_index = HashMap::with_capacity(fields.len());
        let mut patterns = Vec::with_capacity(fields.len());

        for (index, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(FieldsError::EmptyName { index });
            }
            if name_index.insert(field.name.clone(), index).is_some() {
                return Err(FieldsError::DuplicateFieldName {
                    name: field.name.clone(),
                });
            }
            if field.type_.requires_options() && field.options.is_none() {
                return Err(FieldsError::MissingOptions {
                    name: field.name.clone(),
                    kind: field.type_.to_string(),
                });
            }
            let pattern = match &field.validation {
                Some(rule) => Some(Regex::new(&rule.pattern).map_err(|source| {
                    FieldsError::InvalidPattern {
                        name: field.name.clone(),
                        source,
                    }
                })?),
                None => None,
            };
            patterns.push(pattern);
        }

        debug!(fields = fields.len(), "field set accepted");

        Ok(Self {
            fields,
            patterns,
            name_index,
        })
    }

    /// Parse a YAML sequence of field definitions.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let fields: Vec<FieldDef> = serde_yaml_ng::from_str(source)?;
        Self::new(fields)
    }

    /// Parse a JSON array of field definitions.
    pub fn from_json(source: &str) -> Result<Self> {
        let fields: Vec<FieldDef> = serde_json::from_str(source)?;
        Self::new(fields)
    }

    /// Attach a custom validator to a field that was loaded from a document.
    pub fn with_validator<F>(mut self, name: &str, check: F) -> Result<Self>
    where
        F: Fn(&FieldValue) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        let index = self.index_of(name).ok_or_else(|| FieldsError::FieldNotFound {
            name: name.to_string(),
        })?;
        self.fields[index].validate = Some(CustomValidator::new(check));
        Ok(self)
    }

    /// Get a field definition by name.
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// Compiled validation pattern of a field, if it declares one.
    pub fn pattern(&self, name: &str) -> Option<&Regex> {
        self.index_of(name).and_then(|i| self.patterns[i].as_ref())
    }

    /// All field definitions in schema order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    #[test]
    fn preserves_schema_order_and_indexes_names() {
        let set = FieldSet::new(vec![
            FieldDef::new("b", "text"),
            FieldDef::new("a", "email"),
        ])
        .unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(set.index_of("a"), Some(1));
        assert_eq!(set.get("a").unwrap().type_, FieldType::email());
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = FieldSet::new(vec![FieldDef::new("x", "text"), FieldDef::new("x", "email")])
            .unwrap_err();
        assert!(matches!(err, FieldsError::DuplicateFieldName { ref name } if name == "x"));
    }

    #[test]
    fn rejects_empty_name() {
        let err = FieldSet::new(vec![FieldDef::new("ok", "text"), FieldDef::new("", "text")])
            .unwrap_err();
        assert!(matches!(err, FieldsError::EmptyName { index: 1 }));
    }

    #[test]
    fn choice_fields_require_options() {
        for kind in ["select", "checkbox", "radio"] {
            let err = FieldSet::new(vec![FieldDef::new("c", kind)]).unwrap_err();
            assert!(matches!(err, FieldsError::MissingOptions { .. }), "{kind}");
        }
        // An explicit empty list is accepted
        let empty: Vec<&str> = Vec::new();
        assert!(FieldSet::new(vec![FieldDef::new("c", "select").with_options(empty)]).is_ok());
    }

    #[test]
    fn rejects_uncompilable_pattern() {
        let err = FieldSet::new(vec![FieldDef::new("code", "text").with_pattern("([a-z", None)])
            .unwrap_err();
        assert!(matches!(err, FieldsError::InvalidPattern { ref name, .. } if name == "code"));
    }

    #[test]
    fn compiles_patterns_once() {
        let set = FieldSet::new(vec![
            FieldDef::new("zip", "text").with_pattern(r"^\d{5}$", Some("five digits")),
            FieldDef::new("name", "text"),
        ])
        .unwrap();
        assert!(set.pattern("zip").unwrap().is_match("12345").unwrap());
        assert!(set.pattern("name").is_none());
    }

    #[test]
    fn accepts_lookaround_patterns() {
        let set = FieldSet::new(vec![FieldDef::new("pw", "password")
            .with_pattern(r"^(?=.*\d).{8,}$", Some("8+ characters with a digit"))])
        .unwrap();
        let pattern = set.pattern("pw").unwrap();
        assert!(pattern.is_match("hunter22").unwrap());
        assert!(!pattern.is_match("hunterxx").unwrap());
    }

    #[test]
    fn numeric_values_and_options_load_from_documents() {
        let set = FieldSet::from_json(r#"[{"name":"age","type":"number","value":18}]"#).unwrap();
        assert_eq!(set.get("age").unwrap().default_value(), FieldValue::from("18"));

        let yaml = r#"
- name: rating
  type: select
  label: Rating
  value: 3
  options: [1, 2, 3]
"#;
        let set = FieldSet::from_yaml(yaml).unwrap();
        let rating = set.get("rating").unwrap();
        assert_eq!(
            rating.options().iter().map(|o| o.value()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        assert_eq!(rating.default_value(), FieldValue::from("3"));
    }

    #[test]
    fn loads_from_yaml() {
        let yaml = r#"
- name: email
  type: email
  label: Email
  required: true
- name: topics
  type: checkbox
  label: Topics
  value: [rust]
  options:
    - rust
    - value: wasm
      label: WebAssembly
"#;
        let set = FieldSet::from_yaml(yaml).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("email").unwrap().required);
        assert_eq!(set.get("topics").unwrap().options()[1].label(), "WebAssembly");
    }

    #[test]
    fn loads_from_json_and_attaches_validator() {
        let json = r#"[{"name":"age","type":"number","label":"Age"}]"#;
        let set = FieldSet::from_json(json)
            .unwrap()
            .with_validator("age", |_| Err("nope".into()))
            .unwrap();
        let check = set.get("age").unwrap().validate.as_ref().unwrap();
        assert_eq!(check.check(&FieldValue::from("1")), Err("nope".to_string()));
    }

    #[test]
    fn attaching_validator_to_unknown_field_fails() {
        let err = FieldSet::new(vec![FieldDef::new("a", "text")])
            .unwrap()
            .with_validator("b", |_| Ok(()))
            .unwrap_err();
        assert!(matches!(err, FieldsError::FieldNotFound { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_schema_error() {
        let err = FieldSet::from_yaml("- name: [unterminated").unwrap_err();
        assert!(matches!(err, FieldsError::Yaml(_)));
    }
}
