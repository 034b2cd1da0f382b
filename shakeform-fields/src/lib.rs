//! Field schema and validation engine
//!
//! `shakeform-fields` is the data-only half of ShakeForm. It knows nothing about
//! controls, events or markup: it describes fields and decides whether a value
//! is acceptable for a field.
//!
//! # Architecture
//!
//! - **Schema**: [`FieldDef`] describes one field; [`FieldType`] is a closed set
//!   of control kinds (text-like input, textarea, select, checkbox, radio)
//! - **Field sets**: [`FieldSet`] is a checked, ordered collection of field
//!   definitions with unique names, loadable from YAML or JSON
//! - **Validation**: [`ValidationEngine`] applies the rule precedence
//!   (required, email, pattern, custom) and yields exactly one message on failure

pub mod error;
pub mod set;
pub mod types;
pub mod validation;

pub use error::{FieldsError, Result};
pub use set::FieldSet;
pub use types::{
    CustomValidator, FieldDef, FieldOption, FieldType, FieldValue, PatternRule,
};
pub use validation::{ValidationEngine, ValidationMessages, ValidationResult};
