//! Logging helpers

use serde::Serialize;
use std::fmt::Debug;

/// Formats a value as YAML in tracing output, with a leading newline.
///
/// ```ignore
/// trace!("snapshot: {}", Pretty(&data));
/// ```
///
/// Falls back to `{:#?}` if the value cannot be serialized.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}
