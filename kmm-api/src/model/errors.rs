use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reason reported for a missing required field.
pub const REQUIRED: &str = "Required";

/// Field path used for errors that concern the whole request.
pub const REQUEST_PATH: &str = "";

/// Validation failures keyed by dot-delimited field path.
///
/// This is also the body of every error response: whole-request errors are
/// reported under the empty path.
///
/// ```json
/// { "spec.url": ["Required"], "spec.engine": ["Invalid enum value. ..."] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding a single reason for `path`.
    pub fn single(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(path, reason);
        errors
    }

    /// Appends `reason` to the reasons recorded for `path`.
    pub fn add(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Returns the reasons recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// Iterates over the failing paths in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, reasons) in &self.0 {
            for reason in reasons {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                if path.is_empty() {
                    write!(f, "{reason}")?;
                } else {
                    write!(f, "{path}: {reason}")?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
