//! Field-level validation errors rendered as `422 Unprocessable Entity`.
//!
//! The body follows the common `{message, errors}` convention:
//!
//! ```json
//! {
//!   "message": "The name field is required. (and 1 more error)",
//!   "errors": {
//!     "name": ["The name field is required."],
//!     "stock": ["The stock field must be an integer."]
//!   }
//! }
//! ```

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Messages keyed by field name, in the order fields were first reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// First message, suffixed with how many others follow.
    pub fn summary(&self) -> String {
        let Some(first) = self.entries.first().and_then(|(_, m)| m.first()) else {
            return "The given data was invalid.".to_string();
        };

        match self.len() - 1 {
            0 => first.clone(),
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut by_field: Vec<_> = errors.field_errors().into_iter().collect();
        by_field.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = FieldErrors::new();
        for (field, errs) in by_field {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {field} field is invalid."));
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// Body of a `422` response.
#[derive(serde::Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// First error message, with a count of the remaining ones
    #[schema(example = "The name field is required. (and 1 more error)")]
    pub message: String,
    /// Messages per field
    #[schema(value_type = std::collections::HashMap<String, Vec<String>>)]
    pub errors: FieldErrors,
}

impl From<FieldErrors> for ValidationErrorResponse {
    fn from(errors: FieldErrors) -> Self {
        Self {
            message: errors.summary(),
            errors,
        }
    }
}
