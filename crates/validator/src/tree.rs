//! Error trees: which fields failed, with what, and why.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vigil_check::ErrorDescriptor;

/// Everything known about one failing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// The field's value.
    pub value: Value,
    /// The object the field belongs to.
    pub data: Value,
    /// Failed checks and their messages, in evaluation order.
    pub errors: ErrorDescriptor,
    /// Failures of the nested declaration, if it ran and failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<ErrorTree>,
}

impl FieldError {
    /// Creates an entry with no recorded failures.
    pub fn new(value: Value, data: Value) -> Self {
        Self {
            value,
            data,
            errors: ErrorDescriptor::new(),
            children: None,
        }
    }

    /// Whether anything failed, here or below.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        !self.errors.is_empty() || self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// First message of this field, or of its first failing child.
    pub fn first_message(&self) -> Option<&Value> {
        self.errors
            .first_message()
            .or_else(|| self.children.as_ref()?.first_message())
    }
}

/// Failing fields in evaluation order. Empty means the data is valid.
///
/// Serializes as a plain object:
///
/// ```json
/// {"address": {"value": {...}, "data": {...}, "errors": {},
///              "children": {"zip": {"value": "", "data": {...}, "errors": {"required": "zip required"}}}}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorTree(IndexMap<String, FieldError>);

impl ErrorTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failing field.
    pub fn insert(&mut self, field: impl Into<String>, entry: FieldError) -> Option<FieldError> {
        self.0.insert(field.into(), entry)
    }

    /// Entry of a top-level field.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// Whether a top-level field failed.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Entry at a `/`- or `.`-delimited path, descending through `children`.
    ///
    /// `"address/zip"` and `"address.zip"` both name the `zip` entry nested
    /// under `address`.
    pub fn lookup(&self, path: &str) -> Option<&FieldError> {
        let mut segments = path.split(['/', '.']).map(str::trim);
        let mut entry = self.0.get(segments.next()?)?;
        for segment in segments {
            entry = entry.children.as_ref()?.get(segment)?;
        }
        Some(entry)
    }

    /// Message of the failed check `check` on the field at `path`.
    pub fn error(&self, check: &str, path: &str) -> Option<&Value> {
        self.lookup(path)?.errors.get(check)
    }

    /// The first failing field.
    pub fn first(&self) -> Option<(&str, &FieldError)> {
        self.0.first().map(|(field, entry)| (field.as_str(), entry))
    }

    /// First message of the first failing field.
    pub fn first_message(&self) -> Option<&Value> {
        self.0.first()?.1.first_message()
    }

    /// Failing field names in evaluation order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates `(field, entry)` pairs.
    pub fn iter(&self) -> Iter<'_, String, FieldError> {
        self.0.iter()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ErrorTree {
    type Item = (&'a String, &'a FieldError);
    type IntoIter = Iter<'a, String, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
