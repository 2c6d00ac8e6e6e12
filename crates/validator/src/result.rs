//! The outcome of a validation call.

use serde::Serialize;
use serde_json::Value;
use vigil_check::value::is_truthy;

use crate::tree::ErrorTree;

/// Result of validating one data object.
///
/// # Examples
///
/// ```rust,ignore
/// let result = validator.validate(json!({"name": ""})).await?;
/// if result.is_invalid() {
///     println!("{:?}", result.first_error());
///     assert!(result.has_error("required", "name"));
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    errors: ErrorTree,
    data: Value,
}

impl Validation {
    pub(crate) fn new(errors: ErrorTree, data: Value) -> Self {
        Self { errors, data }
    }

    /// Whether every field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether at least one field failed.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// The error tree; empty when valid.
    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// Consumes the result, returning the error tree.
    pub fn into_errors(self) -> ErrorTree {
        self.errors
    }

    /// The validated data.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Message of `check` on the field at `path` (`"address/zip"`).
    pub fn get_error(&self, check: &str, path: &str) -> Option<&Value> {
        self.errors.error(check, path)
    }

    /// Whether `check` failed on the field at `path` with a truthy message.
    pub fn has_error(&self, check: &str, path: &str) -> bool {
        self.get_error(check, path).is_some_and(is_truthy)
    }

    /// First message of the first failing field.
    pub fn first_error(&self) -> Option<&Value> {
        self.errors.first_message()
    }
}
