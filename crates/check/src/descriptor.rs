//! Error descriptors: what failed for one field, and why.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// MESSAGE
// ============================================================================

/// Message reported by a failed check.
///
/// Messages are opaque to the engine: usually a string, but any JSON value
/// works (an i18n key object, a numeric code, ...). A check built without a
/// message reports `true`, meaning "failed, no message".
#[derive(Debug, Clone, PartialEq)]
pub struct Message(Value);

impl Message {
    /// Returns the message as a JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the message, returning the JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for Message {
    fn default() -> Self {
        Self(Value::Bool(true))
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        if value.is_null() {
            Self::default()
        } else {
            Self(value)
        }
    }
}

impl From<&str> for Message {
    fn from(message: &str) -> Self {
        Self(Value::String(message.to_owned()))
    }
}

impl From<String> for Message {
    fn from(message: String) -> Self {
        Self(Value::String(message))
    }
}

impl From<bool> for Message {
    fn from(flag: bool) -> Self {
        Self(Value::Bool(flag))
    }
}

impl From<()> for Message {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl<T: Into<Message>> From<Option<T>> for Message {
    fn from(message: Option<T>) -> Self {
        message.map_or_else(Self::default, Into::into)
    }
}

// ============================================================================
// ERROR DESCRIPTOR
// ============================================================================

/// Ordered mapping from failed check name to message.
///
/// Keys keep the order in which checks reported them. Merging a descriptor
/// whose key already exists replaces the message but keeps the original
/// position.
///
/// # Examples
///
/// ```rust,ignore
/// let mut errors = ErrorDescriptor::single("required", "name is required");
/// errors.merge(ErrorDescriptor::single("minLength", "too short"));
/// assert_eq!(errors.keys().collect::<Vec<_>>(), ["required", "minLength"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorDescriptor(IndexMap<String, Value>);

impl ErrorDescriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a descriptor holding a single failed check.
    pub fn single(name: impl Into<String>, message: impl Into<Message>) -> Self {
        let mut descriptor = Self::new();
        descriptor.insert(name, message);
        descriptor
    }

    /// Records a failed check, returning the message it replaced.
    pub fn insert(&mut self, name: impl Into<String>, message: impl Into<Message>) -> Option<Value> {
        self.0.insert(name.into(), message.into().into_value())
    }

    /// Merges another descriptor into this one; later messages win.
    pub fn merge(&mut self, other: ErrorDescriptor) {
        self.0.extend(other.0);
    }

    /// Message for a check name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether a check name failed.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// The first failed check and its message.
    pub fn first(&self) -> Option<(&str, &Value)> {
        self.0.first().map(|(name, message)| (name.as_str(), message))
    }

    /// The first message.
    pub fn first_message(&self) -> Option<&Value> {
        self.0.first().map(|(_, message)| message)
    }

    /// Failed check names in report order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates `(name, message)` pairs in report order.
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Number of failed checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ErrorDescriptor {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, M: Into<Message>> FromIterator<(K, M)> for ErrorDescriptor {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        let mut descriptor = Self::new();
        for (name, message) in iter {
            descriptor.insert(name, message);
        }
        descriptor
    }
}
