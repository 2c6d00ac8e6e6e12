//! Equality checks against a fixed value.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::value::{loose_eq, strict_eq};
use crate::{Check, CheckFn, CheckResult, ErrorDescriptor, Message};

/// How [`Equals`] compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equality {
    /// Same kind and same value (`eql`).
    Strict,
    /// Numbers, numeric strings and booleans coerce before comparing (`equal`).
    Loose,
}

impl Equality {
    /// Registry name of the check.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strict => "eql",
            Self::Loose => "equal",
        }
    }
}

/// Value must equal `expected`.
#[derive(Debug, Clone)]
pub struct Equals {
    expected: Value,
    mode: Equality,
    message: Message,
}

impl Equals {
    /// Creates the check.
    pub fn new(expected: Value, mode: Equality, message: impl Into<Message>) -> Self {
        Self {
            expected,
            mode,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Check for Equals {
    async fn check(&self, value: &Value, _data: &Value) -> CheckResult {
        let passed = match self.mode {
            Equality::Strict => strict_eq(value, &self.expected),
            Equality::Loose => loose_eq(value, &self.expected),
        };
        Ok((!passed).then(|| ErrorDescriptor::single(self.mode.name(), self.message.clone())))
    }
}

/// Value must strictly equal `expected`.
pub fn eql(expected: impl Into<Value>, message: impl Into<Message>) -> CheckFn {
    Arc::new(Equals::new(expected.into(), Equality::Strict, message))
}

/// Value must loosely equal `expected`.
pub fn equal(expected: impl Into<Value>, message: impl Into<Message>) -> CheckFn {
    Arc::new(Equals::new(expected.into(), Equality::Loose, message))
}
