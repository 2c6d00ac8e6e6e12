//! Numeric range checks.
//!
//! Only finite JSON numbers are compared; anything else fails, including
//! numeric strings such as `"12"`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{Check, CheckFn, CheckResult, ErrorDescriptor, Message};

/// Inclusive lower bound (`min`).
#[derive(Debug, Clone)]
pub struct Min {
    min: f64,
    message: Message,
}

impl Min {
    /// Registry name reported in the error descriptor.
    pub const NAME: &'static str = "min";

    /// Creates the check.
    pub fn new(min: f64, message: impl Into<Message>) -> Self {
        Self {
            min,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Check for Min {
    async fn check(&self, value: &Value, _data: &Value) -> CheckResult {
        let passed = value.as_f64().is_some_and(|n| n.is_finite() && n >= self.min);
        Ok((!passed).then(|| ErrorDescriptor::single(Self::NAME, self.message.clone())))
    }
}

/// Inclusive upper bound (`max`).
#[derive(Debug, Clone)]
pub struct Max {
    max: f64,
    message: Message,
}

impl Max {
    /// Registry name reported in the error descriptor.
    pub const NAME: &'static str = "max";

    /// Creates the check.
    pub fn new(max: f64, message: impl Into<Message>) -> Self {
        Self {
            max,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Check for Max {
    async fn check(&self, value: &Value, _data: &Value) -> CheckResult {
        let passed = value.as_f64().is_some_and(|n| n.is_finite() && n <= self.max);
        Ok((!passed).then(|| ErrorDescriptor::single(Self::NAME, self.message.clone())))
    }
}

/// Value must be at least `min`.
pub fn min(min: f64, message: impl Into<Message>) -> CheckFn {
    Arc::new(Min::new(min, message))
}

/// Value must be at most `max`.
pub fn max(max: f64, message: impl Into<Message>) -> CheckFn {
    Arc::new(Max::new(max, message))
}
