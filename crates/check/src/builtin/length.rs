//! Length checks for strings (counted in chars) and arrays.
//!
//! Values without a length (numbers, objects, `null`) always fail.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::value::length_of;
use crate::{Check, CheckFn, CheckResult, ErrorDescriptor, Message};

// ============================================================================
// LENGTH BOUND
// ============================================================================

/// Which comparison a [`Length`] check applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthBound {
    /// Length must equal the limit (`len`).
    Exact,
    /// Length must be at least the limit (`minLength`).
    Min,
    /// Length must be at most the limit (`maxLength`).
    Max,
}

impl LengthBound {
    /// Registry name of the check.
    pub fn name(self) -> &'static str {
        match self {
            Self::Exact => "len",
            Self::Min => "minLength",
            Self::Max => "maxLength",
        }
    }

    fn accepts(self, length: usize, limit: usize) -> bool {
        match self {
            Self::Exact => length == limit,
            Self::Min => length >= limit,
            Self::Max => length <= limit,
        }
    }
}

// ============================================================================
// LENGTH CHECK
// ============================================================================

/// Compares the length of a string or array against a limit.
#[derive(Debug, Clone)]
pub struct Length {
    bound: LengthBound,
    limit: usize,
    message: Message,
}

impl Length {
    /// Creates a length check.
    pub fn new(bound: LengthBound, limit: usize, message: impl Into<Message>) -> Self {
        Self {
            bound,
            limit,
            message: message.into(),
        }
    }

    /// The configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[async_trait]
impl Check for Length {
    async fn check(&self, value: &Value, _data: &Value) -> CheckResult {
        let passed = length_of(value).is_some_and(|length| self.bound.accepts(length, self.limit));
        Ok((!passed).then(|| ErrorDescriptor::single(self.bound.name(), self.message.clone())))
    }
}

/// Length must equal `size`.
pub fn len(size: usize, message: impl Into<Message>) -> CheckFn {
    Arc::new(Length::new(LengthBound::Exact, size, message))
}

/// Length must be at least `min`.
pub fn min_length(min: usize, message: impl Into<Message>) -> CheckFn {
    Arc::new(Length::new(LengthBound::Min, min, message))
}

/// Length must be at most `max`.
pub fn max_length(max: usize, message: impl Into<Message>) -> CheckFn {
    Arc::new(Length::new(LengthBound::Max, max, message))
}
