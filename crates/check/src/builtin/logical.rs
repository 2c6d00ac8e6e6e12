//! `and` / `or` combinators over other checks.
//!
//! Inner checks run one at a time, in order, and stop as soon as the outcome
//! is decided. Their own descriptors are discarded: the combinator reports a
//! single `{and: message}` or `{or: message}`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{Check, CheckFn, CheckResult, ErrorDescriptor, Message};

/// Passes only if every inner check passes.
pub struct All {
    checks: Vec<CheckFn>,
    message: Message,
}

impl All {
    /// Registry name reported in the error descriptor.
    pub const NAME: &'static str = "and";

    /// Creates the combinator.
    pub fn new(checks: Vec<CheckFn>, message: impl Into<Message>) -> Self {
        Self {
            checks,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Check for All {
    async fn check(&self, value: &Value, data: &Value) -> CheckResult {
        for check in &self.checks {
            if check.check(value, data).await?.is_some() {
                return Ok(Some(ErrorDescriptor::single(Self::NAME, self.message.clone())));
            }
        }
        Ok(None)
    }
}

/// Passes if at least one inner check passes. An empty list never passes.
pub struct Any {
    checks: Vec<CheckFn>,
    message: Message,
}

impl Any {
    /// Registry name reported in the error descriptor.
    pub const NAME: &'static str = "or";

    /// Creates the combinator.
    pub fn new(checks: Vec<CheckFn>, message: impl Into<Message>) -> Self {
        Self {
            checks,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Check for Any {
    async fn check(&self, value: &Value, data: &Value) -> CheckResult {
        for check in &self.checks {
            if check.check(value, data).await?.is_none() {
                return Ok(None);
            }
        }
        Ok(Some(ErrorDescriptor::single(Self::NAME, self.message.clone())))
    }
}

/// Every check in `checks` must pass.
pub fn and(checks: Vec<CheckFn>, message: impl Into<Message>) -> CheckFn {
    Arc::new(All::new(checks, message))
}

/// At least one check in `checks` must pass.
pub fn or(checks: Vec<CheckFn>, message: impl Into<Message>) -> CheckFn {
    Arc::new(Any::new(checks, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{hex, number, string};
    use crate::check_fn;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn number_or_hex_string() -> CheckFn {
        or(
            vec![number(()), and(vec![string(()), hex(())], ())],
            "must be a number or a hex string",
        )
    }

    #[tokio::test]
    async fn or_accepts_any_branch() {
        let check = number_or_hex_string();
        assert!(check.check(&json!(123), &Value::Null).await.unwrap().is_none());
        assert!(check.check(&json!("0x1"), &Value::Null).await.unwrap().is_none());

        let outcome = check.check(&json!(true), &Value::Null).await.unwrap().unwrap();
        assert_eq!(
            outcome.get("or"),
            Some(&json!("must be a number or a hex string"))
        );
        assert_eq!(outcome.len(), 1);
    }

    #[tokio::test]
    async fn and_stops_at_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let spy = {
            let calls = Arc::clone(&calls);
            check_fn(move |_, _| {
                calls.fetch_add(1, Ordering::SeqCst);
                None
            })
        };
        let check = and(vec![string(()), spy], "bad");

        let outcome = check.check(&json!(1), &Value::Null).await.unwrap().unwrap();
        assert_eq!(outcome.get("and"), Some(&json!("bad")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(check.check(&json!("s"), &Value::Null).await.unwrap().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_lists() {
        assert!(and(vec![], ()).check(&json!(1), &Value::Null).await.unwrap().is_none());
        assert!(or(vec![], ()).check(&json!(1), &Value::Null).await.unwrap().is_some());
    }
}
