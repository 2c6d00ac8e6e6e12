//! The [`Check`] trait and closure adapters.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::descriptor::ErrorDescriptor;
use crate::error::CheckError;

/// Outcome of a single check.
///
/// * `Ok(None)` - the value passed
/// * `Ok(Some(descriptor))` - the value failed; `descriptor` names what failed
/// * `Err(_)` - the check itself broke and could not decide
pub type CheckResult = Result<Option<ErrorDescriptor>, CheckError>;

/// A unit of validation logic over `(value, data)`.
///
/// `value` is the field being checked and `data` is the whole object the
/// field belongs to, so a check can compare against siblings (e.g. a
/// password confirmation).
///
/// Expected failures are reported through the descriptor, never through
/// `Err`: the engine treats `Err` as fatal and aborts the validation.
///
/// # Examples
///
/// ```rust,ignore
/// use vigil_check::{Check, CheckResult, ErrorDescriptor};
///
/// struct Even;
///
/// #[async_trait::async_trait]
/// impl Check for Even {
///     async fn check(&self, value: &Value, _data: &Value) -> CheckResult {
///         let even = value.as_i64().is_some_and(|n| n % 2 == 0);
///         Ok((!even).then(|| ErrorDescriptor::single("even", "must be even")))
///     }
/// }
/// ```
#[async_trait]
pub trait Check: Send + Sync {
    /// Checks `value` in the context of `data`.
    async fn check(&self, value: &Value, data: &Value) -> CheckResult;
}

/// Shared, type-erased check.
pub type CheckFn = Arc<dyn Check>;

// ============================================================================
// CLOSURE ADAPTERS
// ============================================================================

/// Synchronous, infallible check backed by a closure.
pub struct FnCheck<F>(F);

#[async_trait]
impl<F> Check for FnCheck<F>
where
    F: Fn(&Value, &Value) -> Option<ErrorDescriptor> + Send + Sync + 'static,
{
    async fn check(&self, value: &Value, data: &Value) -> CheckResult {
        Ok((self.0)(value, data))
    }
}

/// Synchronous check backed by a closure that may fail internally.
pub struct TryFnCheck<F>(F);

#[async_trait]
impl<F> Check for TryFnCheck<F>
where
    F: Fn(&Value, &Value) -> CheckResult + Send + Sync + 'static,
{
    async fn check(&self, value: &Value, data: &Value) -> CheckResult {
        (self.0)(value, data)
    }
}

/// Asynchronous check backed by a closure returning a future.
///
/// The closure receives owned copies of the value and the data so the
/// returned future can be `'static`.
pub struct AsyncFnCheck<F>(F);

#[async_trait]
impl<F, Fut> Check for AsyncFnCheck<F>
where
    F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CheckResult> + Send + 'static,
{
    async fn check(&self, value: &Value, data: &Value) -> CheckResult {
        (self.0)(value.clone(), data.clone()).await
    }
}

/// Wraps a synchronous closure as a [`CheckFn`].
///
/// # Examples
///
/// ```rust,ignore
/// let confirm = check_fn(|value, data| {
///     (value != &data["pwd"]).then(|| ErrorDescriptor::single("checkPwd", "passwords differ"))
/// });
/// ```
pub fn check_fn<F>(f: F) -> CheckFn
where
    F: Fn(&Value, &Value) -> Option<ErrorDescriptor> + Send + Sync + 'static,
{
    Arc::new(FnCheck(f))
}

/// Wraps a synchronous, fallible closure as a [`CheckFn`].
pub fn try_check_fn<F>(f: F) -> CheckFn
where
    F: Fn(&Value, &Value) -> CheckResult + Send + Sync + 'static,
{
    Arc::new(TryFnCheck(f))
}

/// Wraps an async closure as a [`CheckFn`].
///
/// # Examples
///
/// ```rust,ignore
/// let unique = async_check_fn(|value, _data| async move {
///     let taken = users::exists(value.as_str().unwrap_or_default()).await?;
///     Ok(taken.then(|| ErrorDescriptor::single("unique", "already taken")))
/// });
/// ```
pub fn async_check_fn<F, Fut>(f: F) -> CheckFn
where
    F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CheckResult> + Send + 'static,
{
    Arc::new(AsyncFnCheck(f))
}
