//! Validator configuration.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::tree::{ErrorTree, FieldError};

/// Called with the error tree of a failing validation.
pub type FailHook = Arc<dyn Fn(&ErrorTree) + Send + Sync>;

/// Called with the entry of a failing field.
pub type FieldFailHook = Arc<dyn Fn(&FieldError) + Send + Sync>;

/// Default nesting limit for sub-validators.
pub const DEFAULT_MAX_DEPTH: usize = 32;

// ============================================================================
// VALIDATOR OPTIONS
// ============================================================================

/// Options fixed when a [`Validator`](crate::Validator) is built.
///
/// Deserializable from application config; missing keys take their
/// defaults and the hook is never read from data.
///
/// ```rust,ignore
/// let options: ValidatorOptions = serde_json::from_value(json!({"check_all": true}))?;
/// assert!(options.ignore);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Keep evaluating fields after the first failure.
    pub check_all: bool,
    /// Silently accept input keys that have no rule. When `false` they are
    /// logged at `warn`; validation still passes.
    pub ignore: bool,
    /// Maximum nesting depth of sub-validators.
    pub max_depth: usize,
    /// Session failure hook; replaces the process-wide default.
    #[serde(skip)]
    pub fail: Option<FailHook>,
}

impl ValidatorOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`check_all`](Self::check_all).
    #[must_use = "builder methods must be chained or built"]
    pub fn check_all(mut self, check_all: bool) -> Self {
        self.check_all = check_all;
        self
    }

    /// Sets [`ignore`](Self::ignore).
    #[must_use = "builder methods must be chained or built"]
    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    /// Sets [`max_depth`](Self::max_depth).
    #[must_use = "builder methods must be chained or built"]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the session failure hook.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_fail<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ErrorTree) + Send + Sync + 'static,
    {
        self.fail = Some(Arc::new(hook));
        self
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            check_all: false,
            ignore: true,
            max_depth: DEFAULT_MAX_DEPTH,
            fail: None,
        }
    }
}

impl fmt::Debug for ValidatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorOptions")
            .field("check_all", &self.check_all)
            .field("ignore", &self.ignore)
            .field("max_depth", &self.max_depth)
            .field("fail", &self.fail.is_some())
            .finish()
    }
}

// ============================================================================
// PER-CALL OPTIONS
// ============================================================================

/// Overrides for a single [`validate_with`](crate::Validator::validate_with) call.
#[derive(Clone, Default)]
pub struct ValidateOptions {
    /// Overrides the validator's `check_all` when set.
    pub check_all: Option<bool>,
    /// Called after the session hook when the call fails.
    pub fail: Option<FailHook>,
}

impl ValidateOptions {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides `check_all` for this call.
    #[must_use = "builder methods must be chained or built"]
    pub fn check_all(mut self, check_all: bool) -> Self {
        self.check_all = Some(check_all);
        self
    }

    /// Adds a failure hook for this call.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_fail<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ErrorTree) + Send + Sync + 'static,
    {
        self.fail = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for ValidateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateOptions")
            .field("check_all", &self.check_all)
            .field("fail", &self.fail.is_some())
            .finish()
    }
}
