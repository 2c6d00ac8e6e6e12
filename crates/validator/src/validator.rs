//! The validation session.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use vigil_check::CheckRegistry;

use crate::error::ValidateError;
use crate::evaluate::{FieldPlan, evaluate};
use crate::hooks;
use crate::normalize::{Nested, normalize};
use crate::options::{ValidateOptions, ValidatorOptions};
use crate::result::Validation;
use crate::rule::{RuleDeclaration, RuleShape};
use crate::tree::ErrorTree;

/// Validates data objects against a [`RuleDeclaration`].
///
/// Fields are evaluated in declaration order. By default validation stops
/// at the first failing field; set `check_all` to collect every failure.
/// Input keys without a rule never fail validation.
///
/// Each field's rule is resolved on first use and reused by later calls on
/// the same validator, so usage errors in a rule (an unknown check name,
/// malformed arguments) surface when that field is first reached. Call
/// [`resolve_all`](Self::resolve_all) to surface them up front.
///
/// # Examples
///
/// ```rust,ignore
/// use vigil_validator::prelude::*;
///
/// let validator = Validator::new(
///     RuleDeclaration::new()
///         .field("name", RuleConfig::new().check("required", "name is required"))
///         .field("pwd", vec![required("pwd is required"), min_length(6, "too short")]),
/// );
///
/// let result = validator.validate(json!({"name": "ajanuw", "pwd": "123"})).await?;
/// assert_eq!(result.get_error("minLength", "pwd"), Some(&json!("too short")));
/// ```
pub struct Validator {
    rules: Arc<RuleDeclaration>,
    options: ValidatorOptions,
    registry: Arc<CheckRegistry>,
    plans: Mutex<HashMap<String, Arc<FieldPlan>>>,
    depth: usize,
    path: Option<String>,
    own_check_all: Option<bool>,
}

impl Validator {
    /// Creates a validator using the process-wide check registry.
    pub fn new(rules: impl Into<Arc<RuleDeclaration>>) -> Self {
        Self {
            rules: rules.into(),
            options: ValidatorOptions::default(),
            registry: CheckRegistry::global(),
            plans: Mutex::new(HashMap::new()),
            depth: 0,
            path: None,
            own_check_all: None,
        }
    }

    /// Replaces the options.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self.plans.get_mut().clear();
        self
    }

    /// Resolves named checks through `registry` instead of the global one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_registry(mut self, registry: Arc<CheckRegistry>) -> Self {
        self.registry = registry;
        self.plans.get_mut().clear();
        self
    }

    /// The declaration.
    pub fn rules(&self) -> &RuleDeclaration {
        &self.rules
    }

    /// The options.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validates `data` with the validator's options.
    ///
    /// # Errors
    ///
    /// Usage errors ([`ValidateError::is_usage_error`]) and broken checks.
    /// Failing fields are reported in the returned [`Validation`].
    pub async fn validate(&self, data: Value) -> Result<Validation, ValidateError> {
        self.validate_with(data, &ValidateOptions::default()).await
    }

    /// Validates `data`, applying per-call overrides.
    ///
    /// On failure the session hook runs (or the process-wide default when the
    /// validator has none), then the per-call hook.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub async fn validate_with(
        &self,
        data: Value,
        options: &ValidateOptions,
    ) -> Result<Validation, ValidateError> {
        let check_all = options.check_all.unwrap_or(self.options.check_all);
        tracing::debug!(fields = self.rules.len(), check_all, "validation started");

        let errors = self.run(&data, check_all).await?;

        tracing::debug!(valid = errors.is_empty(), failed = errors.len(), "validation finished");
        if !errors.is_empty() {
            self.dispatch_failure(&errors, options);
        }
        Ok(Validation::new(errors, data))
    }

    /// Whether `data` is valid.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub async fn check(&self, data: Value) -> Result<bool, ValidateError> {
        Ok(self.validate(data).await?.is_valid())
    }

    /// Resolves every field, including nested declarations, reporting the
    /// first usage error without looking at any data.
    ///
    /// # Errors
    ///
    /// [`ValidateError::UnknownCheck`], [`ValidateError::ReservedName`],
    /// [`ValidateError::InvalidArguments`] or [`ValidateError::DepthExceeded`].
    pub fn resolve_all(&self) -> Result<(), ValidateError> {
        for (field, shape) in self.rules.iter() {
            if shape.is_skip() {
                continue;
            }
            let plan = self.plan_for(field, shape)?;
            if let Some(nested) = &plan.nested {
                nested.resolve_all()?;
            }
        }
        Ok(())
    }

    /// Resolved plan of a declared field; `None` for undeclared or skipped
    /// fields.
    ///
    /// # Errors
    ///
    /// Usage errors from resolving the field's rule.
    pub fn plan(&self, field: &str) -> Result<Option<Arc<FieldPlan>>, ValidateError> {
        match self.rules.get(field) {
            Some(shape) if !shape.is_skip() => self.plan_for(field, shape).map(Some),
            _ => Ok(None),
        }
    }

    /// First message of the first failing field in `errors`.
    pub fn first_error(errors: &ErrorTree) -> Option<&Value> {
        errors.first_message()
    }

    /// Installs the process-wide default failure hook.
    pub fn set_default_fail_hook<F>(hook: F)
    where
        F: Fn(&ErrorTree) + Send + Sync + 'static,
    {
        hooks::set_default_fail_hook(hook);
    }

    /// Removes the process-wide default failure hook.
    pub fn clear_default_fail_hook() {
        hooks::clear_default_fail_hook();
    }

    /// Evaluates every declared field of `data` and collects the failures.
    pub(crate) fn run<'a>(
        &'a self,
        data: &'a Value,
        check_all: bool,
    ) -> BoxFuture<'a, Result<ErrorTree, ValidateError>> {
        async move {
            let empty = Map::new();
            let object = data.as_object().unwrap_or(&empty);

            if !self.options.ignore {
                for key in object.keys().filter(|key| !self.rules.contains(key)) {
                    tracing::warn!(field = %self.qualify(key), "no rule declared for input field");
                }
            }

            let mut tree = ErrorTree::new();
            for (field, shape) in self.rules.iter() {
                if shape.is_skip() {
                    tracing::trace!(field = %self.qualify(field), "field skipped");
                    continue;
                }
                let plan = self.plan_for(field, shape)?;
                let value = object.get(field).ok_or_else(|| ValidateError::MissingField {
                    field: plan.path.clone(),
                })?;

                if let Some(entry) = evaluate(&plan, value, data, check_all).await? {
                    tree.insert(field.clone(), entry);
                    if !check_all {
                        break;
                    }
                }
            }
            Ok(tree)
        }
        .boxed()
    }

    fn plan_for(&self, field: &str, shape: &RuleShape) -> Result<Arc<FieldPlan>, ValidateError> {
        if let Some(plan) = self.plans.lock().get(field) {
            return Ok(Arc::clone(plan));
        }

        let path = self.qualify(field);
        let rule = normalize(&path, shape, &self.registry)?;
        let nested = match rule.nested {
            Some(nested) => Some(self.nested(nested, &path)?),
            None => None,
        };
        let plan = Arc::new(FieldPlan {
            path,
            checks: rule.checks,
            nested,
            fail: rule.fail,
        });

        Ok(Arc::clone(
            self.plans.lock().entry(field.to_owned()).or_insert(plan),
        ))
    }

    /// Sub-session for an object field. Declarations inherit this
    /// validator's options and registry; prebuilt validators keep theirs.
    /// Either way the path and depth continue from here and the session hook
    /// is dropped.
    fn nested(&self, nested: Nested, path: &str) -> Result<Self, ValidateError> {
        let depth = self.depth + 1;
        if depth > self.options.max_depth {
            return Err(ValidateError::DepthExceeded {
                field: path.to_owned(),
                max_depth: self.options.max_depth,
            });
        }
        let (rules, options, registry, own_check_all) = match nested {
            Nested::Rules(rules) => (rules, self.options.clone(), Arc::clone(&self.registry), None),
            Nested::Validator(prebuilt) => (
                Arc::clone(&prebuilt.rules),
                prebuilt.options.clone(),
                Arc::clone(&prebuilt.registry),
                Some(prebuilt.options.check_all),
            ),
        };
        tracing::debug!(
            field = %path,
            depth,
            fields = rules.len(),
            prebuilt = own_check_all.is_some(),
            "nested validator constructed"
        );
        Ok(Self {
            rules,
            options: ValidatorOptions {
                fail: None,
                ..options
            },
            registry,
            plans: Mutex::new(HashMap::new()),
            depth,
            path: Some(path.to_owned()),
            own_check_all,
        })
    }

    /// `check_all` for this sub-session given the parent's.
    pub(crate) fn nested_check_all(&self, parent: bool) -> bool {
        self.own_check_all.unwrap_or(parent)
    }

    fn qualify(&self, field: &str) -> String {
        match &self.path {
            Some(parent) => format!("{parent}.{field}"),
            None => field.to_owned(),
        }
    }

    fn dispatch_failure(&self, errors: &ErrorTree, options: &ValidateOptions) {
        if self.depth > 0 {
            return;
        }
        if let Some(hook) = self.options.fail.clone().or_else(hooks::default_fail_hook) {
            hook(errors);
        }
        if let Some(hook) = &options.fail {
            hook(errors);
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules)
            .field("options", &self.options)
            .field("depth", &self.depth)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
