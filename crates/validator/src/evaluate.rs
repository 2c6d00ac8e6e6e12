//! Field evaluation: run a field's checks and its nested declaration.

use std::fmt;

use serde_json::Value;
use vigil_check::{Check, CheckFn, ErrorDescriptor};

use crate::error::ValidateError;
use crate::options::FieldFailHook;
use crate::tree::FieldError;
use crate::validator::Validator;

/// Everything needed to evaluate one declared field, built once per
/// validator on first use.
pub struct FieldPlan {
    pub(crate) path: String,
    pub(crate) checks: Vec<CheckFn>,
    pub(crate) nested: Option<Validator>,
    pub(crate) fail: Option<FieldFailHook>,
}

impl FieldPlan {
    /// Field path, dotted for nested fields (`address.zip`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Checks in execution order.
    pub fn checks(&self) -> &[CheckFn] {
        &self.checks
    }

    /// Whether the field carries a nested declaration.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        self.nested.is_some()
    }
}

impl fmt::Debug for FieldPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPlan")
            .field("path", &self.path)
            .field("checks", &self.checks.len())
            .field("nested", &self.nested.is_some())
            .field("fail", &self.fail.is_some())
            .finish()
    }
}

/// Evaluates one field. Returns the field's entry if it failed.
///
/// Every check runs, in order, one at a time; their descriptors merge into
/// one. The nested declaration runs only for object values, and only when the
/// field's own checks passed or `check_all` is set. A failing field triggers
/// its fail hook before this returns.
///
/// # Errors
///
/// [`ValidateError::Check`] if a check breaks; errors from the nested
/// declaration propagate unchanged.
pub async fn evaluate(
    plan: &FieldPlan,
    value: &Value,
    data: &Value,
    check_all: bool,
) -> Result<Option<FieldError>, ValidateError> {
    let mut errors = ErrorDescriptor::new();
    for (index, check) in plan.checks.iter().enumerate() {
        let outcome = check
            .check(value, data)
            .await
            .map_err(|source| ValidateError::Check {
                field: plan.path.clone(),
                source,
            })?;
        tracing::trace!(field = %plan.path, index, passed = outcome.is_none(), "check evaluated");
        if let Some(descriptor) = outcome {
            errors.merge(descriptor);
        }
    }

    let mut children = None;
    if let Some(nested) = &plan.nested
        && (errors.is_empty() || check_all)
        && value.is_object()
    {
        let tree = nested.run(value, nested.nested_check_all(check_all)).await?;
        if !tree.is_empty() {
            children = Some(tree);
        }
    }

    if errors.is_empty() && children.is_none() {
        tracing::trace!(field = %plan.path, "field passed");
        return Ok(None);
    }

    let entry = FieldError {
        value: value.clone(),
        data: data.clone(),
        errors,
        children,
    };
    tracing::trace!(field = %plan.path, failed = entry.errors.len(), "field failed");
    if let Some(hook) = &plan.fail {
        hook(&entry);
    }
    Ok(Some(entry))
}
