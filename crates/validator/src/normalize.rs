//! Resolution of a [`RuleShape`] into the checks that actually run.

use std::fmt;
use std::sync::Arc;

use vigil_check::{CheckFn, CheckRegistry, is_reserved};

use crate::error::ValidateError;
use crate::options::FieldFailHook;
use crate::rule::{Children, RuleDeclaration, RuleShape};
use crate::validator::Validator;

/// Rules for the fields of an object value.
#[derive(Debug, Clone)]
pub enum Nested {
    /// Declaration validated with the parent's options and registry.
    Rules(Arc<RuleDeclaration>),
    /// Prebuilt validator with its own options and registry.
    Validator(Arc<Validator>),
}

/// Canonical form of a field rule.
#[derive(Clone, Default)]
pub struct ResolvedRule {
    /// Checks in execution order.
    pub checks: Vec<CheckFn>,
    /// Rules for the fields of an object value.
    pub nested: Option<Nested>,
    /// Field failure hook.
    pub fail: Option<FieldFailHook>,
}

impl fmt::Debug for ResolvedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRule")
            .field("checks", &self.checks.len())
            .field("nested", &self.nested)
            .field("fail", &self.fail.is_some())
            .finish()
    }
}

/// Flattens `shape` into an ordered check list.
///
/// Named checks are built through `registry` in declared order, followed by
/// raw child checks. Nested rules are returned as is; the caller
/// decides when to validate against it.
///
/// # Errors
///
/// [`ValidateError::ReservedName`], [`ValidateError::UnknownCheck`] or
/// [`ValidateError::InvalidArguments`], reported against `field`.
pub fn normalize(
    field: &str,
    shape: &RuleShape,
    registry: &CheckRegistry,
) -> Result<ResolvedRule, ValidateError> {
    let config = match shape {
        RuleShape::Skip => return Ok(ResolvedRule::default()),
        RuleShape::Single(check) => {
            return Ok(ResolvedRule {
                checks: vec![Arc::clone(check)],
                ..ResolvedRule::default()
            });
        }
        RuleShape::List(checks) => {
            return Ok(ResolvedRule {
                checks: checks.clone(),
                ..ResolvedRule::default()
            });
        }
        RuleShape::Config(config) => config,
    };

    let mut resolved = ResolvedRule {
        fail: config.fail_hook().cloned(),
        ..ResolvedRule::default()
    };

    for (name, args) in config.named_checks() {
        if is_reserved(name) {
            return Err(ValidateError::ReservedName {
                field: field.to_owned(),
                name: name.clone(),
            });
        }
        let factory = registry
            .factory(name)
            .ok_or_else(|| ValidateError::UnknownCheck {
                field: field.to_owned(),
                name: name.clone(),
            })?;
        let check = factory(args).map_err(|source| ValidateError::InvalidArguments {
            field: field.to_owned(),
            name: name.clone(),
            source,
        })?;
        resolved.checks.push(check);
    }

    match config.children_ref() {
        Some(Children::Checks(checks)) => resolved.checks.extend(checks.iter().cloned()),
        Some(Children::Rules(rules)) => resolved.nested = Some(Nested::Rules(Arc::clone(rules))),
        Some(Children::Validator(validator)) => {
            resolved.nested = Some(Nested::Validator(Arc::clone(validator)));
        }
        None => {}
    }

    Ok(resolved)
}
