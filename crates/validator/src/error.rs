//! Error types for rule declarations and validation runs.
//!
//! A failing field is never an error: [`Validator::validate`] returns
//! `Ok` with a populated error tree. These types cover declarations that
//! cannot be resolved, data that does not fit the declaration at all, and
//! checks that broke while deciding.
//!
//! [`Validator::validate`]: crate::Validator::validate

use vigil_check::{ArgsError, CheckError};

/// A validation run was aborted. No partial error tree is produced.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// A rule names a check that is not registered.
    #[error("field `{field}`: unknown check `{name}`")]
    UnknownCheck {
        /// Field path.
        field: String,
        /// The unregistered check name.
        name: String,
    },

    /// A rule uses a structural key as a check name.
    #[error("field `{field}`: `{name}` is a reserved rule key, not a check")]
    ReservedName {
        /// Field path.
        field: String,
        /// The reserved key.
        name: String,
    },

    /// A check factory rejected the arguments given in the rule.
    #[error("field `{field}`: invalid arguments for check `{name}`: {source}")]
    InvalidArguments {
        /// Field path.
        field: String,
        /// The check name.
        name: String,
        /// What was wrong with the arguments.
        #[source]
        source: ArgsError,
    },

    /// A declared field is absent from the data.
    #[error("field `{field}` is declared but missing from the data")]
    MissingField {
        /// Field path.
        field: String,
    },

    /// Nested declarations go deeper than the configured limit.
    #[error("field `{field}`: nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        /// Field path where the limit was hit.
        field: String,
        /// The configured limit.
        max_depth: usize,
    },

    /// A check failed internally instead of deciding.
    #[error("field `{field}`: {source}")]
    Check {
        /// Field path.
        field: String,
        /// The check's own error.
        #[source]
        source: CheckError,
    },
}

impl ValidateError {
    /// Whether the error comes from the declaration or the call site rather
    /// than from a check.
    pub fn is_usage_error(&self) -> bool {
        !matches!(self, Self::Check { .. })
    }

    /// Path of the field the error is about.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownCheck { field, .. }
            | Self::ReservedName { field, .. }
            | Self::InvalidArguments { field, .. }
            | Self::MissingField { field }
            | Self::DepthExceeded { field, .. }
            | Self::Check { field, .. } => field,
        }
    }
}

/// A JSON rule declaration has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The declaration is not a JSON object.
    #[error("rule declaration must be an object, found {found}")]
    NotAnObject {
        /// JSON kind found instead.
        found: &'static str,
    },

    /// A field rule is neither an object nor `null`.
    #[error("field `{field}`: rule must be an object or null, found {found}")]
    InvalidShape {
        /// Field path.
        field: String,
        /// JSON kind found instead.
        found: &'static str,
    },

    /// A `validators`/`children` entry is neither an object nor `null`.
    #[error("field `{field}`: `{key}` must be an object or null, found {found}")]
    InvalidChildren {
        /// Field path.
        field: String,
        /// The structural key (`validators` or `children`).
        key: String,
        /// JSON kind found instead.
        found: &'static str,
    },
}
