//! # vigil-validator
//!
//! Declarative, asynchronous validation of JSON data.
//!
//! A [`RuleDeclaration`] maps field names to rules. A [`Validator`] runs the
//! rules against a data object and returns a [`Validation`] holding an
//! [`ErrorTree`] of failing fields: which checks failed, with which
//! messages, nested through `children` for object fields.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vigil_validator::prelude::*;
//!
//! let validator = Validator::new(
//!     RuleDeclaration::new()
//!         .field("name", RuleConfig::new().check("required", "name is required"))
//!         .field("pwd", vec![required("pwd is required"), min_length(6, "at least 6")])
//!         .field("pwd2", check_fn(|value, data| {
//!             (value != &data["pwd"]).then(|| ErrorDescriptor::single("checkPwd", "passwords differ"))
//!         })),
//! )
//! .with_options(ValidatorOptions::new().check_all(true));
//!
//! let result = validator.validate(json!({"name": "", "pwd": "123", "pwd2": "123"})).await?;
//! assert!(result.has_error("required", "name"));
//! assert!(result.has_error("minLength", "pwd"));
//! ```
//!
//! ## Rules
//!
//! - a single [`CheckFn`](vigil_check::CheckFn) or a list of them
//! - a [`RuleConfig`] naming registry checks (`required`, `minLength`, ...),
//!   with optional nested rules and a per-field fail hook
//! - [`RuleShape::Skip`] for fields that are not validated
//!
//! Declarations can also be read from JSON with
//! [`RuleDeclaration::from_json`].
//!
//! ## Failure hooks
//!
//! A failing call invokes the validator's hook (see
//! [`ValidatorOptions::on_fail`]) or, without one, the process-wide default
//! set through [`Validator::set_default_fail_hook`]; then the per-call hook
//! from [`ValidateOptions`]. A field's own hook runs as soon as that field
//! fails.

pub mod error;
pub mod evaluate;
mod hooks;
mod json;
pub mod normalize;
pub mod options;
pub mod prelude;
pub mod result;
pub mod rule;
pub mod tree;
pub mod validator;

pub use error::{RuleError, ValidateError};
pub use evaluate::{FieldPlan, evaluate};
pub use normalize::{Nested, ResolvedRule, normalize};
pub use options::{FailHook, FieldFailHook, ValidateOptions, ValidatorOptions};
pub use result::Validation;
pub use rule::{Children, RuleConfig, RuleDeclaration, RuleShape};
pub use tree::{ErrorTree, FieldError};
pub use validator::Validator;

pub use vigil_check;
