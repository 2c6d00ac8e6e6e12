//! Everything needed to declare rules and validate data.
//!
//! ```rust,ignore
//! use vigil_validator::prelude::*;
//! ```

pub use crate::{
    Children, ErrorTree, FieldError, RuleConfig, RuleDeclaration, RuleError, RuleShape,
    ValidateError, ValidateOptions, Validation, Validator, ValidatorOptions,
};

pub use vigil_check::builtin::*;
pub use vigil_check::{
    Args, Check, CheckError, CheckFn, CheckRegistry, CheckResult, ErrorDescriptor, Message, args,
    async_check_fn, check_fn, try_check_fn,
};
