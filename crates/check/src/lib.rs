//! # vigil-check
//!
//! The unit of validation logic used by the Vigil engine.
//!
//! A [`Check`] inspects one field value (plus the whole input object as
//! context) and reports either nothing or an [`ErrorDescriptor`] mapping the
//! failed check's name to a message. Checks are asynchronous so they may reach
//! out to remote services (e.g. uniqueness lookups).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vigil_check::builtin::{min_length, required};
//!
//! let name = required("name is required");
//! let short = min_length(6, "at least 6 characters");
//! assert!(short.check(&json!("ab"), &json!({})).await?.is_some());
//! ```
//!
//! ## Built-in Checks
//!
//! [`builtin`] holds the factories behind every name in
//! [`CheckRegistry::with_builtins`]: presence, length, numeric range, type
//! checks, equality, `and`/`or` combinators and format checks (phone, email,
//! hex, URL, IPv4/IPv6). Applications add their own names through
//! [`CheckRegistry::register`].

mod macros;

pub mod args;
pub mod builtin;
pub mod check;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod value;

pub use args::{Arg, Args};
pub use check::{Check, CheckFn, CheckResult, async_check_fn, check_fn, try_check_fn};
pub use descriptor::{ErrorDescriptor, Message};
pub use error::{ArgsError, CheckError, RegistryError};
pub use registry::{CheckFactory, CheckRegistry, RESERVED_KEYS, is_reserved};
