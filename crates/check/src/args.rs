//! Argument lists handed to check factories.
//!
//! A rule like `minLength: [6, "too short"]` names a check and its arguments.
//! By convention the last argument is the message reported on failure; a
//! missing message reports `true`.

use std::fmt;

use serde_json::Value;

use crate::check::CheckFn;
use crate::descriptor::Message;
use crate::error::ArgsError;

/// One factory argument.
#[derive(Clone)]
pub enum Arg {
    /// Plain data: a length, a bound, a message, a value to compare with.
    Value(Value),
    /// Checks for combinators such as `and` / `or`.
    Checks(Vec<CheckFn>),
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Checks(checks) => write!(f, "Checks({} checks)", checks.len()),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<CheckFn>> for Arg {
    fn from(checks: Vec<CheckFn>) -> Self {
        Self::Checks(checks)
    }
}

macro_rules! arg_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

arg_from_value!(&str, String, bool, i32, i64, u32, u64, usize, f64);

/// Ordered argument list for a check factory.
///
/// Building from a JSON array spreads the array; any other single value
/// becomes a one-element list.
///
/// # Examples
///
/// ```rust,ignore
/// use vigil_check::{Args, args};
///
/// let a = Args::from(json!([6, "too short"]));   // two arguments
/// let b = Args::from("name is required");         // one argument
/// let c = args![vec![number(()), string(())], "number or string"];
/// ```
#[derive(Debug, Clone, Default)]
pub struct Args(Vec<Arg>);

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn push(mut self, arg: impl Into<Arg>) -> Self {
        self.0.push(arg.into());
        self
    }

    /// Argument at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Arg> {
        self.0.get(index)
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the arguments.
    pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
        self.0.iter()
    }

    /// Plain value at `index`.
    pub fn value(&self, index: usize) -> Result<&Value, ArgsError> {
        match self.0.get(index) {
            Some(Arg::Value(value)) => Ok(value),
            Some(Arg::Checks(_)) => Err(ArgsError::Expected {
                index,
                expected: "a value",
            }),
            None => Err(ArgsError::Missing { index }),
        }
    }

    /// Number (or numeric string) at `index`.
    pub fn number(&self, index: usize) -> Result<f64, ArgsError> {
        crate::value::as_number(self.value(index)?).ok_or(ArgsError::Expected {
            index,
            expected: "a number",
        })
    }

    /// Non-negative integer at `index`, e.g. a length bound.
    pub fn length(&self, index: usize) -> Result<usize, ArgsError> {
        let n = self.number(index)?;
        if n < 0.0 || n.fract() != 0.0 {
            return Err(ArgsError::Expected {
                index,
                expected: "a non-negative integer",
            });
        }
        Ok(n as usize)
    }

    /// String at `index`.
    pub fn string(&self, index: usize) -> Result<&str, ArgsError> {
        self.value(index)?.as_str().ok_or(ArgsError::Expected {
            index,
            expected: "a string",
        })
    }

    /// Check list at `index`.
    pub fn checks(&self, index: usize) -> Result<&[CheckFn], ArgsError> {
        match self.0.get(index) {
            Some(Arg::Checks(checks)) => Ok(checks),
            Some(Arg::Value(_)) => Err(ArgsError::Expected {
                index,
                expected: "a list of checks",
            }),
            None => Err(ArgsError::Missing { index }),
        }
    }

    /// Message at `index`; missing or `null` means "no message".
    pub fn message(&self, index: usize) -> Message {
        match self.0.get(index) {
            Some(Arg::Value(value)) => Message::from(value.clone()),
            _ => Message::default(),
        }
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => items.into_iter().map(Arg::Value).collect(),
            other => Self(vec![Arg::Value(other)]),
        }
    }
}

impl From<Arg> for Args {
    fn from(arg: Arg) -> Self {
        Self(vec![arg])
    }
}

impl From<Vec<Arg>> for Args {
    fn from(args: Vec<Arg>) -> Self {
        Self(args)
    }
}

impl From<()> for Args {
    fn from((): ()) -> Self {
        Self::new()
    }
}

macro_rules! args_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Args {
                fn from(value: $ty) -> Self {
                    Self(vec![Arg::from(value)])
                }
            }
        )*
    };
}

args_from_scalar!(&str, String, bool, i32, i64, u32, u64, usize, f64);

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Arg;
    type IntoIter = std::slice::Iter<'a, Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds an [`Args`] list from heterogeneous arguments.
///
/// ```rust,ignore
/// let args = vigil_check::args![6, "too short"];
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::Args::new() };
    ($($arg:expr),+ $(,)?) => {
        $crate::Args::from(vec![$($crate::Arg::from($arg)),+])
    };
}
