//! Built-in checks.
//!
//! Every check here is available both as a typed factory function
//! (`min_length(6, "too short")`) and by name through
//! [`CheckRegistry::with_builtins`](crate::CheckRegistry::with_builtins).
//!
//! | Name | Arguments | Passes when |
//! |------|-----------|-------------|
//! | `required` | `[msg]` | value is truthy |
//! | `len` / `minLength` / `maxLength` | `[n, msg]` | string or array length compares to `n` |
//! | `min` / `max` | `[n, msg]` | JSON number compares to `n`; strings always fail |
//! | `number` `int` `float` `bool` `array` `object` `string` | `[msg]` | value has that kind |
//! | `json` / `regexp` | `[msg]` | string parses as JSON / string compiles as a regex (JSON has no regex values) |
//! | `eql` / `equal` | `[value, msg]` | strict / loose equality |
//! | `and` / `or` | `[checks, msg]` | all / any inner checks pass |
//! | `phone` | `[msg]` or `[mode, msg]` | phone number in `zh-CN`, `e164` or `lenient` form |
//! | `email` `hex` `url` `ipv4` `ipv6` | `[msg]` | string has that format |

use std::sync::Arc;

use crate::registry::CheckFactory;
use crate::{Args, ArgsError, CheckFn};

mod equality;
mod format;
mod length;
mod logical;
mod presence;
mod range;
mod types;

pub use equality::{Equality, Equals, eql, equal};
pub use format::{
    Email, Hex, Ipv4, Ipv6, IsUrl, Phone, PhoneMode, email, hex, ipv4, ipv6, phone, phone_with,
    url,
};
pub use length::{Length, LengthBound, len, max_length, min_length};
pub use logical::{All, Any, and, or};
pub use presence::{Required, required};
pub use range::{Max, Min, max, min};
pub use types::{
    IsArray, IsBool, IsFloat, IsInt, IsJson, IsNumber, IsObject, IsRegexp, IsString, array,
    boolean, float, int, json, number, object, regexp, string,
};

fn message_only(build: fn(crate::Message) -> CheckFn) -> CheckFactory {
    Arc::new(move |args: &Args| -> Result<CheckFn, ArgsError> {
        Ok(build(args.message(0)))
    })
}

fn with_length(build: fn(usize, crate::Message) -> CheckFn) -> CheckFactory {
    Arc::new(move |args: &Args| -> Result<CheckFn, ArgsError> {
        Ok(build(args.length(0)?, args.message(1)))
    })
}

fn with_number(build: fn(f64, crate::Message) -> CheckFn) -> CheckFactory {
    Arc::new(move |args: &Args| -> Result<CheckFn, ArgsError> {
        Ok(build(args.number(0)?, args.message(1)))
    })
}

fn with_value(build: fn(serde_json::Value, crate::Message) -> CheckFn) -> CheckFactory {
    Arc::new(move |args: &Args| -> Result<CheckFn, ArgsError> {
        Ok(build(args.value(0)?.clone(), args.message(1)))
    })
}

fn with_checks(build: fn(Vec<CheckFn>, crate::Message) -> CheckFn) -> CheckFactory {
    Arc::new(move |args: &Args| -> Result<CheckFn, ArgsError> {
        Ok(build(args.checks(0)?.to_vec(), args.message(1)))
    })
}

fn phone_factory(args: &Args) -> Result<CheckFn, ArgsError> {
    if args.len() < 2 {
        return Ok(phone(args.message(0)));
    }
    let mode = args.string(0)?.parse().map_err(|()| ArgsError::Expected {
        index: 0,
        expected: "a phone mode (zh-CN, e164 or lenient)",
    })?;
    Ok(phone_with(mode, args.message(1)))
}

/// Name and factory of every built-in check.
pub(crate) fn entries() -> Vec<(&'static str, CheckFactory)> {
    vec![
        (Required::NAME, message_only(|m| required(m))),
        ("len", with_length(|n, m| len(n, m))),
        ("minLength", with_length(|n, m| min_length(n, m))),
        ("maxLength", with_length(|n, m| max_length(n, m))),
        (Min::NAME, with_number(|n, m| min(n, m))),
        (Max::NAME, with_number(|n, m| max(n, m))),
        (IsNumber::NAME, message_only(|m| number(m))),
        (IsInt::NAME, message_only(|m| int(m))),
        (IsFloat::NAME, message_only(|m| float(m))),
        (IsBool::NAME, message_only(|m| boolean(m))),
        (IsArray::NAME, message_only(|m| array(m))),
        (IsObject::NAME, message_only(|m| object(m))),
        (IsJson::NAME, message_only(|m| json(m))),
        (IsRegexp::NAME, message_only(|m| regexp(m))),
        (IsString::NAME, message_only(|m| string(m))),
        ("eql", with_value(|v, m| eql(v, m))),
        ("equal", with_value(|v, m| equal(v, m))),
        (All::NAME, with_checks(|c, m| and(c, m))),
        (Any::NAME, with_checks(|c, m| or(c, m))),
        (Phone::NAME, Arc::new(phone_factory) as CheckFactory),
        (Email::NAME, message_only(|m| email(m))),
        (Hex::NAME, message_only(|m| hex(m))),
        (IsUrl::NAME, message_only(|m| url(m))),
        (Ipv4::NAME, message_only(|m| ipv4(m))),
        (Ipv6::NAME, message_only(|m| ipv6(m))),
    ]
}
