//! Helpers for interpreting JSON values the way form data is usually judged.

use serde_json::Value;

/// Largest integer a double represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Whether the value counts as "present".
///
/// `null`, `false`, `0` and the empty string are falsy; everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Length of a string (in chars) or an array; `None` for anything else.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Numeric reading of a number or a numeric string.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Whether the number has no fractional part and is exactly representable.
pub fn is_safe_integer(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|n| n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER)
}

/// Strict equality; numbers compare by numeric value (`1 == 1.0`).
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => left == right,
    }
}

/// Loose equality: numbers, numeric strings and booleans are coerced to
/// numbers before comparing; other kinds compare strictly.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (
            Value::Number(_) | Value::String(_) | Value::Bool(_),
            Value::Number(_) | Value::Bool(_),
        )
        | (Value::Number(_) | Value::Bool(_), Value::String(_)) => {
            match (coerce_number(left), coerce_number(right)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        _ => strict_eq(left, right),
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        _ => as_number(value),
    }
}

/// Name of the JSON kind, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
