//! Type checks: the JSON kind of a value, or what a string holds.

use serde_json::Value;

use crate::value::is_safe_integer;

crate::macros::check! {
    /// Passes for any JSON number.
    pub IsNumber => "number";
    rule(input) { input.is_number() }
    fn number;
}

crate::macros::check! {
    /// Passes for numbers without a fractional part within ±(2^53 - 1).
    pub IsInt => "int";
    rule(input) { is_safe_integer(input) }
    fn int;
}

crate::macros::check! {
    /// Passes for numbers with a fractional part.
    pub IsFloat => "float";
    rule(input) { input.as_f64().is_some_and(|n| n.fract() != 0.0) }
    fn float;
}

crate::macros::check! {
    /// Passes for `true` and `false`.
    pub IsBool => "bool";
    rule(input) { input.is_boolean() }
    fn boolean;
}

crate::macros::check! {
    /// Passes for arrays.
    pub IsArray => "array";
    rule(input) { input.is_array() }
    fn array;
}

crate::macros::check! {
    /// Passes for objects (not arrays, not `null`).
    pub IsObject => "object";
    rule(input) { input.is_object() }
    fn object;
}

crate::macros::check! {
    /// Passes for strings.
    pub IsString => "string";
    rule(input) { input.is_string() }
    fn string;
}

crate::macros::check! {
    /// Passes for strings holding well-formed JSON.
    pub IsJson => "json";
    rule(input) {
        input
            .as_str()
            .is_some_and(|text| serde_json::from_str::<Value>(text).is_ok())
    }
    fn json;
}

crate::macros::check! {
    /// Passes for strings that compile as a regular expression.
    pub IsRegexp => "regexp";
    rule(input) { input.as_str().is_some_and(|pattern| regex::Regex::new(pattern).is_ok()) }
    fn regexp;
}
