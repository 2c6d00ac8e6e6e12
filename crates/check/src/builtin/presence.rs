//! Presence check.

use crate::value::is_truthy;

crate::macros::check! {
    /// Passes when the value is present: not `null`, `false`, `0` or `""`.
    ///
    /// Empty arrays and objects count as present; pair with
    /// [`min_length`](super::min_length) to require items.
    pub Required => "required";
    rule(input) { is_truthy(input) }
    fn required;
}
