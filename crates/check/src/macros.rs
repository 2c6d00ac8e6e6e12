//! Macros for declaring message-only checks with minimal boilerplate.

/// Declares a check that takes only a message: the struct, its [`Check`]
/// implementation and a factory function returning a [`CheckFn`].
///
/// ```rust,ignore
/// crate::macros::check! {
///     /// Passes when the value is a boolean.
///     pub IsBool => "bool";
///     rule(input) { input.is_boolean() }
///     fn boolean;
/// }
/// ```
///
/// [`Check`]: crate::Check
/// [`CheckFn`]: crate::CheckFn
macro_rules! check {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident => $code:literal;
        rule($input:ident) $rule:block
        fn $factory:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            message: $crate::Message,
        }

        impl $name {
            /// Registry name reported in the error descriptor.
            pub const NAME: &'static str = $code;

            /// Creates the check with the message reported on failure.
            pub fn new(message: impl Into<$crate::Message>) -> Self {
                Self {
                    message: message.into(),
                }
            }
        }

        #[async_trait::async_trait]
        impl $crate::Check for $name {
            async fn check(
                &self,
                $input: &serde_json::Value,
                _data: &serde_json::Value,
            ) -> $crate::CheckResult {
                let passed: bool = $rule;
                Ok((!passed).then(|| $crate::ErrorDescriptor::single($code, self.message.clone())))
            }
        }

        #[doc = concat!("Creates a [`", stringify!($name), "`] check.")]
        $vis fn $factory(message: impl Into<$crate::Message>) -> $crate::CheckFn {
            std::sync::Arc::new($name::new(message))
        }
    };
}

pub(crate) use check;
