//! Error types for checks, check arguments and the registry.

/// A check factory was given arguments it cannot use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    /// A required argument is missing.
    #[error("missing argument at position {index}")]
    Missing {
        /// Zero-based argument position.
        index: usize,
    },

    /// An argument has the wrong kind.
    #[error("argument at position {index} must be {expected}")]
    Expected {
        /// Zero-based argument position.
        index: usize,
        /// Human-readable description of what was expected.
        expected: &'static str,
    },
}

/// A check could not decide whether the value is valid.
///
/// This is distinct from a validation failure: it signals a broken check
/// (an unreachable lookup service, a bug) and aborts the validation.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Internal failure described by a message.
    #[error("check failed internally: {0}")]
    Internal(String),

    /// Failure carried from another error type.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CheckError {
    /// Creates an [`Internal`](Self::Internal) error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Errors from [`CheckRegistry`](crate::CheckRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A check with this name is already registered.
    #[error("check `{name}` is already registered")]
    Duplicate {
        /// The conflicting name.
        name: String,
    },

    /// The name is a structural rule key and can never name a check.
    #[error("`{name}` is a reserved rule key")]
    Reserved {
        /// The reserved name.
        name: String,
    },

    /// No check is registered under this name.
    #[error("unknown check `{name}`")]
    UnknownCheck {
        /// The name that was looked up.
        name: String,
    },

    /// The factory rejected its arguments.
    #[error("invalid arguments for check `{name}`: {source}")]
    InvalidArguments {
        /// The check name.
        name: String,
        /// What was wrong with the arguments.
        #[source]
        source: ArgsError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_error_display() {
        let err = ArgsError::Expected {
            index: 0,
            expected: "a non-negative integer",
        };
        assert_eq!(
            err.to_string(),
            "argument at position 0 must be a non-negative integer"
        );
    }

    #[test]
    fn boxed_errors_convert() {
        let io = std::io::Error::other("connection reset");
        let err = CheckError::from(Box::new(io) as Box<dyn std::error::Error + Send + Sync>);
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn invalid_arguments_keeps_source() {
        let err = RegistryError::InvalidArguments {
            name: "minLength".into(),
            source: ArgsError::Missing { index: 0 },
        };
        assert_eq!(
            err.to_string(),
            "invalid arguments for check `minLength`: missing argument at position 0"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
