use std::fmt;
use thiserror::Error as ThisError;

///
/// EngineError
///
/// Classified runtime error carried across the engine's fallible paths.
/// "No rule found" is never an error; resolution signals it as `Ok(None)`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct EngineError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl EngineError {
    /// Construct a classified engine error.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }
}

///
/// ErrorClass
///
/// Internal failure classification. Invariant violations come from trusted
/// data (the built-in table, validated rule sets) breaking its contract.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Internal,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///
/// Subsystem the failure was detected in.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Builtin,
    Infer,
    Names,
    Rules,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Builtin => "builtin",
            Self::Infer => "infer",
            Self::Names => "names",
            Self::Rules => "rules",
        };
        write!(f, "{label}")
    }
}
