use crate::error::{EngineError, ErrorClass, ErrorOrigin};
use thiserror::Error as ThisError;

/// Suffix separator character.
pub const SUFFIX_SEP: char = '.';

/// Wildcard placeholder accepted in pattern-rule suffixes.
pub const PATTERN_PLACEHOLDER: char = '%';

///
/// PatternError
///
/// A pattern suffix that reaches the splitter malformed. Suffix rules are
/// either built-in (trusted) or validated at load time, so this is an
/// invariant violation, not a recoverable parse failure.
///

#[derive(Debug, ThisError)]
pub enum PatternError {
    #[error("pattern suffix '{pattern}' has no '%' placeholder")]
    MissingPlaceholder { pattern: String },

    #[error("pattern suffix '{pattern}' has more than one '%' placeholder")]
    ExtraPlaceholder { pattern: String },
}

impl PatternError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::InvariantViolation
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Rules
    }
}

impl From<PatternError> for EngineError {
    fn from(err: PatternError) -> Self {
        Self::new(err.class(), err.origin(), err.to_string())
    }
}

/// Return the trailing suffix of `name`, separator included, or the empty
/// tail when no separator is present.
#[must_use]
pub fn suffix(name: &str) -> &str {
    name.rfind(SUFFIX_SEP).map_or("", |at| &name[at..])
}

/// Split `name` into `(stem, suffix)`; the suffix keeps its separator.
#[must_use]
pub fn split_suffix(name: &str) -> (&str, &str) {
    name.rfind(SUFFIX_SEP)
        .map_or((name, ""), |at| name.split_at(at))
}

/// Split a pattern suffix into the fragments before and after its single
/// placeholder. The tail may be empty.
pub fn split_pattern(pattern: &str) -> Result<(&str, &str), PatternError> {
    let Some(at) = pattern.find(PATTERN_PLACEHOLDER) else {
        return Err(PatternError::MissingPlaceholder {
            pattern: pattern.to_owned(),
        });
    };
    let (prefix, rest) = pattern.split_at(at);
    let tail = &rest[1..];
    if tail.contains(PATTERN_PLACEHOLDER) {
        return Err(PatternError::ExtraPlaceholder {
            pattern: pattern.to_owned(),
        });
    }
    Ok((prefix, tail))
}
