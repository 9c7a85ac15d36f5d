use thiserror::Error;

/// Kind of pattern for error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Exclusion,
    PlainText,
}

/// Errors produced while constructing path patterns
#[derive(Debug, Error)]
pub enum PatternError {
    /// Empty pattern is invalid
    #[error("Empty {kind:?} pattern provided")]
    InvalidEmpty { kind: PatternKind },
    /// Glob failed to parse and the pattern has no recursive form to fall back on
    #[error("Invalid {kind:?} pattern '{pattern}': {reason}")]
    InvalidGlob {
        kind: PatternKind,
        pattern: String,
        reason: String,
    },
}

impl PatternError {
    #[must_use]
    pub fn glob_parse(kind: PatternKind, pattern: &str, reason: &str) -> Self {
        Self::InvalidGlob {
            kind,
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
