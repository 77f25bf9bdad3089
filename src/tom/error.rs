//! Error types for the TOM engine
//!
//! The engine has exactly one error that reaches callers: a resource ceiling was crossed.
//! Malformed markup never produces an error, it degrades to literal text in place.

use std::fmt;

/// A resource ceiling was exceeded; the whole submission should be rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserLimitError {
    /// Input is longer than the configured number of characters
    InputTooLong { length: usize, limit: usize },
    /// Tokenizing produced more tokens than allowed
    TooManyTokens { count: usize, limit: usize },
    /// A push would grow the parser frame stack past its ceiling
    TooDeep { depth: usize, limit: usize },
}

impl ParserLimitError {
    /// Short machine-friendly name of the violated limit
    pub fn kind(&self) -> &'static str {
        match self {
            ParserLimitError::InputTooLong { .. } => "input-too-long",
            ParserLimitError::TooManyTokens { .. } => "too-many-tokens",
            ParserLimitError::TooDeep { .. } => "too-deep",
        }
    }
}

impl fmt::Display for ParserLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserLimitError::InputTooLong { length, limit } => {
                write!(f, "Input too long: {} characters (limit {})", length, limit)
            }
            ParserLimitError::TooManyTokens { count, limit } => {
                write!(f, "Too many tokens: {} (limit {})", count, limit)
            }
            ParserLimitError::TooDeep { depth, limit } => {
                write!(f, "Nesting too deep: {} frames (limit {})", depth, limit)
            }
        }
    }
}

impl std::error::Error for ParserLimitError {}

/// Result alias used by every fallible engine entry point
pub type Result<T> = std::result::Result<T, ParserLimitError>;
