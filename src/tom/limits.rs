//! Resource ceilings
//!
//! Posts come from anonymous users, so every call is bounded up front. The three ceilings
//! bound worst-case CPU and memory without a wall-clock timeout: tokenizing is linear in the
//! input length, parsing is linear in the token count, and every tree walk is bounded by the
//! frame depth.

use crate::tom::error::{ParserLimitError, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted in one input
pub const MAX_INPUT_LENGTH: usize = 100_000;
/// Maximum number of tokens the parser accepts
pub const MAX_TOKENS: usize = 50_000;
/// Maximum number of parser frames, root frame included
pub const MAX_STACK_DEPTH: usize = 50;

/// The three ceilings applied to a single call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub max_input_length: usize,
    pub max_tokens: usize,
    pub max_stack_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_length: MAX_INPUT_LENGTH,
            max_tokens: MAX_TOKENS,
            max_stack_depth: MAX_STACK_DEPTH,
        }
    }
}

impl Limits {
    /// Reject inputs longer than the character ceiling
    pub fn check_length(&self, source: &str) -> Result<()> {
        // Byte length is an upper bound on the character count; skip the scan when it fits.
        if source.len() <= self.max_input_length {
            return Ok(());
        }
        let length = source.chars().count();
        if length > self.max_input_length {
            log::warn!(target: "tom.limits", "input rejected: {} characters", length);
            return Err(ParserLimitError::InputTooLong {
                length,
                limit: self.max_input_length,
            });
        }
        Ok(())
    }

    /// Reject token streams larger than the token ceiling
    pub fn check_tokens(&self, count: usize) -> Result<()> {
        if count > self.max_tokens {
            log::warn!(target: "tom.limits", "input rejected: {} tokens", count);
            return Err(ParserLimitError::TooManyTokens {
                count,
                limit: self.max_tokens,
            });
        }
        Ok(())
    }

    /// Called before a push; `current` is the stack size before the push
    pub fn check_depth(&self, current: usize) -> Result<()> {
        let depth = current + 1;
        if depth > self.max_stack_depth {
            log::warn!(target: "tom.limits", "input rejected: {} parser frames", depth);
            return Err(ParserLimitError::TooDeep {
                depth,
                limit: self.max_stack_depth,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let limits = Limits {
            max_input_length: 3,
            ..Limits::default()
        };
        // Three characters, nine bytes
        assert!(limits.check_length("漢字か").is_ok());
        assert_eq!(
            limits.check_length("漢字かな"),
            Err(ParserLimitError::InputTooLong {
                length: 4,
                limit: 3
            })
        );
    }

    #[test]
    fn test_token_ceiling_is_inclusive() {
        let limits = Limits::default();
        assert!(limits.check_tokens(MAX_TOKENS).is_ok());
        assert!(limits.check_tokens(MAX_TOKENS + 1).is_err());
    }

    #[test]
    fn test_depth_ceiling() {
        let limits = Limits::default();
        assert!(limits.check_depth(MAX_STACK_DEPTH - 1).is_ok());
        assert_eq!(
            limits.check_depth(MAX_STACK_DEPTH),
            Err(ParserLimitError::TooDeep {
                depth: MAX_STACK_DEPTH + 1,
                limit: MAX_STACK_DEPTH
            })
        );
    }
}
