//! Parser module for TOM markup
//!
//! Parsing is a single pass of an explicit frame-stack machine over the token stream, see
//! [parser]. The same machine runs in two configurations:
//!
//! - write mode ([preparse]): `dice` is self-closing, so `[dice 1 6]` is a complete element
//!   that the preprocessor can roll.
//! - read mode ([parse]): `dice` has a body holding its frozen result, `[dice 1 6]4[/dice]`.
//!
//! Malformed markup never fails a parse. The only errors are the resource ceilings.

pub mod config;
mod frame;
pub mod parser;

pub use config::ParserConfig;
pub use parser::parse_tokens;

use crate::tom::ast::Root;
use crate::tom::error::Result;
use crate::tom::lexing;

/// Parse persisted text in read mode
pub fn parse(source: &str) -> Result<Root> {
    parse_with(source, &ParserConfig::read())
}

/// Parse a fresh submission in write mode
pub fn preparse(source: &str) -> Result<Root> {
    parse_with(source, &ParserConfig::write())
}

/// Guarded tokenize + parse under an explicit configuration
pub fn parse_with(source: &str, config: &ParserConfig) -> Result<Root> {
    let tokens = lexing::lex(source, &config.limits)?;
    parse_tokens(&tokens, config)
}
