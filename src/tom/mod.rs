//! Main module for the TOM engine

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod limits;
pub mod parsing;
pub mod pipeline;
pub mod preprocess;
pub mod prerender;
pub mod random;
pub mod render;
pub mod serializer;
pub mod testing;
pub mod token;

pub use ast::{CalcKind, CalcResult, DiceResult, Element, Node, Root, TagName};
pub use error::{ParserLimitError, Result};
pub use parsing::{parse, preparse, ParserConfig};
pub use pipeline::Pipeline;
pub use random::RandomSource;
pub use serializer::stringify;
