//! Token definitions for TOM markup
//!
//! TOM has a deliberately tiny lexical grammar. Brackets delimit tags, parentheses delimit
//! nested groups inside attribute sections, a single space separates attribute operands, and
//! everything else is text. There is no escape syntax: a character that is not one of the five
//! structural characters always ends up inside a `Text` token.
//!
//! Consecutive spaces produce one `Space` token each so that the detokenizer can restore the
//! exact source.

use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All tokens produced by the TOM tokenizer
#[derive(Logos, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(" ")]
    Space,

    // Maximal run of anything that is not structural, newlines included
    #[regex(r"[^\[\]() ]+", |lex| lex.slice().to_string())]
    Text(String),
}

impl Token {
    /// Check if this token is text content
    pub fn is_text(&self) -> bool {
        matches!(self, Token::Text(_))
    }

    /// Returns the text payload of a `Text` token
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenBracket => write!(f, "<open-bracket>"),
            Token::CloseBracket => write!(f, "<close-bracket>"),
            Token::OpenParen => write!(f, "<open-paren>"),
            Token::CloseParen => write!(f, "<close-paren>"),
            Token::Space => write!(f, "<space>"),
            Token::Text(s) => write!(f, "<text:{}>", s),
        }
    }
}

/// Trait for converting a token to its source representation
pub trait ToTomString {
    fn to_tom_string(&self) -> String;
}

impl ToTomString for Token {
    fn to_tom_string(&self) -> String {
        match self {
            Token::OpenBracket => "[".to_string(),
            Token::CloseBracket => "]".to_string(),
            Token::OpenParen => "(".to_string(),
            Token::CloseParen => ")".to_string(),
            Token::Space => " ".to_string(),
            Token::Text(s) => s.clone(),
        }
    }
}

/// Detokenize a stream of tokens back into source text
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(ToTomString::to_tom_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|result| result.ok()).collect()
    }

    #[test]
    fn test_structural_tokens() {
        assert_eq!(
            lex_all("[]() "),
            vec![
                Token::OpenBracket,
                Token::CloseBracket,
                Token::OpenParen,
                Token::CloseParen,
                Token::Space,
            ]
        );
    }

    #[test]
    fn test_text_is_maximal() {
        assert_eq!(
            lex_all("hello,world!\nnext"),
            vec![Token::Text("hello,world!\nnext".to_string())]
        );
    }

    #[test]
    fn test_each_space_is_a_token() {
        assert_eq!(
            lex_all("a  b"),
            vec![
                Token::Text("a".to_string()),
                Token::Space,
                Token::Space,
                Token::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(
            lex_all("[ruby ふりがな]漢字"),
            vec![
                Token::OpenBracket,
                Token::Text("ruby".to_string()),
                Token::Space,
                Token::Text("ふりがな".to_string()),
                Token::CloseBracket,
                Token::Text("漢字".to_string()),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::Text("bld".to_string()).to_string(), "<text:bld>");
        assert_eq!(Token::Space.to_string(), "<space>");
    }

    #[test]
    fn test_detokenize_restores_source() {
        let source = "[calc (+ 3  4)][/calc] tail\ttext";
        assert_eq!(detokenize(&lex_all(source)), source);
    }
}
