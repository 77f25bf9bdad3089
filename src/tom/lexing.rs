//! Lexer
//!
//! Tokenization is done entirely by logos, see [token](crate::tom::token). This module adds
//! the two pre-flight guards: the character ceiling is checked before any token is produced and
//! the token ceiling is checked before the stream is handed to the parser.

use crate::tom::error::Result;
use crate::tom::limits::Limits;
use crate::tom::token::Token;
use logos::Logos;

/// Tokenize a string and collect all tokens
///
/// The token grammar has a catch-all text rule, so logos never reports an error here.
pub fn tokenize(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .filter_map(|result| result.ok())
        .collect()
}

/// Tokenize a string and collect tokens with their byte spans
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, std::ops::Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

/// Guarded tokenization: length check, tokenize, token-count check
pub fn lex(source: &str, limits: &Limits) -> Result<Vec<Token>> {
    limits.check_length(source)?;
    let tokens = tokenize(source);
    limits.check_tokens(tokens.len())?;
    log::trace!(target: "tom.tokenizer", "tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tom::error::ParserLimitError;
    use crate::tom::limits::MAX_INPUT_LENGTH;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[test]
    fn test_simple_tokenization() {
        let tokens = tokenize("[bld]hi[/bld]");
        assert_eq!(
            tokens,
            vec![
                Token::OpenBracket,
                text("bld"),
                Token::CloseBracket,
                text("hi"),
                Token::OpenBracket,
                text("/bld"),
                Token::CloseBracket,
            ]
        );
    }

    #[test]
    fn test_attribute_tokenization() {
        let tokens = tokenize("[calc (+ 3 4)]");
        assert_eq!(
            tokens,
            vec![
                Token::OpenBracket,
                text("calc"),
                Token::Space,
                Token::OpenParen,
                text("+"),
                Token::Space,
                text("3"),
                Token::Space,
                text("4"),
                Token::CloseParen,
                Token::CloseBracket,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn test_tokenize_with_spans() {
        let tokens = tokenize_with_spans("[hr] ok");
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1], (text("hr"), 1..3));
        assert_eq!(tokens[4], (text("ok"), 5..7));
    }

    #[test]
    fn test_lex_rejects_long_input() {
        let source = "a".repeat(MAX_INPUT_LENGTH + 1);
        assert_eq!(
            lex(&source, &Limits::default()),
            Err(ParserLimitError::InputTooLong {
                length: MAX_INPUT_LENGTH + 1,
                limit: MAX_INPUT_LENGTH
            })
        );
    }

    #[test]
    fn test_lex_accepts_input_at_the_ceiling() {
        let source = "a".repeat(MAX_INPUT_LENGTH);
        assert_eq!(lex(&source, &Limits::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_lex_rejects_token_flood() {
        let limits = Limits {
            max_tokens: 4,
            ..Limits::default()
        };
        assert!(lex("a b c", &limits).is_err());
        assert!(lex("a b", &limits).is_ok());
    }
}
