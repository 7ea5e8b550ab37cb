//! # JSON Lexer
//!
//! Scans a sequential byte source into a stream of [`Token`]s, one call at a
//! time. The lexer never buffers more than the bytes of the token currently
//! being read plus a single pushed-back byte, so arbitrarily long inputs can
//! be consumed incrementally.
use std::fmt::Display;
use std::io::{self, Read};

use crate::tokenizer::Token;

/// Anything that can produce tokens one at a time.
///
/// Behavior after a returned error is unspecified at this layer; wrap the
/// source in a [`Peekable`](crate::tokenizer::Peekable) to make errors
/// sticky.
pub trait TokenSource {
    /// Read the next token from the source.
    fn next_token(&mut self) -> Result<Token, TokenError>;
}

/// Errors raised while scanning the input stream.
///
/// Payloads are plain strings so the error stays `Clone`, which the
/// lookahead wrapper relies on to replay a failure on every later call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// A character that cannot start any token.
    Unrecognized(char),
    /// The stream ended inside a quoted string.
    UnterminatedText,
    /// An unquoted literal contained something other than lower-case ASCII
    /// letters.
    InvalidPrimitive(String),
    /// A token's raw bytes were not valid UTF-8.
    InvalidUtf8,
    /// The underlying reader failed.
    Io(String),
}

impl std::error::Error for TokenError {}

impl Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrecognized(c) => write!(f, "unrecognized token: '{c}'"),
            Self::UnterminatedText => {
                write!(f, "unexpected end of stream in text")
            }
            Self::InvalidPrimitive(text) => {
                write!(f, "invalid primitive text: '{text}'")
            }
            Self::InvalidUtf8 => write!(f, "invalid utf-8 in token text"),
            Self::Io(msg) => write!(f, "cannot read input: {msg}"),
        }
    }
}

/// A streaming lexer over any [`Read`] implementation.
pub struct Lexer<R: Read> {
    /// Byte-at-a-time view of the input
    input: io::Bytes<R>,
    /// Single byte of pushback, for delimiter-terminated tokens
    pending: Option<u8>,
}

impl<R: Read> Lexer<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: input.bytes(),
            pending: None,
        }
    }

    /// Reads and consumes the next byte, `None` at end of stream.
    fn read_byte(&mut self) -> Result<Option<u8>, TokenError> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }
        match self.input.next() {
            None => Ok(None),
            Some(Ok(byte)) => Ok(Some(byte)),
            Some(Err(err)) => Err(TokenError::Io(err.to_string())),
        }
    }

    /// Pushes a byte back so the next `read_byte` returns it again.
    fn unread_byte(&mut self, byte: u8) {
        self.pending = Some(byte);
    }

    /// Skips whitespace and returns the first non-whitespace byte, or `None`
    /// at end of stream.
    fn skip_whitespace(&mut self) -> Result<Option<u8>, TokenError> {
        loop {
            match self.read_byte()? {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {}
                other => return Ok(other),
            }
        }
    }

    /// Reads the remainder of a quoted string, the opening quote already
    /// consumed. Escape sequences are copied verbatim: a backslash and the
    /// byte after it land in the token unchanged, without interpretation.
    fn read_text(&mut self) -> Result<Token, TokenError> {
        let mut raw = Vec::new();
        loop {
            let byte =
                self.read_byte()?.ok_or(TokenError::UnterminatedText)?;
            match byte {
                b'"' => return Ok(Token::Text(into_utf8(raw)?)),
                b'\\' => {
                    raw.push(byte);
                    let escaped = self
                        .read_byte()?
                        .ok_or(TokenError::UnterminatedText)?;
                    raw.push(escaped);
                }
                _ => raw.push(byte),
            }
        }
    }

    /// Reads a numeric literal until a delimiter or end of stream. The text
    /// is not checked against the JSON number grammar; malformed numbers are
    /// the caller's problem.
    fn read_number(&mut self, first: u8) -> Result<Token, TokenError> {
        let mut raw = vec![first];
        loop {
            match self.read_byte()? {
                None => break,
                Some(byte) if is_delimiter(byte) => {
                    self.unread_byte(byte);
                    break;
                }
                Some(byte) => raw.push(byte),
            }
        }
        Ok(Token::PrimitiveNumber(into_utf8(raw)?))
    }

    /// Reads an unquoted literal until a delimiter or end of stream. Every
    /// byte must be a lower-case ASCII letter.
    fn read_primitive(&mut self, first: u8) -> Result<Token, TokenError> {
        let mut raw = vec![first];
        loop {
            match self.read_byte()? {
                None => break,
                Some(byte) if is_delimiter(byte) => {
                    self.unread_byte(byte);
                    break;
                }
                Some(byte) if byte.is_ascii_lowercase() => raw.push(byte),
                Some(byte) => {
                    raw.push(byte);
                    return Err(TokenError::InvalidPrimitive(
                        String::from_utf8_lossy(&raw).into_owned(),
                    ));
                }
            }
        }
        Ok(Token::PrimitiveText(into_utf8(raw)?))
    }
}

impl<R: Read> TokenSource for Lexer<R> {
    fn next_token(&mut self) -> Result<Token, TokenError> {
        let Some(byte) = self.skip_whitespace()? else {
            // End of stream between tokens is not an error.
            return Ok(Token::Eof);
        };

        match byte {
            b'{' => Ok(Token::OpeningBrace),
            b'}' => Ok(Token::ClosingBrace),
            b'[' => Ok(Token::OpeningBracket),
            b']' => Ok(Token::ClosingBracket),
            b':' => Ok(Token::Colon),
            b',' => Ok(Token::Comma),
            b'"' => self.read_text(),
            b'-' | b'0'..=b'9' => self.read_number(byte),
            b'a'..=b'z' => self.read_primitive(byte),
            other => Err(TokenError::Unrecognized(char::from(other))),
        }
    }
}

/// True for the bytes that end a number or primitive literal.
const fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b' ' | b'\t' | b'\n' | b'\r' | b',' | b'{' | b'}' | b'[' | b']' | b':'
    )
}

fn into_utf8(raw: Vec<u8>) -> Result<String, TokenError> {
    String::from_utf8(raw).map_err(|_| TokenError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drain a lexer into a token vector, panicking on lex errors.
    fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input.as_bytes());
        let mut tokens = vec![];
        loop {
            let token = lexer.next_token().expect("lex error");
            let is_eof = matches!(token, Token::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    #[test]
    fn test_empty() {
        assert_eq!(tokenize(""), vec![Token::Eof]);
        assert_eq!(tokenize(" \t\r\n"), vec![Token::Eof]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokenize("{}[],:"),
            vec![
                Token::OpeningBrace,
                Token::ClosingBrace,
                Token::OpeningBracket,
                Token::ClosingBracket,
                Token::Comma,
                Token::Colon,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            tokenize("null true false"),
            vec![
                Token::PrimitiveText("null".into()),
                Token::PrimitiveText("true".into()),
                Token::PrimitiveText("false".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_number_variants() {
        // Raw text survives untouched, including shapes that are not valid
        // JSON numbers; validation is not this layer's job.
        let cases =
            ["0", "-0", "123", "-123", "3.14", "0.001e-10", "-01.23", "1.2.3"];
        for case in &cases {
            assert_eq!(
                tokenize(case),
                vec![Token::PrimitiveNumber((*case).into()), Token::Eof],
                "case: {case}"
            );
        }
    }

    #[test]
    fn test_number_ends_at_delimiter() {
        assert_eq!(
            tokenize("[1,22]"),
            vec![
                Token::OpeningBracket,
                Token::PrimitiveNumber("1".into()),
                Token::Comma,
                Token::PrimitiveNumber("22".into()),
                Token::ClosingBracket,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_string_keeps_escapes_raw() {
        let tokens = tokenize(r#""hello\nworld\"!""#);
        assert_eq!(
            tokens,
            vec![Token::Text(r#"hello\nworld\"!"#.into()), Token::Eof]
        );
    }

    #[test]
    fn test_string_with_nested_braces() {
        assert_eq!(
            tokenize(r#""wor{}ld""#),
            vec![Token::Text("wor{}ld".into()), Token::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new(r#""oops"#.as_bytes());
        assert_eq!(lexer.next_token(), Err(TokenError::UnterminatedText));
    }

    #[test]
    fn test_string_ending_in_escape() {
        let mut lexer = Lexer::new(r#""oops\"#.as_bytes());
        assert_eq!(lexer.next_token(), Err(TokenError::UnterminatedText));
    }

    #[test]
    fn test_unrecognized_character() {
        let mut lexer = Lexer::new("True".as_bytes());
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err, TokenError::Unrecognized('T'));
        assert_eq!(err.to_string(), "unrecognized token: 'T'");
    }

    #[test]
    fn test_invalid_primitive() {
        let mut lexer = Lexer::new("tru3".as_bytes());
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err, TokenError::InvalidPrimitive("tru3".into()));
        assert_eq!(err.to_string(), "invalid primitive text: 'tru3'");
    }

    #[test]
    fn test_primitive_ends_at_delimiter() {
        assert_eq!(
            tokenize("true,false"),
            vec![
                Token::PrimitiveText("true".into()),
                Token::Comma,
                Token::PrimitiveText("false".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            tokenize(r#""grüezi""#),
            vec![Token::Text("grüezi".into()), Token::Eof]
        );
    }
}
