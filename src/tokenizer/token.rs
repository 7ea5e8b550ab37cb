//! # JSON Token
//!
//! Defines the lexical tokens produced while scanning a JSON byte stream.
use std::fmt::Display;

/// A single lexical token from a JSON input stream.
///
/// Value-bearing variants carry the raw input text: quoted text keeps its
/// escape sequences exactly as written, and numbers keep their original
/// digits (no normalization of signs, leading zeros, or exponents).
#[derive(Debug, PartialEq, Clone, Eq)]
pub enum Token {
    /* Delimiters */
    /// Opening curly brace
    OpeningBrace,

    /// Closing curly brace
    ClosingBrace,

    /// Opening square bracket
    OpeningBracket,

    /// Closing square bracket
    ClosingBracket,

    /// Comma character
    Comma,

    /// Colon character
    Colon,

    /* Values */
    /// Quoted text; the payload is the still-escaped characters between the
    /// quotes, without the quotes themselves.
    Text(String),

    /// An unquoted run of lower-case ASCII letters (`true`, `false`, `null`,
    /// or anything else — the parser decides validity).
    PrimitiveText(String),

    /// An unquoted numeric literal, kept as raw text and not validated
    /// against the JSON number grammar.
    PrimitiveNumber(String),

    /* Reserved */
    /// End of the input stream
    Eof,
}

impl Token {
    /// The tag of this token, without its payload.
    pub const fn kind(&self) -> TokenKind {
        match self {
            Token::OpeningBrace => TokenKind::OpeningBrace,
            Token::ClosingBrace => TokenKind::ClosingBrace,
            Token::OpeningBracket => TokenKind::OpeningBracket,
            Token::ClosingBracket => TokenKind::ClosingBracket,
            Token::Comma => TokenKind::Comma,
            Token::Colon => TokenKind::Colon,
            Token::Text(_) => TokenKind::Text,
            Token::PrimitiveText(_) => TokenKind::PrimitiveText,
            Token::PrimitiveNumber(_) => TokenKind::PrimitiveNumber,
            Token::Eof => TokenKind::Eof,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Text(value) => write!(f, "Text({value:?})"),
            Token::PrimitiveText(value) => {
                write!(f, "PrimitiveText({value:?})")
            }
            Token::PrimitiveNumber(value) => {
                write!(f, "PrimitiveNumber({value:?})")
            }
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// The tag of a [`Token`], used in diagnostics where only the shape of the
/// token matters.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum TokenKind {
    OpeningBrace,
    ClosingBrace,
    OpeningBracket,
    ClosingBracket,
    Comma,
    Colon,
    Text,
    PrimitiveText,
    PrimitiveNumber,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::OpeningBrace => "OpeningBrace",
            TokenKind::ClosingBrace => "ClosingBrace",
            TokenKind::OpeningBracket => "OpeningBracket",
            TokenKind::ClosingBracket => "ClosingBracket",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::Text => "Text",
            TokenKind::PrimitiveText => "PrimitiveText",
            TokenKind::PrimitiveNumber => "PrimitiveNumber",
            TokenKind::Eof => "Eof",
        };
        write!(f, "{name}")
    }
}
