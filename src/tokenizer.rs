//! # Tokenizer/ Lexer
//!
//! Turns a sequential byte source into a stream of JSON tokens with one
//! token of lookahead and sticky error semantics.
pub mod lexer;
pub mod peekable;
pub mod token;

// Re-exports
pub use lexer::{Lexer, TokenError, TokenSource};
pub use peekable::Peekable;
pub use token::{Token, TokenKind};

use std::io::Read;

/// Wraps a reader in a streaming lexer with single-token lookahead, the
/// shape the parser consumes.
pub fn lex<R: Read>(input: R) -> Peekable<Lexer<R>> {
    Peekable::new(Lexer::new(input))
}
