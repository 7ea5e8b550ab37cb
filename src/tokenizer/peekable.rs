//! # Lookahead Wrapper
//!
//! Decorates a [`TokenSource`] with single-token lookahead. The parser needs
//! to see the next token before committing to a production rule, and a
//! source that has failed once must keep failing the same way instead of
//! reading on from a corrupted position.
use crate::tokenizer::{Token, TokenError, TokenSource};

/// A [`TokenSource`] with one token of lookahead and sticky errors.
pub struct Peekable<T: TokenSource> {
    source: T,
    /// Token already read but not yet consumed
    peeked: Option<Token>,
    /// First error from the source, replayed on every later call
    failed: Option<TokenError>,
}

impl<T: TokenSource> Peekable<T> {
    pub fn new(source: T) -> Self {
        Self {
            source,
            peeked: None,
            failed: None,
        }
    }

    /// Returns the next token without consuming it. Repeated peeks return
    /// the same token without touching the underlying source.
    pub fn peek(&mut self) -> Result<Token, TokenError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        if let Some(token) = &self.peeked {
            return Ok(token.clone());
        }

        let token = self.read()?;
        self.peeked = Some(token.clone());
        Ok(token)
    }

    /// Reads fresh from the source, memoizing the first error so it can be
    /// replayed.
    fn read(&mut self) -> Result<Token, TokenError> {
        match self.source.next_token() {
            Ok(token) => Ok(token),
            Err(err) => {
                self.failed = Some(err.clone());
                Err(err)
            }
        }
    }
}

impl<T: TokenSource> TokenSource for Peekable<T> {
    fn next_token(&mut self) -> Result<Token, TokenError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.read()
    }
}
