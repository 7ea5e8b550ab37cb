//! # JSON Tree
//!
//! Builds immutable JSON value trees from a token stream, one top-level
//! value per parse call.
pub mod ast;
pub mod parser;

// Re-exports
pub use ast::{Node, NodeKind, Number, Property};
pub use parser::{ParseError, parse};
