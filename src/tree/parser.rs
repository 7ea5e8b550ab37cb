/*!
# JSON Parser

Recursive-descent parser over a [`Peekable`] token stream. One call to
[`parse`] consumes exactly one top-level value, so repeated calls walk a
stream of concatenated JSON values (`{"a":1}{"b":2}`) one value at a time.
The parser itself is stateless; the only cursor is the token stream's.
*/
use std::fmt::{self, Display};

use crate::tokenizer::{Peekable, Token, TokenError, TokenKind, TokenSource};
use crate::tree::ast::{Node, Number, Property};

/// Errors raised while building a tree from tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The lexer failed underneath the parser.
    Lex(TokenError),
    /// A specific token was required and something else appeared.
    Unexpected { expected: TokenKind, found: Token },
    /// A token that cannot start a value appeared where a value was
    /// expected.
    UnexpectedValue(Token),
    /// The stream ended in the middle of a value.
    UnexpectedEnd,
    /// An unquoted literal other than `true`, `false`, or `null`.
    UnrecognizedLiteral(String),
    /// A failure inside a production rule, with the rule named.
    In { rule: Rule, cause: Box<ParseError> },
}

/// The production rule active when a nested failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Object,
    ObjectValue,
    Array,
    ArrayItem,
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Object => "object",
            Rule::ObjectValue => "object value",
            Rule::Array => "array",
            Rule::ArrayItem => "array item",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(err) => Some(err),
            Self::In { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(err) => write!(f, "cannot lex token: {err}"),
            Self::Unexpected { expected, found } => write!(
                f,
                "unexpected token, expected {expected} but got: {found}"
            ),
            Self::UnexpectedValue(token) => {
                write!(f, "unexpected token: {token}")
            }
            Self::UnexpectedEnd => write!(f, "unexpected end of stream"),
            Self::UnrecognizedLiteral(text) => {
                write!(f, "unrecognized literal: {text:?}")
            }
            Self::In { rule, cause } => {
                write!(f, "unexpected error parsing {rule}: {cause}")
            }
        }
    }
}

/// Parses the next top-level value from the stream.
///
/// Returns `Ok(None)` when the stream is cleanly exhausted, i.e. end of
/// stream is observed before any token of a value. An end of stream inside
/// a value is an error.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the expected and found tokens and the
/// production rule that was active.
pub fn parse<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<Option<Node>, ParseError> {
    let token = tokens.peek().map_err(ParseError::Lex)?;
    if token == Token::Eof {
        return Ok(None);
    }
    parse_value(tokens).map(Some)
}

/// Parses exactly one value; end of stream here is an error.
fn parse_value<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<Node, ParseError> {
    let token = tokens.peek().map_err(ParseError::Lex)?;
    match token {
        Token::OpeningBrace => parse_object(tokens),
        Token::OpeningBracket => parse_array(tokens),
        Token::PrimitiveNumber(_) => parse_number(tokens),
        Token::PrimitiveText(_) => parse_primitive_text(tokens),
        Token::Text(_) => parse_text(tokens),
        Token::Eof => Err(ParseError::UnexpectedEnd),
        other => Err(ParseError::UnexpectedValue(other)),
    }
}

fn parse_object<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<Node, ParseError> {
    skip_token(tokens, TokenKind::OpeningBrace).map_err(in_rule(Rule::Object))?;

    let peeked = tokens.peek().map_err(ParseError::Lex).map_err(in_rule(Rule::Object))?;
    if peeked == Token::ClosingBrace {
        skip_token(tokens, TokenKind::ClosingBrace)?;
        return Ok(Node::Object(vec![]));
    }

    let mut properties = vec![];
    loop {
        let name = parse_property_name(tokens)?;

        skip_token(tokens, TokenKind::Colon).map_err(in_rule(Rule::Object))?;

        let value =
            parse_value(tokens).map_err(in_rule(Rule::ObjectValue))?;
        properties.push(Property::new(name, value));

        let separator = next_token(tokens).map_err(in_rule(Rule::Object))?;
        match separator {
            Token::ClosingBrace => break,
            Token::Comma => {}
            found => {
                return Err(in_rule(Rule::Object)(ParseError::Unexpected {
                    expected: TokenKind::Comma,
                    found,
                }));
            }
        }
    }

    Ok(Node::Object(properties))
}

fn parse_property_name<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<String, ParseError> {
    let token = next_token(tokens).map_err(in_rule(Rule::Object))?;
    match token {
        Token::Text(name) => Ok(name),
        found => Err(in_rule(Rule::Object)(ParseError::Unexpected {
            expected: TokenKind::Text,
            found,
        })),
    }
}

fn parse_array<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<Node, ParseError> {
    skip_token(tokens, TokenKind::OpeningBracket)
        .map_err(in_rule(Rule::Array))?;

    let peeked = tokens.peek().map_err(ParseError::Lex).map_err(in_rule(Rule::Array))?;
    if peeked == Token::ClosingBracket {
        skip_token(tokens, TokenKind::ClosingBracket)?;
        return Ok(Node::Array(vec![]));
    }

    let mut items = vec![];
    loop {
        let item = parse_value(tokens).map_err(in_rule(Rule::ArrayItem))?;
        items.push(item);

        let separator = next_token(tokens).map_err(in_rule(Rule::Array))?;
        match separator {
            Token::ClosingBracket => break,
            Token::Comma => {}
            found => {
                return Err(in_rule(Rule::Array)(ParseError::Unexpected {
                    expected: TokenKind::Comma,
                    found,
                }));
            }
        }
    }

    Ok(Node::Array(items))
}

fn parse_number<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<Node, ParseError> {
    match next_token(tokens)? {
        Token::PrimitiveNumber(raw) => Ok(Node::Number(Number::new(raw))),
        found => Err(ParseError::Unexpected {
            expected: TokenKind::PrimitiveNumber,
            found,
        }),
    }
}

fn parse_primitive_text<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<Node, ParseError> {
    match next_token(tokens)? {
        Token::PrimitiveText(literal) => match literal.as_str() {
            "true" => Ok(Node::Boolean(true)),
            "false" => Ok(Node::Boolean(false)),
            "null" => Ok(Node::Null),
            _ => Err(ParseError::UnrecognizedLiteral(literal)),
        },
        found => Err(ParseError::Unexpected {
            expected: TokenKind::PrimitiveText,
            found,
        }),
    }
}

fn parse_text<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<Node, ParseError> {
    match next_token(tokens)? {
        Token::Text(text) => Ok(Node::Text(text)),
        found => Err(ParseError::Unexpected {
            expected: TokenKind::Text,
            found,
        }),
    }
}

/// Consumes the next token, lifting lex failures into [`ParseError`].
fn next_token<T: TokenSource>(
    tokens: &mut Peekable<T>,
) -> Result<Token, ParseError> {
    tokens.next_token().map_err(ParseError::Lex)
}

/// Consumes the next token, requiring it to be of the given kind.
fn skip_token<T: TokenSource>(
    tokens: &mut Peekable<T>,
    expected: TokenKind,
) -> Result<(), ParseError> {
    let token = next_token(tokens)?;
    if token.kind() == expected {
        Ok(())
    } else {
        Err(ParseError::Unexpected {
            expected,
            found: token,
        })
    }
}

/// Wraps a nested failure with the production rule it happened in.
fn in_rule(rule: Rule) -> impl Fn(ParseError) -> ParseError {
    move |cause| ParseError::In {
        rule,
        cause: Box::new(cause),
    }
}
