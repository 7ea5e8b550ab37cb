/*!
# JSON AST

Immutable tree nodes for parsed JSON values. Every node can serialize
itself back to JSON text exactly: numbers keep their original raw text and
quoted text keeps its escape sequences, so a value parsed from
minimal-whitespace input round-trips byte-for-byte.
*/
use std::fmt::{self, Display, Write as _};
use std::num::{ParseFloatError, ParseIntError};

/// A parsed JSON value.
///
/// Nodes own their children outright and carry no back-references; the tree
/// is read-only once the parser hands it over.
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    /// A JSON object; property order is insertion order and is preserved on
    /// re-serialization.
    Object(Vec<Property>),
    /// A JSON array with order-significant items
    Array(Vec<Node>),
    /// A JSON string, stored with its escape sequences intact
    Text(String),
    /// A JSON number, stored as raw text
    Number(Number),
    /// A JSON boolean
    Boolean(bool),
    /// The JSON null value
    Null,
}

/// One `name: value` pair of an object.
#[derive(Debug, PartialEq, Clone)]
pub struct Property {
    pub name: String,
    pub value: Node,
}

impl Property {
    pub fn new(name: impl Into<String>, value: Node) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The raw text of a JSON number.
///
/// Conversions parse on demand and fail if the text does not fit the target
/// type; the original spelling (signs, leading zeros, exponents) is never
/// rewritten.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Number(String);

impl Number {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The number exactly as it appeared in the input.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// # Errors
    ///
    /// Fails if the raw text is not a plain decimal integer in `i32` range.
    pub fn to_i32(&self) -> Result<i32, ParseIntError> {
        self.0.parse()
    }

    /// # Errors
    ///
    /// Fails if the raw text is not a plain decimal integer in `i64` range.
    pub fn to_i64(&self) -> Result<i64, ParseIntError> {
        self.0.parse()
    }

    /// # Errors
    ///
    /// Fails if the raw text is not parseable as a float.
    pub fn to_f32(&self) -> Result<f32, ParseFloatError> {
        self.0.parse()
    }

    /// # Errors
    ///
    /// Fails if the raw text is not parseable as a float.
    pub fn to_f64(&self) -> Result<f64, ParseFloatError> {
        self.0.parse()
    }
}

impl Node {
    /// The variant tag of this node.
    pub const fn kind(&self) -> NodeKind {
        match self {
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
            Node::Text(_) => NodeKind::Text,
            Node::Number(_) => NodeKind::Number,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Null => NodeKind::Null,
        }
    }

    /// Serializes the node back to compact JSON text.
    pub fn to_json(&self) -> String {
        self.to_string()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Boolean(true) => f.write_str("true"),
            Node::Boolean(false) => f.write_str("false"),
            Node::Number(number) => f.write_str(number.raw()),
            // Stored text is still escaped, so quoting it verbatim
            // reproduces the input.
            Node::Text(text) => write!(f, "\"{text}\""),
            Node::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_char(',')?;
                    }
                    item.fmt(f)?;
                }
                f.write_char(']')
            }
            Node::Object(properties) => {
                f.write_char('{')?;
                for (i, property) in properties.iter().enumerate() {
                    if i != 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "\"{}\":{}", property.name, property.value)?;
                }
                f.write_char('}')
            }
        }
    }
}

/// The variant tag of a [`Node`], used in diagnostics.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum NodeKind {
    Object,
    Array,
    Text,
    Number,
    Boolean,
    Null,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Object => "Object",
            NodeKind::Array => "Array",
            NodeKind::Text => "Text",
            NodeKind::Number => "Number",
            NodeKind::Boolean => "Boolean",
            NodeKind::Null => "Null",
        };
        write!(f, "{name}")
    }
}
