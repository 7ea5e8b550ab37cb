/*!
# Tabular Projector

Flattens a stream of concatenated top-level JSON values into rows of cell
strings. Two modes:

- **Array mode**: every top-level value must be an array; each one becomes
  a row as-is, so the grid may be ragged.
- **Object mode**: every top-level value must be an object; property names
  are assigned stable column indices in first-seen order, the header row is
  materialized once the input is exhausted, and earlier rows are padded
  with empty cells to the final header width so the grid is rectangular.
*/
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::io::Read;

use crate::tokenizer::lex;
use crate::tree::{Node, NodeKind, ParseError, parse};

/// Errors raised while projecting parsed values into rows.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectError {
    /// The input could not be tokenized or parsed.
    Parse(ParseError),
    /// Object mode saw a top-level value that is not an object.
    NotAnObject(NodeKind),
    /// Array mode saw a top-level value that is not an array.
    NotAnArray(NodeKind),
}

impl From<ParseError> for ProjectError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl std::error::Error for ProjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "cannot parse json: {err}"),
            Self::NotAnObject(kind) => {
                write!(f, "json is not an object: {kind}")
            }
            Self::NotAnArray(kind) => {
                write!(f, "json object is not an array: {kind}")
            }
        }
    }
}

/// Append-only map from header name to its fixed column index.
///
/// Once a name is assigned an index it never moves; later objects missing
/// that name leave an empty cell at its column.
#[derive(Debug, Default)]
struct HeaderMap {
    index: HashMap<String, usize>,
    /// Names in discovery order; position is the column index
    names: Vec<String>,
}

impl HeaderMap {
    fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns the column index for `name`, assigning the next free index
    /// if the name has not been seen before.
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.index.insert(name.to_string(), idx);
        self.names.push(name.to_string());
        log::debug!("header {name:?} assigned column {idx}");
        idx
    }

    /// The dense header row: position `v` holds the name mapped to index
    /// `v`.
    fn into_row(self) -> Vec<String> {
        self.names
    }
}

/// Projects a stream of top-level JSON arrays into rows, one row per array.
///
/// Rows are not reconciled to a common width; irregular input stays
/// irregular.
///
/// # Errors
///
/// Fails on the first lex, syntax, or type error; no rows are returned for
/// a partially consumed stream.
pub fn array_rows<R: Read>(from: R) -> Result<Vec<Vec<String>>, ProjectError> {
    let mut tokens = lex(from);
    let mut rows = vec![];

    while let Some(root) = parse(&mut tokens)? {
        let Node::Array(items) = root else {
            return Err(ProjectError::NotAnArray(root.kind()));
        };
        rows.push(items.iter().map(cell).collect());
    }

    log::debug!("projected {} array rows", rows.len());
    Ok(rows)
}

/// Projects a stream of top-level JSON objects into rows sharing one
/// header, the header row first.
///
/// # Errors
///
/// Fails on the first lex, syntax, or type error; no rows are returned for
/// a partially consumed stream.
pub fn object_rows<R: Read>(
    from: R,
) -> Result<Vec<Vec<String>>, ProjectError> {
    let mut tokens = lex(from);
    let mut headers = HeaderMap::default();

    // Row zero is reserved for the header, which is only known once the
    // whole input has been read.
    let mut rows: Vec<Vec<String>> = vec![vec![]];

    while let Some(root) = parse(&mut tokens)? {
        let Node::Object(properties) = root else {
            return Err(ProjectError::NotAnObject(root.kind()));
        };

        // Sized to the headers known so far; grows as this object
        // introduces new names.
        let mut row = vec![String::new(); headers.len()];
        for property in &properties {
            let idx = headers.intern(&property.name);
            if idx >= row.len() {
                row.resize(idx + 1, String::new());
            }
            row[idx] = cell(&property.value);
        }
        rows.push(row);
    }

    // Rows built before the header reached its final width are narrower;
    // pad them so the grid is rectangular.
    let width = headers.len();
    for row in &mut rows[1..] {
        row.resize(width, String::new());
    }

    log::debug!(
        "projected {} object rows across {width} columns",
        rows.len() - 1
    );

    rows[0] = headers.into_row();
    Ok(rows)
}

/// Converts one node to the text placed in a single spreadsheet cell.
///
/// Booleans use the spreadsheet convention (`TRUE`/`FALSE`), null becomes
/// an empty cell, numbers and text keep their raw stored characters, and
/// nested containers fall back to their JSON serialization.
pub fn cell(node: &Node) -> String {
    match node {
        Node::Boolean(true) => "TRUE".to_string(),
        Node::Boolean(false) => "FALSE".to_string(),
        Node::Null => String::new(),
        Node::Number(number) => number.raw().to_string(),
        Node::Text(text) => text.clone(),
        nested @ (Node::Array(_) | Node::Object(_)) => nested.to_json(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_stay_ragged() {
        let src = r#"
        ["hello", "world"]
        ["whats", "up", 55.88]
        [true, true, false]
        ["wow"]
        "#;

        let rows = array_rows(src.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["hello".to_string(), "world".to_string()],
                vec!["whats".to_string(), "up".to_string(), "55.88".to_string()],
                vec!["TRUE".to_string(), "TRUE".to_string(), "FALSE".to_string()],
                vec!["wow".to_string()],
            ]
        );
    }

    #[test]
    fn objects_grow_a_shared_header() {
        let src = r#"
        {"a":"hello","b":"world"}
        {"b":2,"a":1,"c":3}
        {"d":4,"a":1,"c":3}
        "#;

        let rows = object_rows(src.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);

        // Header names in discovery order.
        assert_eq!(rows[0], vec!["a", "b", "c", "d"]);

        // Every data row is padded to the final header width; cells for
        // names an object lacks stay empty.
        assert_eq!(rows[1], vec!["hello", "world", "", ""]);
        assert_eq!(rows[2], vec!["1", "2", "3", ""]);
        assert_eq!(rows[3], vec!["1", "", "3", "4"]);
    }

    #[test]
    fn empty_input_yields_header_only() {
        let rows = object_rows("".as_bytes()).unwrap();
        assert_eq!(rows, vec![Vec::<String>::new()]);

        let rows = array_rows("".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn object_mode_rejects_arrays() {
        let err = object_rows("[1,2]".as_bytes()).unwrap_err();
        assert_eq!(err, ProjectError::NotAnObject(NodeKind::Array));
        assert_eq!(err.to_string(), "json is not an object: Array");
    }

    #[test]
    fn array_mode_rejects_objects() {
        let err = array_rows(r#"{"a":1}"#.as_bytes()).unwrap_err();
        assert_eq!(err, ProjectError::NotAnArray(NodeKind::Object));
        assert_eq!(err.to_string(), "json object is not an array: Object");
    }

    #[test]
    fn type_error_discards_all_rows() {
        // The first value is a fine array, the second is not; the whole
        // projection aborts rather than returning a partial grid.
        let result = array_rows(r#"[1,2] {"a":1}"#.as_bytes());
        assert_eq!(
            result,
            Err(ProjectError::NotAnArray(NodeKind::Object))
        );
    }

    #[test]
    fn parse_error_aborts_projection() {
        let err = array_rows("[1,2] [3,".as_bytes()).unwrap_err();
        assert!(matches!(err, ProjectError::Parse(_)));
        assert_eq!(
            err.to_string(),
            "cannot parse json: unexpected error parsing array item: \
             unexpected end of stream"
        );
    }

    #[test]
    fn cell_conversion_rules() {
        let rows = array_rows(
            r#"[true, false, null, -01.23, "a\nb", {"k":[1,2]}]"#.as_bytes(),
        )
        .unwrap();

        assert_eq!(
            rows[0],
            vec![
                "TRUE",
                "FALSE",
                "",
                "-01.23",
                // Stored text keeps its escape sequences.
                r"a\nb",
                r#"{"k":[1,2]}"#,
            ]
        );
    }
}
