/*!
# `json2sheet` Library

Streams concatenated JSON values (no enclosing delimiter, not JSON lines)
into rectangular grids of cell strings suitable for a spreadsheet-style
destination.
*/

pub mod commands;
pub mod sheet;
pub mod tokenizer;
pub mod tree;
