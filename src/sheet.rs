/*!
# Sheet Sinks

The destination side of the pipeline: anything that can durably store a
grid of cell strings. The projector only needs two operations — replace
everything with a grid, or append rows to what is already there — so both
are separate traits and a destination implements whichever it supports.

A local [`JsonGridSink`] is provided for the CLI; remote spreadsheet
clients live outside this crate and plug in through the same traits.
*/
pub mod rows;

// Re-exports
pub use rows::{ProjectError, array_rows, cell, object_rows};

use anyhow::{Context, Result};
use std::io::Read;
use std::io::Write;

/// A destination that replaces all of its values with a grid.
pub trait SheetUpdate {
    /// Replaces the destination's contents with `rows`.
    ///
    /// # Errors
    ///
    /// Returns an error when the destination rejects the grid or the write
    /// fails.
    fn update_values(&mut self, rows: &[Vec<String>]) -> Result<()>;
}

/// A destination that appends rows below its existing values.
pub trait SheetAppend {
    /// Appends `rows` after the destination's current contents.
    ///
    /// # Errors
    ///
    /// Returns an error when the destination rejects the rows or the write
    /// fails.
    fn append_values(&mut self, rows: &[Vec<String>]) -> Result<()>;
}

/// Projects a stream of top-level JSON arrays and replaces the sheet's
/// contents with the resulting grid.
///
/// # Errors
///
/// Fails if projection fails or the sink rejects the grid.
pub fn write_arrays_to<S: SheetUpdate, R: Read>(
    to: &mut S,
    from: R,
) -> Result<()> {
    let rows = array_rows(from).context("project json arrays to rows")?;
    to.update_values(&rows)
}

/// Projects a stream of top-level JSON objects and replaces the sheet's
/// contents with a header row plus one row per object.
///
/// # Errors
///
/// Fails if projection fails or the sink rejects the grid.
pub fn write_objects_to<S: SheetUpdate, R: Read>(
    to: &mut S,
    from: R,
) -> Result<()> {
    let rows = object_rows(from).context("project json objects to rows")?;
    to.update_values(&rows)
}

/// Projects a stream of top-level JSON arrays and appends the resulting
/// rows to the sheet.
///
/// # Errors
///
/// Fails if projection fails or the sink rejects the rows.
pub fn append_arrays_to<S: SheetAppend, R: Read>(
    to: &mut S,
    from: R,
) -> Result<()> {
    let rows = array_rows(from).context("project json arrays to rows")?;
    to.append_values(&rows)
}

/// Projects a stream of top-level JSON objects and appends the resulting
/// rows (header included) to the sheet.
///
/// # Errors
///
/// Fails if projection fails or the sink rejects the rows.
pub fn append_objects_to<S: SheetAppend, R: Read>(
    to: &mut S,
    from: R,
) -> Result<()> {
    let rows = object_rows(from).context("project json objects to rows")?;
    to.append_values(&rows)
}

/// A sink that serializes the grid as JSON to any writer.
///
/// Used by the CLI against stdout; both update and append emit the rows as
/// their own grid, since there is nothing local to append to.
pub struct JsonGridSink<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonGridSink<W> {
    pub const fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    fn emit(&mut self, rows: &[Vec<String>]) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, rows)
        } else {
            serde_json::to_writer(&mut self.out, rows)
        }
        .context("serialize grid to JSON")?;
        writeln!(self.out).context("write grid to output")
    }
}

impl<W: Write> SheetUpdate for JsonGridSink<W> {
    fn update_values(&mut self, rows: &[Vec<String>]) -> Result<()> {
        self.emit(rows)
    }
}

impl<W: Write> SheetAppend for JsonGridSink<W> {
    fn append_values(&mut self, rows: &[Vec<String>]) -> Result<()> {
        self.emit(rows)
    }
}
