//! Output format abstraction layer
//!
//! The decoder hands each event to a [`TraceOutput`] as an [`OutputRow`] and
//! does not know how rows end up on disk. [`CsvOutput`] writes the
//! comma-separated text format; tests use in-memory implementations.

mod csv;
mod types;

pub use csv::CsvOutput;
pub use types::*;

use crate::error::Result;

/// Destination for decoded trace rows.
pub trait TraceOutput {
    /// Write the column header. Called once, before any row.
    fn write_header(&mut self) -> Result<()>;

    /// Write a single event row.
    fn write_row(&mut self, row: &OutputRow<'_>) -> Result<()>;

    /// Flush any buffered data to the output
    fn flush(&mut self) -> Result<()>;
}
