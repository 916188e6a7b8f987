//! Comma-separated text output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{OutputRow, TraceOutput};
use crate::error::{Result, TraceError};
use crate::trace::CSV_HEADER;

/// Writes rows as `, ` separated lines. Fields are not quoted or escaped.
pub struct CsvOutput<W: Write> {
    writer: BufWriter<W>,
}

impl CsvOutput<File> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| TraceError::CannotCreateOutput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CsvOutput<W> {
    pub fn new(writer: W) -> Self {
        CsvOutput {
            writer: BufWriter::new(writer),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| TraceError::Io(e.into_error()))
    }
}

impl<W: Write> TraceOutput for CsvOutput<W> {
    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "{CSV_HEADER}")?;
        Ok(())
    }

    fn write_row(&mut self, row: &OutputRow<'_>) -> Result<()> {
        writeln!(self.writer, "{row}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
