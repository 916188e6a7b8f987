//! Writer for the `.lft` format.
//!
//! This is the inverse of the header loader and the event stream decoder. It
//! lays out bytes the same way the tracing runtime does, which makes it
//! useful for producing traces without running an instrumented program.

use std::io::{self, Write};

use super::models::{ObjectId, RawTraceRecord, TraceRecord};

pub struct TraceEncoder<W: Write> {
    writer: W,
}

impl<W: Write> TraceEncoder<W> {
    pub fn new(writer: W) -> Self {
        TraceEncoder { writer }
    }

    /// Write the start time and the object description table.
    pub fn write_header(
        &mut self,
        start_time: i64,
        objects: &[(ObjectId, &str)],
    ) -> io::Result<()> {
        let count = i32::try_from(objects.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many objects"))?;
        self.writer.write_all(&start_time.to_ne_bytes())?;
        self.writer.write_all(&count.to_ne_bytes())?;
        for (object, description) in objects {
            self.writer.write_all(&object.0.to_ne_bytes())?;
            self.writer.write_all(description.as_bytes())?;
            self.writer.write_all(&[0])?;
        }
        Ok(())
    }

    /// Write one length-prefixed batch of records.
    pub fn write_batch(&mut self, records: &[TraceRecord]) -> io::Result<()> {
        let raw = records
            .iter()
            .map(|&record| RawTraceRecord::try_from(record))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, "reaction index too large")
            })?;
        self.write_raw_batch(&raw)
    }

    pub fn write_raw_batch(&mut self, records: &[RawTraceRecord]) -> io::Result<()> {
        let length = i32::try_from(records.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "batch too long"))?;
        self.writer.write_all(&length.to_ne_bytes())?;
        for record in records {
            self.writer.write_all(&record.to_bytes())?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
