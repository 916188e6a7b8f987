//! Event stream decoding.
//!
//! After the header, a trace is a sequence of batches. Each batch is an `i32`
//! record count followed by that many fixed-size records. The stream ends
//! cleanly only when end of file falls exactly on a batch boundary.

use std::io::Read;

use tracing::debug;

use crate::error::{Result, TraceError};
use crate::output::{OutputRow, TraceOutput};
use crate::symbolize::TraceHeader;
use crate::trace::{EventNames, RawTraceRecord, TraceRecord, TRACE_RECORD_SIZE};
use crate::utils::read_full;

/// Outcome of decoding one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// A batch with this many records was written out.
    Decoded(usize),
    /// The stream ended cleanly before a batch length.
    EndOfTrace,
}

/// Totals for a fully decoded stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub batches: u64,
    pub records: u64,
}

pub struct EventStreamDecoder<'a, R: Read> {
    reader: R,
    header: &'a TraceHeader,
    event_names: &'a EventNames,
    capacity: usize,
    buffer: Vec<u8>,
    stats: DecodeStats,
}

impl<'a, R: Read> EventStreamDecoder<'a, R> {
    /// `reader` must be positioned just after the header. Batches longer than
    /// `capacity` records are rejected as corrupt.
    pub fn new(
        reader: R,
        header: &'a TraceHeader,
        event_names: &'a EventNames,
        capacity: usize,
    ) -> Self {
        EventStreamDecoder {
            reader,
            header,
            event_names,
            capacity,
            buffer: Vec::new(),
            stats: DecodeStats::default(),
        }
    }

    /// Decode the next batch and write one row per record to `output`.
    pub fn decode_batch(&mut self, output: &mut dyn TraceOutput) -> Result<BatchStatus> {
        let length = match self.read_batch_length()? {
            Some(length) => length,
            None => return Ok(BatchStatus::EndOfTrace),
        };
        debug!("Trace of length {} being converted", length);

        self.read_records(length)?;

        let start_time = self.header.start_time;
        for (index, chunk) in self.buffer.chunks_exact(TRACE_RECORD_SIZE).enumerate() {
            // chunks_exact only yields full records.
            let record = TraceRecord::from(RawTraceRecord::from_bytes(chunk).unwrap_or_default());

            let event = self.event_names.get(record.event_type).ok_or_else(|| {
                TraceError::UnknownEventType {
                    index,
                    event_type: record.event_type,
                    known: self.event_names.len(),
                }
            })?;
            let reactor = self.header.symbols.describe(record.object);

            output.write_row(&OutputRow::new(&record, event, reactor, start_time))?;
        }

        self.stats.batches += 1;
        self.stats.records += length as u64;
        Ok(BatchStatus::Decoded(length))
    }

    /// Decode batches until the stream ends cleanly.
    pub fn decode_all(&mut self, output: &mut dyn TraceOutput) -> Result<DecodeStats> {
        while let BatchStatus::Decoded(_) = self.decode_batch(output)? {}
        Ok(self.stats)
    }

    /// Read the batch length. `None` means a clean end of stream.
    fn read_batch_length(&mut self) -> Result<Option<usize>> {
        let mut buf = [0u8; 4];
        match read_full(&mut self.reader, &mut buf)? {
            0 => return Ok(None),
            4 => {}
            got => return Err(TraceError::TruncatedBatchLength { got }),
        }

        let raw = i32::from_ne_bytes(buf);
        let length =
            usize::try_from(raw).map_err(|_| TraceError::NegativeBatchLength { length: raw })?;
        if length > self.capacity {
            return Err(TraceError::BatchTooLarge {
                length: raw,
                capacity: self.capacity,
            });
        }
        Ok(Some(length))
    }

    /// Fill the batch buffer with exactly `length` records.
    ///
    /// The buffer only grows with the bytes actually present, so a corrupt
    /// length cannot force a huge allocation.
    fn read_records(&mut self, length: usize) -> Result<()> {
        let expected = length * TRACE_RECORD_SIZE;
        self.buffer.clear();
        let got = (&mut self.reader)
            .take(expected as u64)
            .read_to_end(&mut self.buffer)?;
        if got != expected {
            return Err(TraceError::TruncatedBatch {
                records: length,
                expected,
                got,
            });
        }
        Ok(())
    }
}
