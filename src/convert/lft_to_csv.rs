//! `.lft` to CSV conversion implementation
//!
//! The conversion is one-shot and strictly sequential: the header is read
//! once, then batches are decoded in file order until a clean end of file.
//! Any error aborts the conversion; rows already written stay in the output.

use std::fs::File;
use std::io::{BufReader, Read};

use tracing::info;

use crate::decode::EventStreamDecoder;
use crate::error::{Result, TraceError};
use crate::output::{CsvOutput, TraceOutput};
use crate::symbolize::{read_header, TraceHeader};
use crate::trace::{EventNames, TracePaths, MAX_OBJECT_COUNT, TRACE_BUFFER_CAPACITY};

/// Knobs for a conversion.
///
/// # Fields
/// - `batch_capacity`: Largest accepted batch, in records
/// - `max_objects`: Largest accepted object count in the header
/// - `event_names`: Event kind to name table
/// - `dump_header`: Print the start time and object table to stdout
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub batch_capacity: usize,
    pub max_objects: usize,
    pub event_names: EventNames,
    pub dump_header: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            batch_capacity: TRACE_BUFFER_CAPACITY,
            max_objects: MAX_OBJECT_COUNT,
            event_names: EventNames::default(),
            dump_header: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub start_time: i64,
    pub objects: usize,
    pub batches: u64,
    pub records: u64,
}

/// Convert the trace at `paths.trace` into CSV at `paths.csv`.
///
/// The input is opened first, then the output is created, then the header is
/// read. A missing input therefore never leaves an empty CSV behind.
pub fn convert_trace_to_csv(
    paths: &TracePaths,
    config: &ConvertConfig,
) -> Result<ConvertSummary> {
    let file = File::open(&paths.trace).map_err(|source| TraceError::NoInputFile {
        path: paths.trace.clone(),
        source,
    })?;
    let mut output = CsvOutput::create(&paths.csv)?;

    let summary = convert(BufReader::new(file), &mut output, config)?;

    info!(
        "Conversion complete: {} -> {} ({} records)",
        paths.trace.display(),
        paths.csv.display(),
        summary.records
    );
    Ok(summary)
}

/// Convert a trace stream, writing rows to `output`.
///
/// The CSV header line is only written once the trace header has been read
/// successfully.
pub fn convert<R: Read>(
    mut reader: R,
    output: &mut dyn TraceOutput,
    config: &ConvertConfig,
) -> Result<ConvertSummary> {
    let header = read_header(&mut reader, config.max_objects)?;
    if config.dump_header {
        print_header(&header);
    }

    output.write_header()?;

    let mut decoder = EventStreamDecoder::new(
        reader,
        &header,
        &config.event_names,
        config.batch_capacity,
    );
    let stats = match decoder.decode_all(output) {
        Ok(stats) => stats,
        Err(err) => {
            // Keep whatever was decoded before the failure, but report the
            // decode error rather than a flush error.
            let _ = output.flush();
            return Err(err);
        }
    };
    output.flush()?;

    Ok(ConvertSummary {
        start_time: header.start_time,
        objects: header.symbols.len(),
        batches: stats.batches,
        records: stats.records,
    })
}

fn print_header(header: &TraceHeader) {
    println!("Start time is {}.", header.start_time);
    println!("There are {} objects traced.", header.symbols.len());
    println!("{}", header.symbols);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputRow;
    use crate::trace::{ObjectId, TraceEncoder, TraceRecord, CSV_HEADER};
    use std::io;

    /// Output whose flush always fails.
    struct BrokenFlush;

    impl TraceOutput for BrokenFlush {
        fn write_header(&mut self) -> Result<()> {
            Ok(())
        }

        fn write_row(&mut self, _row: &OutputRow<'_>) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full").into())
        }
    }

    fn quiet() -> ConvertConfig {
        ConvertConfig {
            dump_header: false,
            ..Default::default()
        }
    }

    fn minimal_trace() -> Vec<u8> {
        let mut encoder = TraceEncoder::new(Vec::new());
        encoder
            .write_header(1000, &[(ObjectId(0x5000), "Reactor_A")])
            .unwrap();
        encoder
            .write_batch(&[TraceRecord {
                event_type: 0,
                object: ObjectId(0x5000),
                reaction: None,
                worker: 0,
                logical_time: 1500,
                microstep: 0,
                physical_time: 1600,
            }])
            .unwrap();
        encoder.into_inner()
    }

    #[test]
    fn test_minimal_trace() {
        let bytes = minimal_trace();
        let mut out = CsvOutput::new(Vec::new());
        let summary = convert(bytes.as_slice(), &mut out, &quiet()).unwrap();

        assert_eq!(
            summary,
            ConvertSummary {
                start_time: 1000,
                objects: 1,
                batches: 1,
                records: 1,
            }
        );
        let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            format!("{CSV_HEADER}\nReaction starts, Reactor_A, none, 0, 500, 0, 600\n")
        );
    }

    #[test]
    fn test_bad_header_writes_nothing() {
        let bytes = minimal_trace();
        let mut out = CsvOutput::new(Vec::new());
        let err = convert(&bytes[..6], &mut out, &quiet()).unwrap_err();
        assert!(matches!(err, TraceError::TruncatedHeader { .. }));
        assert!(out.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_rows_before_failure_are_flushed() {
        let mut bytes = minimal_trace();
        bytes.extend_from_slice(&[0xff]);
        let mut out = CsvOutput::new(Vec::new());
        let err = convert(bytes.as_slice(), &mut out, &quiet()).unwrap_err();
        assert!(matches!(err, TraceError::TruncatedBatchLength { got: 1 }));
        let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_decode_error_wins_over_flush_error() {
        let mut bytes = minimal_trace();
        bytes.extend_from_slice(&[0xff, 0xff]);
        let err = convert(bytes.as_slice(), &mut BrokenFlush, &quiet()).unwrap_err();
        assert!(matches!(err, TraceError::TruncatedBatchLength { got: 2 }));

        // Without a decode error the flush failure is reported.
        let bytes = minimal_trace();
        let err = convert(bytes.as_slice(), &mut BrokenFlush, &quiet()).unwrap_err();
        assert!(matches!(err, TraceError::Io(_)));
    }

    #[test]
    fn test_custom_event_names() {
        let bytes = minimal_trace();
        let config = ConvertConfig {
            event_names: EventNames::new(vec!["start".to_string()]),
            ..quiet()
        };
        let mut out = CsvOutput::new(Vec::new());
        convert(bytes.as_slice(), &mut out, &config).unwrap();
        let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
        assert!(text.ends_with("start, Reactor_A, none, 0, 500, 0, 600\n"));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let paths = TracePaths::from_root(&dir.path().join("absent"));
        let err = convert_trace_to_csv(&paths, &quiet()).unwrap_err();
        assert!(matches!(err, TraceError::NoInputFile { .. }));
        assert!(!paths.csv.exists());
    }
}
