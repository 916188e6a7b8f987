//! Error taxonomy for trace conversion.
//!
//! Every failure is terminal for a conversion. Errors are grouped into
//! [`ErrorKind`] categories so the binary can report a distinct exit code for
//! each of them.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, TraceError>;

/// Exit code for command line errors. Matches what clap uses, so no
/// [`ErrorKind`] may map to it.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Broad category of a [`TraceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input trace could not be opened.
    Input,
    /// The output file could not be created.
    Output,
    /// A fixed-width read came up short, or the header is out of range.
    Malformed,
    /// The body contains a value that cannot be trusted.
    Corrupt,
    /// Any other I/O failure (e.g. writing rows).
    Io,
    /// Invalid user-supplied configuration.
    Config,
}

impl ErrorKind {
    /// Process exit code for this category.
    pub const fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Io | ErrorKind::Config => 1,
            ErrorKind::Input => 3,
            ErrorKind::Output => 4,
            ErrorKind::Corrupt => 5,
            ErrorKind::Malformed => 6,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("No trace file named {}", .path.display())]
    NoInputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not create output file named {}", .path.display())]
    CannotCreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {field} from trace header: expected {expected} bytes, got {got}")]
    TruncatedHeader {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Trace header declares {count} objects, accepted range is 0..={max}")]
    ObjectCountOutOfRange { count: i32, max: usize },

    #[error("Failed to read trace length: expected 4 bytes, got {got}")]
    TruncatedBatchLength { got: usize },

    #[error("Trace length {length} exceeds capacity {capacity}. File is garbled.")]
    BatchTooLarge { length: i32, capacity: usize },

    #[error("Trace length {length} is negative. File is garbled.")]
    NegativeBatchLength { length: i32 },

    #[error("Trace of length {records} is truncated: expected {expected} bytes, got {got}")]
    TruncatedBatch {
        records: usize,
        expected: usize,
        got: usize,
    },

    #[error("Record {index} has event type {event_type}, only {known} event types are known")]
    UnknownEventType {
        index: usize,
        event_type: i32,
        known: usize,
    },

    #[error("Invalid event name table {}: {reason}", .path.display())]
    InvalidEventNames { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TraceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TraceError::NoInputFile { .. } => ErrorKind::Input,
            TraceError::CannotCreateOutput { .. } => ErrorKind::Output,
            TraceError::TruncatedHeader { .. }
            | TraceError::ObjectCountOutOfRange { .. }
            | TraceError::TruncatedBatchLength { .. }
            | TraceError::TruncatedBatch { .. } => ErrorKind::Malformed,
            TraceError::BatchTooLarge { .. }
            | TraceError::NegativeBatchLength { .. }
            | TraceError::UnknownEventType { .. } => ErrorKind::Corrupt,
            TraceError::InvalidEventNames { .. } => ErrorKind::Config,
            TraceError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}
