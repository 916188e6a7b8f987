//! Row representation shared by all outputs.

use std::fmt;

use crate::trace::{TraceRecord, CSV_SEPARATOR, NO_REACTION};

/// Textual projection of one trace record.
///
/// Names are borrowed from the event name table and the symbol table. Times
/// are already relative to the trace start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputRow<'a> {
    pub event: &'a str,
    pub reactor: &'a str,
    pub reaction: Option<u32>,
    pub worker: i32,
    pub elapsed_logical_time: i64,
    pub microstep: i32,
    pub elapsed_physical_time: i64,
}

impl<'a> OutputRow<'a> {
    pub fn new(record: &TraceRecord, event: &'a str, reactor: &'a str, start_time: i64) -> Self {
        OutputRow {
            event,
            reactor,
            reaction: record.reaction,
            worker: record.worker,
            elapsed_logical_time: record.elapsed_logical(start_time),
            microstep: record.microstep,
            elapsed_physical_time: record.elapsed_physical(start_time),
        }
    }
}

/// Reaction column: the index, or `none`.
struct Reaction(Option<u32>);

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str(NO_REACTION),
        }
    }
}

impl fmt::Display for OutputRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = CSV_SEPARATOR;
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.event,
            self.reactor,
            Reaction(self.reaction),
            self.worker,
            self.elapsed_logical_time,
            self.microstep,
            self.elapsed_physical_time,
        )
    }
}
