//! Constants of the `.lft` trace format.
//!
//! These mirror the limits compiled into the runtime that produces the trace.

/// Maximum number of records in a single batch.
pub const TRACE_BUFFER_CAPACITY: usize = 2048;

/// Size of the scratch buffer used to read one object description,
/// including its terminating null byte.
pub const DESCRIPTION_BUFFER_SIZE: usize = 1024;

/// Upper bound on the object count accepted from a trace header.
pub const MAX_OBJECT_COUNT: usize = 1 << 20;

/// Width in bytes of an object identity (a pointer in the producing runtime).
pub const OBJECT_ID_WIDTH: usize = 8;

/// Description substituted when an object identity has no table entry.
pub const NO_DESCRIPTION_FOUND: &str = "NO DESCRIPTION FOUND";

/// Rendered in the reaction column when a record has no reaction.
pub const NO_REACTION: &str = "none";

/// First line of every CSV file.
pub const CSV_HEADER: &str =
    "Event, Reactor, Reaction, Worker, Elapsed Logical Time, Microstep, Elapsed Physical Time";

/// Field separator used in CSV output.
pub const CSV_SEPARATOR: &str = ", ";

pub const TRACE_EXTENSION: &str = "lft";
pub const CSV_EXTENSION: &str = "csv";
