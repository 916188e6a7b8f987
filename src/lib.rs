//! lftrace - decoding of binary reactor execution traces.
//!
//! A `.lft` file is written by an instrumented reactor runtime. It holds a
//! header mapping object addresses to descriptions, followed by batches of
//! fixed-size scheduling events. This library decodes those files and writes
//! one human readable row per event.
//!
//! # Modules
//!
//! - [`trace`] - Format model: records, event names, paths, encoder
//! - [`symbolize`] - Header loading and object identity resolution
//! - [`decode`] - Batch-by-batch event stream decoding
//! - [`output`] - Row representation and the CSV writer
//! - [`convert`] - End-to-end `.lft` to CSV conversion
//! - [`error`] - Error taxonomy and exit codes
//!
//! # Example
//!
//! ```no_run
//! use lftrace::convert::{convert_trace_to_csv, ConvertConfig};
//! use lftrace::trace::TracePaths;
//! use std::path::Path;
//!
//! // Reads ./trace.lft and writes ./trace.csv
//! let paths = TracePaths::from_root(Path::new("./trace"));
//! convert_trace_to_csv(&paths, &ConvertConfig::default())
//!     .expect("Failed to convert trace");
//! ```

pub mod convert;
pub mod decode;
pub mod error;
pub mod output;
pub mod symbolize;
pub mod trace;
mod utils;

pub use convert::{convert, convert_trace_to_csv, ConvertConfig, ConvertSummary};
pub use error::{ErrorKind, TraceError};
pub use trace::TracePaths;
