//! Trace format conversion utilities
//!
//! This module drives a full conversion: header first, then every batch of
//! the event stream, with rows going to a [`crate::output::TraceOutput`].

mod lft_to_csv;

pub use lft_to_csv::{convert, convert_trace_to_csv, ConvertConfig, ConvertSummary};
