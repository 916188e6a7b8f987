//! The `.lft` binary trace format.
//!
//! A trace file starts with a header (start time plus a table mapping object
//! identities to descriptions) and is followed by length-prefixed batches of
//! fixed-size event records, all in the producer's native byte order.
//!
//! # Module Organization
//!
//! - [`models`]: Object identities and the raw/decoded record structs
//! - [`event_names`]: The table mapping event kinds to display names
//! - [`paths`]: Input/output path derivation from a trace root
//! - [`encode`]: Writer for the format, used to build traces in tests
//! - [`constants`]: Format limits and output tokens

pub mod constants;
pub mod encode;
pub mod event_names;
pub mod models;
pub mod paths;

pub use constants::*;
pub use encode::TraceEncoder;
pub use event_names::EventNames;
pub use models::*;
pub use paths::TracePaths;
