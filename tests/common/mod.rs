//! Common test utilities for lftrace integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use lftrace::trace::{ObjectId, TraceEncoder, TraceRecord};

pub const REACTOR_A: ObjectId = ObjectId(0x5555_0000_1000);
pub const REACTOR_B: ObjectId = ObjectId(0x5555_0000_2000);

pub fn record(event_type: i32, object: ObjectId, reaction: Option<u32>, t: i64) -> TraceRecord {
    TraceRecord {
        event_type,
        object,
        reaction,
        worker: 0,
        logical_time: t,
        microstep: 0,
        physical_time: t + 100,
    }
}

/// Build a trace with the given start time, objects and batches.
pub fn build_trace(
    start_time: i64,
    objects: &[(ObjectId, &str)],
    batches: &[Vec<TraceRecord>],
) -> Vec<u8> {
    let mut encoder = TraceEncoder::new(Vec::new());
    encoder
        .write_header(start_time, objects)
        .expect("Failed to encode header");
    for batch in batches {
        encoder.write_batch(batch).expect("Failed to encode batch");
    }
    encoder.into_inner()
}

/// Write `bytes` to `<dir>/<name>.lft` and return the root path.
pub fn write_trace(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let root = dir.join(name);
    fs::write(dir.join(format!("{name}.lft")), bytes).expect("Failed to write trace file");
    root
}

/// Run the converter binary with the given arguments.
pub fn run_trace_to_csv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trace_to_csv"))
        .args(args)
        .output()
        .expect("Failed to run trace_to_csv")
}
