use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use lftrace::convert::{convert_trace_to_csv, ConvertConfig};
use lftrace::error::USAGE_EXIT_CODE;
use lftrace::trace::{EventNames, TracePaths, MAX_OBJECT_COUNT, TRACE_BUFFER_CAPACITY};
use lftrace::{ErrorKind, TraceError};

/// Convert a binary execution trace (<ROOT>.lft) into comma-separated text (<ROOT>.csv).
#[derive(Debug, Parser)]
#[command(name = "trace_to_csv")]
#[command(version)]
struct Command {
    /// Trace file root, without the .lft extension
    #[arg(value_name = "ROOT")]
    roots: Vec<PathBuf>,
    /// Write the CSV here instead of <ROOT>.csv
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON file replacing the built-in event name table
    #[arg(long)]
    event_names: Option<PathBuf>,
    /// Largest accepted batch, in records
    #[arg(long, default_value_t = TRACE_BUFFER_CAPACITY)]
    batch_capacity: usize,
    /// Do not print the start time and object table
    #[arg(short, long)]
    quiet: bool,
    /// Log decoding progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    let mut cmd = Command::command();
    // Nothing useful to do if stdout is gone.
    let _ = cmd.print_help();
}

fn run(opts: Command, root: PathBuf) -> Result<()> {
    let event_names = match &opts.event_names {
        Some(path) => EventNames::from_file(path)?,
        None => EventNames::default(),
    };
    let config = ConvertConfig {
        batch_capacity: opts.batch_capacity,
        max_objects: MAX_OBJECT_COUNT,
        event_names,
        dump_header: !opts.quiet,
    };

    let mut paths = TracePaths::from_root(&root);
    if let Some(output) = opts.output {
        paths = paths.with_output(output);
    }

    convert_trace_to_csv(&paths, &config)
        .with_context(|| format!("Failed to convert {}", paths.trace.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    let mut opts = match Command::try_parse() {
        Ok(opts) => opts,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(USAGE_EXIT_CODE as u8),
            };
        }
    };
    init_logging(opts.verbose);

    // Anything but exactly one root only prints usage.
    if opts.roots.len() != 1 {
        print_usage();
        return ExitCode::SUCCESS;
    }
    let root = opts.roots.remove(0);

    match run(opts, root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            let trace_err = err.downcast_ref::<TraceError>();
            if matches!(
                trace_err.map(TraceError::kind),
                Some(ErrorKind::Input | ErrorKind::Output)
            ) {
                print_usage();
            }
            let code = trace_err.map_or(1, TraceError::exit_code);
            ExitCode::from(code as u8)
        }
    }
}
