//! Installation of the logging backend.

use std::io::Write;

use env_logger::Logger;
use fleetplan_core::{DiagnosticLevel, Diagnostics};
use log::{LevelFilter, debug};

/// Install the `env_logger` backend and filter records at `level`.
///
/// Records are written to standard error as the bare message. The backend
/// itself lets every level through and is installed once per process; the
/// global maximum level is what filters, so later calls may raise or lower
/// the verbosity.
pub(crate) fn configure_diagnostics(level: DiagnosticLevel) -> Diagnostics {
    let installed = log::set_boxed_logger(Box::new(stderr_logger()));
    log::set_max_level(level.level_filter());
    if installed.is_err() {
        debug!("Logger already installed; updated the level filter only");
    }
    Diagnostics::new(level)
}

fn stderr_logger() -> Logger {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .target(env_logger::Target::Stderr)
        .build()
}
